//! Event-Detection Engine
//!
//! ## Overview
//!
//! Pure decision logic: given a channel's configuration, its stored value and
//! latch state, and a candidate value, decide whether the candidate is
//! significant enough to transmit. No hardware access, no clock reads, no
//! mutation - the channel applies the [`Decision`] afterwards.
//!
//! ## Trigger conditions
//!
//! ```text
//! Bool:          fire = forced ∨ timeout ∨ change
//! Int32/Float32: fire = forced ∨ timeout ∨ change
//!                     ∨ (upper ∧ ¬upper_latched)
//!                     ∨ (lower ∧ ¬lower_latched)
//! Raw:           fire = forced ∨ timeout ∨ change
//! ```
//!
//! where `change` is inequality against the stored value (IEEE semantics for
//! floats: a NaN candidate always reads as changed), `upper`/`lower` are
//! strict comparisons against the configured limits, and `forced` is a
//! still-pending send.
//!
//! ## Edge-triggered thresholds
//!
//! The `upper`/`lower` results feed the channel's crossing latches after
//! every evaluation, independent of each other and of whether the trigger
//! fired. A value sitting continuously beyond a limit therefore notifies
//! exactly once; the latch re-arms only when a sample returns within range.

use crate::config::{Limit, TriggerConfig};
use crate::time::Timestamp;
use crate::value::Value;

/// Outcome of one trigger evaluation
///
/// `upper`/`lower` are the *new* latch values: whether the candidate sits
/// beyond the respective limit. They are meaningful for numeric kinds only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decision {
    /// Whether the candidate should be stored and transmitted
    pub fire: bool,
    /// Candidate is beyond the upper limit
    pub upper: bool,
    /// Candidate is beyond the lower limit
    pub lower: bool,
}

/// Cooperative timeout check
///
/// True when a timer period is configured and at least that many seconds
/// have elapsed since `last_tick`. The caller rebases the tick to `now` on
/// expiry; a missed interval is not replayed.
pub(crate) fn timer_due(config: &TriggerConfig, last_tick: Timestamp, now: Timestamp) -> bool {
    match config.timer_period {
        Some(period_s) => now.saturating_sub(last_tick) >= u64::from(period_s) * 1000,
        None => false,
    }
}

fn above(limit: Option<Limit>, candidate: &Value) -> bool {
    match (limit, candidate) {
        (Some(Limit::Int(limit)), Value::Int32(c)) => *c > limit,
        (Some(Limit::Float(limit)), Value::Float32(c)) => *c > limit,
        _ => false,
    }
}

fn below(limit: Option<Limit>, candidate: &Value) -> bool {
    match (limit, candidate) {
        (Some(Limit::Int(limit)), Value::Int32(c)) => *c < limit,
        (Some(Limit::Float(limit)), Value::Float32(c)) => *c < limit,
        _ => false,
    }
}

/// Evaluate the trigger policy for one candidate value
///
/// `stored` and `candidate` must share a kind (the channel checks first);
/// raw candidates are already clamped to capacity by construction, so the
/// change comparison sees exactly what would be stored.
pub(crate) fn evaluate(
    config: &TriggerConfig,
    stored: &Value,
    candidate: &Value,
    forced: bool,
    timeout: bool,
    upper_latched: bool,
    lower_latched: bool,
) -> Decision {
    let change = config.on_change && candidate != stored;

    match candidate {
        Value::Bool(_) | Value::Raw(_) => Decision {
            fire: forced || timeout || change,
            upper: false,
            lower: false,
        },
        Value::Int32(_) | Value::Float32(_) => {
            let upper = above(config.upper_limit, candidate);
            let lower = below(config.lower_limit, candidate);
            let fire = forced
                || timeout
                || change
                || (upper && !upper_latched)
                || (lower && !lower_latched);

            Decision { fire, upper, lower }
        }
    }
}
