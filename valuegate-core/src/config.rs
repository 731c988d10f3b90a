//! Per-Channel Trigger Configuration
//!
//! ## Overview
//!
//! A channel's configuration selects which conditions make a candidate value
//! significant enough to transmit: change detection, a periodic timeout, and
//! upper/lower threshold crossings. The whole configuration is one structured
//! value with named optional fields - a single [`configure`] call replaces it
//! atomically, and there is no incremental flag parsing.
//!
//! [`configure`]: crate::registry::ChannelRegistry::configure
//!
//! ## Trigger semantics
//!
//! | Field          | Condition                                             |
//! |----------------|-------------------------------------------------------|
//! | `on_change`    | candidate differs from the stored value               |
//! | `timer_period` | at least that many seconds elapsed since the last fire|
//! | `upper_limit`  | candidate strictly above the limit (edge-triggered)   |
//! | `lower_limit`  | candidate strictly below the limit (edge-triggered)   |
//!
//! Threshold limits only apply to numeric channels; the schema policy rejects
//! them elsewhere. Timers are cooperative: the period is checked when a value
//! is offered, not from an asynchronous callback.

use crate::value::ValueKind;

/// Typed payload for a threshold limit
///
/// The limit's kind must match the channel's kind; the schema policy enforces
/// this at configuration time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Limit {
    /// Limit for an `Int32` channel
    Int(i32),
    /// Limit for a `Float32` channel
    Float(f32),
}

impl Limit {
    /// The channel kind this limit applies to
    pub const fn kind(&self) -> ValueKind {
        match self {
            Limit::Int(_) => ValueKind::Int32,
            Limit::Float(_) => ValueKind::Float32,
        }
    }
}

/// Complete trigger configuration for one channel
///
/// `Default` is the empty configuration: no condition ever fires (forced
/// sends still work). Replaced as a whole by `configure`; never partially
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerConfig {
    /// Fire when the candidate differs from the stored value
    pub on_change: bool,
    /// Fire when this many seconds elapsed since the last timer fire
    pub timer_period: Option<u16>,
    /// Fire on the transition below this limit (numeric channels only)
    pub lower_limit: Option<Limit>,
    /// Fire on the transition above this limit (numeric channels only)
    pub upper_limit: Option<Limit>,
}

impl TriggerConfig {
    /// The empty configuration - nothing triggers
    pub const fn none() -> Self {
        Self {
            on_change: false,
            timer_period: None,
            lower_limit: None,
            upper_limit: None,
        }
    }

    /// Enable change detection
    pub const fn on_change(mut self) -> Self {
        self.on_change = true;
        self
    }

    /// Enable the periodic timeout, in seconds
    pub const fn with_timer(mut self, period_s: u16) -> Self {
        self.timer_period = Some(period_s);
        self
    }

    /// Enable the upper threshold
    pub const fn with_upper(mut self, limit: Limit) -> Self {
        self.upper_limit = Some(limit);
        self
    }

    /// Enable the lower threshold
    pub const fn with_lower(mut self, limit: Limit) -> Self {
        self.lower_limit = Some(limit);
        self
    }

    /// Compact bit-set view of which triggers are enabled
    pub fn flags(&self) -> EventFlags {
        let mut flags = EventFlags::empty();
        if self.on_change {
            flags.set(EventFlags::CHANGE);
        }
        if self.timer_period.is_some() {
            flags.set(EventFlags::TIMER);
        }
        if self.upper_limit.is_some() {
            flags.set(EventFlags::UPPER);
        }
        if self.lower_limit.is_some() {
            flags.set(EventFlags::LOWER);
        }
        flags
    }
}

/// Bit flags naming the enabled trigger conditions
///
/// Derived from a [`TriggerConfig`]; used by policies and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFlags(u8);

impl EventFlags {
    /// Change detection enabled
    pub const CHANGE: Self = Self(1 << 0);
    /// Periodic timeout enabled
    pub const TIMER: Self = Self(1 << 1);
    /// Upper threshold enabled
    pub const UPPER: Self = Self(1 << 2);
    /// Lower threshold enabled
    pub const LOWER: Self = Self(1 << 3);

    /// No conditions
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set the given flag(s)
    pub fn set(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Whether all of the given flag(s) are set
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether no condition is enabled
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_no_flags() {
        assert!(TriggerConfig::none().flags().is_empty());
        assert!(TriggerConfig::default().flags().is_empty());
    }

    #[test]
    fn flags_follow_fields() {
        let cfg = TriggerConfig::none()
            .on_change()
            .with_timer(30)
            .with_upper(Limit::Int(100));

        let flags = cfg.flags();
        assert!(flags.contains(EventFlags::CHANGE));
        assert!(flags.contains(EventFlags::TIMER));
        assert!(flags.contains(EventFlags::UPPER));
        assert!(!flags.contains(EventFlags::LOWER));
    }

    #[test]
    fn limit_kinds() {
        assert_eq!(Limit::Int(5).kind(), ValueKind::Int32);
        assert_eq!(Limit::Float(1.5).kind(), ValueKind::Float32);
    }
}
