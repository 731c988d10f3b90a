//! Channel State and the Owner-Facing Handle
//!
//! ## Overview
//!
//! A [`Channel`] is one logical sensor/actuator property: its immutable
//! schema, its current value, its trigger configuration, and the transient
//! send state the transport drains. Channels never touch hardware - the
//! owning application injects behavior through two callbacks, each invoked
//! with a [`ChannelHandle`]:
//!
//! - the *poll* callback produces a fresh local reading and offers it
//!   through [`ChannelHandle::set`], where the engine decides significance;
//! - the *delivered* callback reacts to a remotely written value (actuate
//!   hardware, and optionally produce a reply through the same `set` path).
//!
//! ## Send state
//!
//! ```text
//!            set() fires / mark_pending
//!   Idle ──────────────────────────────► Pending
//!     ▲                                     │
//!     └─────────────────────────────────────┘
//!        drained + clear_pending (ack)
//! ```
//!
//! `pending_send` doubles as the forced-send input to the next evaluation:
//! a marked or still-unacknowledged channel fires on any offered value. On a
//! trigger the flag takes the caller's wait-for-acknowledgement mode, so a
//! fire-once observation reports its value through the call's result and
//! returns to `Idle`, while an acknowledged exchange holds `Pending` until
//! [`clear_pending`] runs.
//!
//! [`clear_pending`]: crate::registry::ChannelRegistry::clear_pending

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use crate::config::TriggerConfig;
use crate::schema::Schema;
use crate::time::Timestamp;
use crate::trigger;
use crate::value::{RawValue, Value, ValueKind};

/// Channel identifier; unique and immutable once assigned
pub type ChannelId = u8;

/// Owner-supplied callback, invoked with the channel's handle
pub type ChannelCallback = Box<dyn FnMut(&mut ChannelHandle<'_>)>;

/// One registered channel: schema, current value, and send state
pub struct Channel {
    id: ChannelId,
    schema: Schema,
    config: TriggerConfig,
    value: Value,
    /// Wire length of the value produced by the last fired `set`
    out_len: u8,
    pending_send: bool,
    await_response: bool,
    upper_crossed: bool,
    lower_crossed: bool,
    last_timer_tick: Timestamp,
}

impl Channel {
    pub(crate) fn new(id: ChannelId, schema: Schema) -> Self {
        let value = Value::zero_of(schema.kind);
        Self {
            id,
            schema,
            config: TriggerConfig::none(),
            value,
            out_len: 0,
            pending_send: false,
            await_response: false,
            upper_crossed: false,
            lower_crossed: false,
            last_timer_tick: 0,
        }
    }

    /// The channel's identifier
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// The immutable schema descriptor
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The value kind fixed at registration
    pub fn kind(&self) -> ValueKind {
        self.schema.kind
    }

    /// The channel name
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// The active trigger configuration
    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// The last stored value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether a value is waiting to be drained by the transport
    pub fn is_pending(&self) -> bool {
        self.pending_send
    }

    /// Whether the pending value is held until an explicit acknowledgement
    pub fn awaiting_response(&self) -> bool {
        self.await_response
    }

    /// Whether the last observed value sits beyond the upper limit
    pub fn upper_crossed(&self) -> bool {
        self.upper_crossed
    }

    /// Whether the last observed value sits beyond the lower limit
    pub fn lower_crossed(&self) -> bool {
        self.lower_crossed
    }

    /// Wire length of the most recently produced transmit value
    pub fn out_len(&self) -> u8 {
        self.out_len
    }

    /// When the cooperative timer last fired (or zero before the first fire)
    pub fn last_timer_tick(&self) -> Timestamp {
        self.last_timer_tick
    }

    pub(crate) fn set_config(&mut self, config: TriggerConfig) {
        self.config = config;
    }

    pub(crate) fn force_pending(&mut self) {
        self.pending_send = true;
    }

    pub(crate) fn confirm_sent(&mut self) {
        self.pending_send = false;
        self.await_response = false;
    }

    pub(crate) fn reset_out(&mut self) {
        self.out_len = 0;
    }

    /// Store a value directly, bypassing trigger evaluation
    ///
    /// The caller has already checked the kind; raw payloads arrive clamped
    /// by construction.
    pub(crate) fn store(&mut self, value: Value) {
        self.value = value;
    }

    /// The core decision function: offer a candidate value to the engine
    ///
    /// Returns whether the trigger fired. Kind mismatches return `false`
    /// with no mutation. The threshold latches update on every numeric call,
    /// independent of the outcome.
    pub(crate) fn offer(
        &mut self,
        candidate: Value,
        now: Timestamp,
        wait_response: bool,
    ) -> bool {
        if candidate.kind() != self.schema.kind {
            return false;
        }

        let timeout = trigger::timer_due(&self.config, self.last_timer_tick, now);
        if timeout {
            self.last_timer_tick = now;
        }

        let decision = trigger::evaluate(
            &self.config,
            &self.value,
            &candidate,
            self.pending_send,
            timeout,
            self.upper_crossed,
            self.lower_crossed,
        );

        if decision.fire {
            self.out_len = candidate.wire_len();
            self.value = candidate;
            self.pending_send = wait_response;
            self.await_response = wait_response;
        }

        if self.schema.kind.is_numeric() {
            self.upper_crossed = decision.upper;
            self.lower_crossed = decision.lower;
        }

        decision.fire
    }
}

/// Borrowed channel view handed to owner callbacks
///
/// Carries the invocation's timestamp and wait-for-acknowledgement mode, so
/// the cooperative timer and the pending-send contract work without the
/// callback knowing about either.
pub struct ChannelHandle<'a> {
    channel: &'a mut Channel,
    now: Timestamp,
    wait_response: bool,
}

impl<'a> ChannelHandle<'a> {
    pub(crate) fn new(channel: &'a mut Channel, now: Timestamp, wait_response: bool) -> Self {
        Self {
            channel,
            now,
            wait_response,
        }
    }

    /// The channel's identifier
    pub fn id(&self) -> ChannelId {
        self.channel.id()
    }

    /// The value kind fixed at registration
    pub fn kind(&self) -> ValueKind {
        self.channel.kind()
    }

    /// The channel name
    pub fn name(&self) -> &str {
        self.channel.name()
    }

    /// The last stored value
    pub fn value(&self) -> &Value {
        self.channel.value()
    }

    /// Offer a candidate value; returns whether the trigger fired
    ///
    /// On a fire the candidate replaces the stored value and the channel's
    /// transmit length is updated. A kind mismatch returns `false` and
    /// mutates nothing.
    pub fn set(&mut self, candidate: Value) -> bool {
        self.channel.offer(candidate, self.now, self.wait_response)
    }

    /// Offer a bool candidate
    pub fn set_bool(&mut self, value: bool) -> bool {
        self.set(Value::Bool(value))
    }

    /// Offer an i32 candidate
    pub fn set_i32(&mut self, value: i32) -> bool {
        self.set(Value::Int32(value))
    }

    /// Offer an f32 candidate
    pub fn set_f32(&mut self, value: f32) -> bool {
        self.set(Value::Float32(value))
    }

    /// Offer a raw candidate; oversized payloads clamp silently
    pub fn set_raw(&mut self, bytes: &[u8]) -> bool {
        self.set(Value::Raw(RawValue::from_slice(bytes)))
    }
}
