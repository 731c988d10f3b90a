//! Channel Registry & Value Store
//!
//! ## Overview
//!
//! A fixed-capacity arena of channels indexed by identifier, owning the
//! schema policy and the time source. This is the single entry point the
//! three collaborators share:
//!
//! ```text
//! owning app ──register/configure──► ┌──────────────┐
//! poll driver ──observe────────────► │   Registry   │ ──poll/delivered──► callbacks
//! transport ──deliver/read/clear──►  └──────────────┘
//! ```
//!
//! The polling driver invokes [`observe`] per channel on its own schedule;
//! the engine decides significance and flags pending values. The transport
//! sweeps `0..=highest_registered_id()`, reads pending channels, transmits,
//! and acknowledges with [`clear_pending`]; inbound values arrive through
//! [`deliver`].
//!
//! ## Capacity
//!
//! The slot count is a const parameter, fixed at build time like every other
//! buffer in the crate. Identifiers double as slot indices; occupancy is an
//! explicit `Option`, so the full identifier range stays usable.
//!
//! ## Concurrency
//!
//! One scheduling context: every operation takes `&mut self`, is synchronous
//! and bounded-time, and never blocks. Hosts that dispatch from multiple
//! contexts (ISR + main loop) wrap the registry in their platform's mutex.
//!
//! [`observe`]: ChannelRegistry::observe
//! [`deliver`]: ChannelRegistry::deliver
//! [`clear_pending`]: ChannelRegistry::clear_pending

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use crate::channel::{Channel, ChannelCallback, ChannelHandle, ChannelId};
use crate::config::TriggerConfig;
use crate::errors::{ProxyError, ProxyResult};
use crate::schema::{Schema, SchemaPolicy};
use crate::time::TimeSource;
use crate::value::Value;

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// One occupied registry slot: the channel plus its injected behavior
struct Slot {
    channel: Channel,
    poll: Option<ChannelCallback>,
    delivered: Option<ChannelCallback>,
}

/// Fixed-capacity channel registry
///
/// `N` is the number of slots; identifiers `0..N` are valid. All state lives
/// inline except the boxed policy, clock, and callbacks.
pub struct ChannelRegistry<const N: usize> {
    slots: [Option<Slot>; N],
    policy: Box<dyn SchemaPolicy>,
    clock: Box<dyn TimeSource>,
}

impl<const N: usize> ChannelRegistry<N> {
    /// Create an empty registry with the given policy and time source
    pub fn new(policy: Box<dyn SchemaPolicy>, clock: Box<dyn TimeSource>) -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            policy,
            clock,
        }
    }

    /// Create an empty registry driven by the system clock
    #[cfg(feature = "std")]
    pub fn with_system_clock(policy: Box<dyn SchemaPolicy>) -> Self {
        Self::new(policy, Box::new(crate::time::SystemClock))
    }

    /// Register a channel under `id`
    ///
    /// `delivered` reacts to remotely written values; `poll` produces local
    /// readings on [`observe`]. Either may be absent for one-directional
    /// channels. Fails with [`ProxyError::CapacityExceeded`] when `id` is
    /// out of range, [`ProxyError::DuplicateId`] when the slot is occupied,
    /// and [`ProxyError::InvalidSchema`] when the name is empty or the
    /// policy rejects the descriptor. On success the channel starts with the
    /// kind's zero value, no triggers, and all transient flags clear.
    ///
    /// [`observe`]: Self::observe
    pub fn register(
        &mut self,
        id: ChannelId,
        schema: Schema,
        delivered: Option<ChannelCallback>,
        poll: Option<ChannelCallback>,
    ) -> ProxyResult<ChannelId> {
        if usize::from(id) >= N {
            log_warn!("register for id {} failed: beyond capacity {}", id, N);
            return Err(ProxyError::CapacityExceeded { id, capacity: N });
        }

        if self.slots[usize::from(id)].is_some() {
            log_warn!("register for id {} failed: already registered", id);
            return Err(ProxyError::DuplicateId { id });
        }

        if schema.name.is_empty()
            || !self.policy.schema_is_valid(schema.type_id, schema.kind, schema.unit)
        {
            log_warn!("register for id {} failed: invalid schema", id);
            return Err(ProxyError::InvalidSchema { id });
        }

        self.slots[usize::from(id)] = Some(Slot {
            channel: Channel::new(id, schema),
            poll,
            delivered,
        });

        Ok(id)
    }

    /// Replace a channel's trigger configuration
    ///
    /// Atomic: on rejection by the policy nothing changes. Calling again
    /// fully replaces the prior flags and limits.
    pub fn configure(&mut self, id: ChannelId, config: TriggerConfig) -> ProxyResult<()> {
        let slot = self
            .slots
            .get_mut(usize::from(id))
            .and_then(Option::as_mut)
            .ok_or(ProxyError::UnknownChannel { id })?;

        if !self.policy.config_is_valid(slot.channel.kind(), &config) {
            log_warn!("configure for id {} failed: invalid config", id);
            return Err(ProxyError::InvalidConfig { id });
        }

        slot.channel.set_config(config);
        Ok(())
    }

    /// Look up a channel by identifier
    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.slots.get(usize::from(id)).and_then(Option::as_ref).map(|s| &s.channel)
    }

    /// Poll a channel for a fresh local reading
    ///
    /// Invokes the channel's poll callback, which offers candidate values
    /// through [`ChannelHandle::set`]; the engine evaluates the trigger
    /// policy there. `wait_response` selects the pending-send mode a fired
    /// value takes: `true` holds the value pending until [`clear_pending`],
    /// `false` fires once.
    ///
    /// Returns the transmit length of the freshly produced value, or `None`
    /// when nothing fired (or no poll callback is registered).
    ///
    /// [`clear_pending`]: Self::clear_pending
    pub fn observe(&mut self, id: ChannelId, wait_response: bool) -> ProxyResult<Option<u8>> {
        let now = self.clock.now();
        let slot = self.slot_mut(id)?;

        let Some(poll) = slot.poll.as_mut() else {
            return Ok(None);
        };

        slot.channel.reset_out();
        let mut handle = ChannelHandle::new(&mut slot.channel, now, wait_response);
        poll(&mut handle);

        let len = slot.channel.out_len();
        Ok((len > 0).then_some(len))
    }

    /// Deliver a remotely produced value to a channel
    ///
    /// Stores the value and hands it to the channel's delivered callback,
    /// which may produce a reply through the same `set` pathway; the reply's
    /// transmit length is returned (zero when none). A channel without a
    /// delivered callback ignores the delivery silently and stores nothing.
    /// Rejects kind mismatches with [`ProxyError::TypeMismatch`], leaving
    /// prior state untouched.
    pub fn deliver(&mut self, id: ChannelId, value: Value) -> ProxyResult<u8> {
        let now = self.clock.now();
        let slot = self.slot_mut(id)?;

        let Some(delivered) = slot.delivered.as_mut() else {
            return Ok(0);
        };

        let expected = slot.channel.kind();
        if value.kind() != expected {
            return Err(ProxyError::TypeMismatch {
                expected,
                got: value.kind(),
            });
        }

        slot.channel.store(value);
        slot.channel.reset_out();

        let mut handle = ChannelHandle::new(&mut slot.channel, now, false);
        delivered(&mut handle);

        Ok(slot.channel.out_len())
    }

    /// Read the last stored value and its transmit length
    ///
    /// Fixed-size kinds report their byte width; raw values report the
    /// stored length.
    pub fn read_value(&self, id: ChannelId) -> ProxyResult<(&Value, u8)> {
        let channel = self.channel(id).ok_or(ProxyError::UnknownChannel { id })?;
        let value = channel.value();
        Ok((value, value.wire_len()))
    }

    /// Store a value directly, bypassing trigger evaluation
    ///
    /// Type-checked against the schema; raw payloads clamp silently.
    /// Pending state, latches, and timers are untouched.
    pub fn write_value(&mut self, id: ChannelId, value: Value) -> ProxyResult<()> {
        let slot = self.slot_mut(id)?;

        let expected = slot.channel.kind();
        if value.kind() != expected {
            return Err(ProxyError::TypeMismatch {
                expected,
                got: value.kind(),
            });
        }

        slot.channel.store(value);
        Ok(())
    }

    /// Force the channel's pending-send flag
    ///
    /// The next offered value fires regardless of the trigger conditions,
    /// and the channel shows up in pending sweeps until drained.
    pub fn mark_pending(&mut self, id: ChannelId) -> ProxyResult<()> {
        self.slot_mut(id)?.channel.force_pending();
        Ok(())
    }

    /// Acknowledge that a pending value has been transmitted
    ///
    /// Clears both `pending_send` and `await_response`.
    pub fn clear_pending(&mut self, id: ChannelId) -> ProxyResult<()> {
        self.slot_mut(id)?.channel.confirm_sent();
        Ok(())
    }

    /// Whether a value is waiting to be drained
    pub fn is_pending(&self, id: ChannelId) -> bool {
        self.channel(id).is_some_and(Channel::is_pending)
    }

    /// Whether the pending value is held until an explicit acknowledgement
    pub fn awaiting_response(&self, id: ChannelId) -> bool {
        self.channel(id).is_some_and(Channel::awaiting_response)
    }

    /// The highest identifier currently registered
    ///
    /// The transport uses this as its sweep bound.
    pub fn highest_registered_id(&self) -> Option<ChannelId> {
        self.slots
            .iter()
            .rposition(Option::is_some)
            .map(|idx| idx as ChannelId)
    }

    /// Iterate over registered channels in identifier order
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.slots.iter().flatten().map(|s| &s.channel)
    }

    /// Number of registered channels
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether no channel is registered
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Total slot count
    pub const fn capacity(&self) -> usize {
        N
    }

    fn slot_mut(&mut self, id: ChannelId) -> ProxyResult<&mut Slot> {
        self.slots
            .get_mut(usize::from(id))
            .and_then(Option::as_mut)
            .ok_or(ProxyError::UnknownChannel { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BasicPolicy;
    use crate::time::ManualClock;
    use crate::value::ValueKind;

    fn registry() -> ChannelRegistry<4> {
        ChannelRegistry::new(Box::new(BasicPolicy), Box::new(ManualClock::new(0)))
    }

    fn schema(kind: ValueKind) -> Schema {
        Schema::new("test", 1, kind, 0)
    }

    #[test]
    fn register_rejects_out_of_range_id() {
        let mut reg = registry();
        let err = reg.register(4, schema(ValueKind::Bool), None, None).unwrap_err();
        assert_eq!(err, ProxyError::CapacityExceeded { id: 4, capacity: 4 });
    }

    #[test]
    fn register_rejects_empty_name() {
        let mut reg = registry();
        let err = reg
            .register(0, Schema::new("", 1, ValueKind::Bool, 0), None, None)
            .unwrap_err();
        assert_eq!(err, ProxyError::InvalidSchema { id: 0 });
        assert!(reg.is_empty());
    }

    #[test]
    fn observe_without_poll_callback_is_none() {
        let mut reg = registry();
        reg.register(0, schema(ValueKind::Bool), None, None).unwrap();
        assert_eq!(reg.observe(0, false).unwrap(), None);
    }

    #[test]
    fn unknown_channel_operations_fail() {
        let mut reg = registry();
        assert_eq!(reg.observe(1, false), Err(ProxyError::UnknownChannel { id: 1 }));
        assert_eq!(reg.clear_pending(1), Err(ProxyError::UnknownChannel { id: 1 }));
        assert!(!reg.is_pending(1));
        assert!(reg.read_value(1).is_err());
    }

    #[test]
    fn highest_registered_id_tracks_occupancy() {
        let mut reg = registry();
        assert_eq!(reg.highest_registered_id(), None);

        reg.register(2, schema(ValueKind::Bool), None, None).unwrap();
        reg.register(0, schema(ValueKind::Int32), None, None).unwrap();
        assert_eq!(reg.highest_registered_id(), Some(2));
        assert_eq!(reg.len(), 2);
    }
}
