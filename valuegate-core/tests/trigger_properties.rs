//! Property tests for the engine's numeric-edge and clamping behavior

mod common;

use proptest::prelude::*;

use valuegate_core::{
    config::{Limit, TriggerConfig},
    value::{RawValue, Value, ValueKind, MAX_RAW_LEN},
};

use common::{poll_from, registry, schema, Shared};

proptest! {
    /// Stored raw length is always `min(input, capacity)` with prefix-equal bytes
    #[test]
    fn raw_length_is_bounded_by_capacity(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let raw = RawValue::from_slice(&data);
        let expected = data.len().min(MAX_RAW_LEN);

        prop_assert_eq!(raw.len(), expected);
        prop_assert_eq!(raw.as_bytes(), &data[..expected]);
    }

    /// After any sample sequence the upper latch equals "last sample beyond
    /// the limit", and the lower latch never engages without a lower limit
    #[test]
    fn upper_latch_tracks_last_sample(samples in proptest::collection::vec(-200..200_i32, 1..32)) {
        let (mut reg, _clock) = registry::<2>();
        let source = Shared::new(Value::Int32(0));

        reg.register(0, schema("probe", ValueKind::Int32), None, poll_from(&source)).unwrap();
        reg.configure(0, TriggerConfig::none().with_upper(Limit::Int(100))).unwrap();

        for &value in &samples {
            source.set(Value::Int32(value));
            reg.observe(0, false).unwrap();
        }

        let chan = reg.channel(0).unwrap();
        prop_assert_eq!(chan.upper_crossed(), *samples.last().unwrap() > 100);
        prop_assert!(!chan.lower_crossed());
    }

    /// The engine fires exactly on fresh crossings: a one-latch reference
    /// model over the same sequence predicts every trigger
    #[test]
    fn threshold_fires_match_reference_model(samples in proptest::collection::vec(-200..200_i32, 1..32)) {
        let (mut reg, _clock) = registry::<2>();
        let source = Shared::new(Value::Int32(0));

        reg.register(0, schema("probe", ValueKind::Int32), None, poll_from(&source)).unwrap();
        reg.configure(0, TriggerConfig::none().with_upper(Limit::Int(100))).unwrap();

        let mut latched = false;
        for &value in &samples {
            source.set(Value::Int32(value));
            let fired = reg.observe(0, false).unwrap().is_some();

            let beyond = value > 100;
            prop_assert_eq!(fired, beyond && !latched);
            latched = beyond;
        }
    }

    /// Offering the same value twice with change detection never fires twice
    #[test]
    fn change_detection_is_idempotent(value in any::<i32>()) {
        let (mut reg, _clock) = registry::<2>();
        let source = Shared::new(Value::Int32(value));

        reg.register(0, schema("probe", ValueKind::Int32), None, poll_from(&source)).unwrap();
        reg.configure(0, TriggerConfig::none().on_change()).unwrap();

        // May or may not fire depending on whether `value` is the zero value
        reg.observe(0, false).unwrap();
        prop_assert_eq!(reg.observe(0, false).unwrap(), None);
    }
}
