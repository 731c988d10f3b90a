//! Channel Schema and the External Validator Seam
//!
//! A schema describes what a channel *is*: a semantic type identifier, a
//! measurement unit, the value kind, and a short name. It is validated once
//! at registration and immutable afterwards.
//!
//! Schema and configuration validation belong to an external library in the
//! full device stack - the proxy consumes it through the [`SchemaPolicy`]
//! trait and treats rejection as a hard failure. [`BasicPolicy`] implements
//! the structural rules the proxy itself depends on and serves as the
//! default for hosts without a richer registry.

use crate::config::TriggerConfig;
use crate::value::ValueKind;

/// Maximum channel name length in bytes
///
/// Longer names are silently truncated at registration.
pub const MAX_NAME_LEN: usize = 32;

/// Inline channel name
///
/// Fixed-capacity and heap-free; construction truncates at the last whole
/// character that fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelName(heapless::String<MAX_NAME_LEN>);

impl ChannelName {
    /// Create from a string slice, silently truncating to capacity
    pub fn new(name: &str) -> Self {
        let mut out = heapless::String::new();
        for ch in name.chars() {
            if out.push(ch).is_err() {
                break;
            }
        }
        Self(out)
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable channel descriptor
///
/// Fixed at registration after the schema policy accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Semantic type identifier (what the value means: temperature, switch, ...)
    pub type_id: u16,
    /// Measurement unit code
    pub unit: u8,
    /// The value kind every read and write is checked against
    pub kind: ValueKind,
    /// Short human-readable name
    pub name: ChannelName,
}

impl Schema {
    /// Build a descriptor; the name truncates silently at [`MAX_NAME_LEN`]
    pub fn new(name: &str, type_id: u16, kind: ValueKind, unit: u8) -> Self {
        Self {
            type_id,
            unit,
            kind,
            name: ChannelName::new(name),
        }
    }

    /// The channel name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// The external schema/configuration validator
///
/// In the device stack this is backed by the protocol's schema library; the
/// proxy only cares about accept/reject.
pub trait SchemaPolicy {
    /// Whether `(type_id, kind, unit)` form an acceptable schema
    fn schema_is_valid(&self, type_id: u16, kind: ValueKind, unit: u8) -> bool;

    /// Whether a trigger configuration is acceptable for a channel kind
    fn config_is_valid(&self, kind: ValueKind, config: &TriggerConfig) -> bool;
}

/// Permissive default policy
///
/// Accepts every schema and enforces only the structural configuration
/// rules the engine depends on: threshold limits are numeric-only and must
/// match the channel kind, and a configured timer period must be nonzero.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPolicy;

impl SchemaPolicy for BasicPolicy {
    fn schema_is_valid(&self, _type_id: u16, _kind: ValueKind, _unit: u8) -> bool {
        true
    }

    fn config_is_valid(&self, kind: ValueKind, config: &TriggerConfig) -> bool {
        if config.timer_period == Some(0) {
            return false;
        }

        for limit in [config.lower_limit, config.upper_limit].into_iter().flatten() {
            if !kind.is_numeric() || limit.kind() != kind {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limit;

    #[test]
    fn name_truncates_silently() {
        let name = ChannelName::new("a-very-long-channel-name-that-does-not-fit");
        assert_eq!(name.as_str().len(), MAX_NAME_LEN);
        assert_eq!(name.as_str(), "a-very-long-channel-name-that-do");
    }

    #[test]
    fn name_keeps_short_input() {
        let name = ChannelName::new("thermo");
        assert_eq!(name.as_str(), "thermo");
        assert!(!name.is_empty());
    }

    #[test]
    fn basic_policy_rejects_zero_timer() {
        let cfg = TriggerConfig::none().with_timer(0);
        assert!(!BasicPolicy.config_is_valid(ValueKind::Int32, &cfg));
    }

    #[test]
    fn basic_policy_rejects_threshold_on_bool() {
        let cfg = TriggerConfig::none().with_upper(Limit::Int(1));
        assert!(!BasicPolicy.config_is_valid(ValueKind::Bool, &cfg));
    }

    #[test]
    fn basic_policy_rejects_mismatched_limit_kind() {
        let cfg = TriggerConfig::none().with_lower(Limit::Float(0.5));
        assert!(!BasicPolicy.config_is_valid(ValueKind::Int32, &cfg));
    }

    #[test]
    fn basic_policy_accepts_matching_limits() {
        let cfg = TriggerConfig::none()
            .on_change()
            .with_timer(5)
            .with_upper(Limit::Float(90.0))
            .with_lower(Limit::Float(10.0));
        assert!(BasicPolicy.config_is_valid(ValueKind::Float32, &cfg));
    }
}
