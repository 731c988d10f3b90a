//! Error Types for Registry and Engine Failures
//!
//! ## Design Philosophy
//!
//! ValueGate's error system follows the constraints of its embedded targets:
//!
//! 1. **Small Size**: Each variant carries at most a few bytes of inline
//!    context, since errors are returned on hot paths.
//!
//! 2. **No Heap Allocation**: All error data is inline - no String, no
//!    boxed sources. Memory usage is deterministic.
//!
//! 3. **Copy Semantics**: Errors implement Copy so they can be returned and
//!    stored without move-semantics friction.
//!
//! 4. **Never Fatal**: Every error is reported to the caller and leaves
//!    prior channel state untouched. The proxy never aborts on bad input.
//!
//! ## Error Categories
//!
//! ### Registration failures
//! - `DuplicateId`: the slot is already occupied
//! - `CapacityExceeded`: the identifier is beyond the registry's capacity
//! - `InvalidSchema`: the schema policy rejected the descriptor
//!
//! ### Configuration failures
//! - `InvalidConfig`: the schema policy rejected the trigger configuration
//!
//! ### Runtime failures
//! - `UnknownChannel`: no channel registered under the identifier
//! - `TypeMismatch`: a value's kind does not match the channel's schema
//!
//! Note that raw-payload truncation is *not* an error: oversized payloads
//! clamp silently to the buffer capacity, which is defined behavior.

use thiserror_no_std::Error;

use crate::channel::ChannelId;
use crate::value::ValueKind;

/// Result type for registry and engine operations
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Proxy errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyError {
    /// A channel already occupies the requested identifier
    #[error("channel {id} already registered")]
    DuplicateId {
        /// The contested identifier
        id: ChannelId,
    },

    /// The identifier is outside the registry's slot range
    #[error("channel {id} out of range (capacity {capacity})")]
    CapacityExceeded {
        /// The rejected identifier
        id: ChannelId,
        /// Number of slots in the registry
        capacity: usize,
    },

    /// The schema policy rejected the descriptor (or the name was empty)
    #[error("schema rejected for channel {id}")]
    InvalidSchema {
        /// The channel being registered
        id: ChannelId,
    },

    /// The schema policy rejected the trigger configuration
    #[error("configuration rejected for channel {id}")]
    InvalidConfig {
        /// The channel being configured
        id: ChannelId,
    },

    /// No channel is registered under the identifier
    #[error("channel {id} not registered")]
    UnknownChannel {
        /// The unknown identifier
        id: ChannelId,
    },

    /// A value's kind does not match the channel's registered kind
    #[error("value kind {got:?} does not match channel kind {expected:?}")]
    TypeMismatch {
        /// The kind fixed at registration
        expected: ValueKind,
        /// The kind of the offending value
        got: ValueKind,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ProxyError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::DuplicateId { id } =>
                defmt::write!(fmt, "channel {} already registered", id),
            Self::CapacityExceeded { id, capacity } =>
                defmt::write!(fmt, "channel {} out of range (capacity {})", id, capacity),
            Self::InvalidSchema { id } =>
                defmt::write!(fmt, "schema rejected for channel {}", id),
            Self::InvalidConfig { id } =>
                defmt::write!(fmt, "configuration rejected for channel {}", id),
            Self::UnknownChannel { id } =>
                defmt::write!(fmt, "channel {} not registered", id),
            Self::TypeMismatch { expected, got } =>
                defmt::write!(fmt, "value kind {} does not match channel kind {}",
                              got.name(), expected.name()),
        }
    }
}
