//! Core value proxy for ValueGate
//!
//! Sits between application sensor/actuator code and the transport layer,
//! deciding per logical channel whether a fresh value is significant enough
//! to send or deliver: change detection, periodic timeout, edge-triggered
//! threshold crossings, or an unconditional forced push.
//!
//! Key constraints:
//! - Fixed-capacity everything, no heap in the data path
//! - Synchronous, bounded-time operations from one scheduling context
//! - Rejected inputs never disturb prior channel state
//!
//! ```
//! use valuegate_core::{
//!     config::TriggerConfig,
//!     registry::ChannelRegistry,
//!     schema::{BasicPolicy, Schema},
//!     time::ManualClock,
//!     value::ValueKind,
//! };
//!
//! let clock = ManualClock::new(0);
//! let mut registry: ChannelRegistry<8> =
//!     ChannelRegistry::new(Box::new(BasicPolicy), Box::new(clock.clone()));
//!
//! registry.register(
//!     0,
//!     Schema::new("thermo", 1, ValueKind::Int32, 0),
//!     None,
//!     Some(Box::new(|chan| {
//!         chan.set_i32(22); // fresh local reading
//!     })),
//! ).unwrap();
//!
//! registry.configure(0, TriggerConfig::none().on_change()).unwrap();
//!
//! // First reading is a change; the identical second one is not
//! assert_eq!(registry.observe(0, false).unwrap(), Some(4));
//! assert_eq!(registry.observe(0, false).unwrap(), None);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod channel;
pub mod config;
pub mod errors;
pub mod registry;
pub mod schema;
pub mod time;
pub mod value;

mod trigger;

// Public API
pub use channel::{Channel, ChannelCallback, ChannelHandle, ChannelId};
pub use config::{EventFlags, Limit, TriggerConfig};
pub use errors::{ProxyError, ProxyResult};
pub use registry::ChannelRegistry;
pub use schema::{BasicPolicy, Schema, SchemaPolicy};
pub use value::{RawValue, Value, ValueKind, MAX_RAW_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
