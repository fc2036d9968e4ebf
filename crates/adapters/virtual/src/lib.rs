//! # blebridge-adapter-virtual
//!
//! Simulated backend for running the bridge without a radio.
//!
//! - [`VirtualAdapter`] answers device queries from a configured table. Each
//!   answer arrives on a dedicated "radio" thread after `latency_ms`.
//! - [`ConfiguredPairedRegistry`] returns a configured bonded set. It is also
//!   the registry used with the btleplug backend, which has no bonded API.
//!
//! ## Dependency rule
//!
//! Depends on `blebridge-app` (port traits) and `blebridge-domain` only.

mod config;
mod paired;
mod radio;

pub use config::{PairedDeviceConfig, VirtualConfig, VirtualDeviceConfig};
pub use paired::ConfiguredPairedRegistry;
pub use radio::VirtualAdapter;
