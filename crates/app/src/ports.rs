//! Ports: the traits a backend or transport implements to plug into the
//! router.
//!
//! `DeviceAdapter` and `PairedDeviceRegistry` are the queries the handlers
//! issue. `ResultChannel` is where an outcome lands and `Executor` decides
//! which thread it lands on.

pub mod adapter;
pub mod channel;
pub mod executor;
pub mod registry;

pub use adapter::DeviceAdapter;
pub use channel::ResultChannel;
pub use executor::{Executor, Task};
pub use registry::{BondedDevice, PairedDeviceRegistry};
