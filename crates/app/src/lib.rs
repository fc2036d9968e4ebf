//! # blebridge-app
//!
//! Application layer: command routing, result resolution, and **port
//! definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceAdapter`: asynchronous known/connected device queries
//!   - `PairedDeviceRegistry`: synchronous read of the host's bonded devices
//!   - `ResultChannel`: the outbound success/error/not-implemented slot
//!   - `Executor`: the execution context replies are delivered on
//! - Guarantee that every pending call resolves **exactly once** (`resolver`)
//! - Translate devices and domain errors into transport values (`serializer`)
//! - Parse requested service UUIDs the same way for every adapter
//!   (`service_uuid`)
//! - Parse inbound method calls into typed commands and route them (`command`,
//!   `router`, `handlers`)
//! - Provide **in-process infrastructure** that doesn't need IO (executors and
//!   the callback-to-future `completion` bridge)
//!
//! ## Dependency rule
//! Depends on `blebridge-domain` only (plus `tokio` for channels and task
//! spawning, and `uuid` for service UUIDs). Never imports adapter crates. Adapters depend on *this* crate,
//! not the reverse.

pub mod command;
pub mod completion;
pub mod executor;
pub mod handlers;
pub mod ports;
pub mod resolver;
pub mod router;
pub mod serializer;
pub mod service_uuid;
