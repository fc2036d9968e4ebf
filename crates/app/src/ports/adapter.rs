//! Device adapter port: the asynchronous enumeration capability.
//!
//! The adapter owns enumeration semantics and filtering. Each query yields a
//! single `Result`, so success and failure can never both be reported for the
//! same call. Backends whose native API is a pair of callbacks bridge into
//! this shape with [`completion`](crate::completion::completion).

use std::future::Future;
use std::sync::Arc;

use blebridge_domain::device::Device;
use blebridge_domain::error::DomainError;

/// Asynchronous device enumeration.
///
/// The returned futures may complete on any worker thread.
pub trait DeviceAdapter: Send + Sync {
    /// Devices the adapter already knows about, restricted to `identifiers`.
    fn known_devices(
        &self,
        identifiers: Vec<String>,
    ) -> impl Future<Output = Result<Vec<Device>, DomainError>> + Send;

    /// Currently connected devices exposing any of `service_uuids`.
    fn connected_devices(
        &self,
        service_uuids: Vec<String>,
    ) -> impl Future<Output = Result<Vec<Device>, DomainError>> + Send;
}

impl<T: DeviceAdapter> DeviceAdapter for Arc<T> {
    fn known_devices(
        &self,
        identifiers: Vec<String>,
    ) -> impl Future<Output = Result<Vec<Device>, DomainError>> + Send {
        (**self).known_devices(identifiers)
    }

    fn connected_devices(
        &self,
        service_uuids: Vec<String>,
    ) -> impl Future<Output = Result<Vec<Device>, DomainError>> + Send {
        (**self).connected_devices(service_uuids)
    }
}
