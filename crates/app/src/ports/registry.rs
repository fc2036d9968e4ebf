//! Paired device registry port: synchronous read of the host's bonded set.

use std::sync::Arc;

use blebridge_domain::device::Device;
use blebridge_domain::error::{DomainError, ErrorCode};

/// A bonded device as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondedDevice {
    pub address: String,
    pub name: Option<String>,
}

impl BondedDevice {
    /// Convert into a [`Device`], using the address as identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] with [`ErrorCode::INVALID_IDENTIFIERS`] when
    /// the host reports an empty address.
    pub fn into_device(self) -> Result<Device, DomainError> {
        Device::builder()
            .identifier(self.address)
            .maybe_name(self.name)
            .build()
            .map_err(|err| DomainError::new(ErrorCode::INVALID_IDENTIFIERS, err.to_string()))
    }
}

/// Host registry of already-paired devices.
///
/// Reading it requires no radio activity and never blocks on the network.
pub trait PairedDeviceRegistry: Send + Sync {
    /// Every bonded device, each reported once.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when the host cannot produce the set (radio
    /// off, permission missing, …).
    fn bonded_devices(&self) -> Result<Vec<BondedDevice>, DomainError>;
}

impl<T: PairedDeviceRegistry> PairedDeviceRegistry for Arc<T> {
    fn bonded_devices(&self) -> Result<Vec<BondedDevice>, DomainError> {
        (**self).bonded_devices()
    }
}
