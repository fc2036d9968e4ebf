//! Virtual backend configuration.

use serde::Deserialize;
use uuid::Uuid;

use blebridge_domain::device::Device;
use blebridge_domain::error::ValidationError;

/// Configuration for the simulated radio.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VirtualConfig {
    /// How long the radio thread waits before answering, in milliseconds.
    pub latency_ms: u64,
    /// Peripherals the radio knows about.
    pub devices: Vec<VirtualDeviceConfig>,
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self {
            latency_ms: 10,
            devices: Vec::new(),
        }
    }
}

impl VirtualConfig {
    /// Check that every configured peripheral is a valid device.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first invalid entry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.devices
            .iter()
            .try_for_each(|device| device.to_device().map(drop))
    }
}

/// One simulated peripheral.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct VirtualDeviceConfig {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub services: Vec<Uuid>,
}

impl VirtualDeviceConfig {
    pub(crate) fn to_device(&self) -> Result<Device, ValidationError> {
        Device::builder()
            .identifier(self.identifier.clone())
            .maybe_name(self.name.clone())
            .build()
    }
}

/// One entry of the host's bonded set.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PairedDeviceConfig {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl PairedDeviceConfig {
    /// Check that the entry describes a valid device.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for an empty address.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Device::builder()
            .identifier(self.address.clone())
            .maybe_name(self.name.clone())
            .build()
            .map(drop)
    }
}
