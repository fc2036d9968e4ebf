//! Paired device registry backed by configuration.

use blebridge_app::ports::{BondedDevice, PairedDeviceRegistry};
use blebridge_domain::error::DomainError;

use crate::config::PairedDeviceConfig;

/// Registry returning a fixed bonded set.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredPairedRegistry {
    bonded: Vec<BondedDevice>,
}

impl ConfiguredPairedRegistry {
    #[must_use]
    pub fn new(entries: &[PairedDeviceConfig]) -> Self {
        let bonded = entries
            .iter()
            .map(|entry| BondedDevice {
                address: entry.address.clone(),
                name: entry.name.clone(),
            })
            .collect();
        Self { bonded }
    }
}

impl PairedDeviceRegistry for ConfiguredPairedRegistry {
    fn bonded_devices(&self) -> Result<Vec<BondedDevice>, DomainError> {
        Ok(self.bonded.clone())
    }
}
