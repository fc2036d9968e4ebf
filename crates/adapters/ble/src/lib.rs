//! # blebridge-adapter-btleplug
//!
//! [`DeviceAdapter`] backed by the host BLE stack through `btleplug`.
//!
//! ## How it works
//!
//! Every query opens the platform manager, picks the adapter at
//! `adapter_index` and, if a discovery window is configured, scans for that
//! long so recently advertising peripherals are known. It then snapshots the
//! peripherals the stack knows about and filters them:
//!
//! | Query | Selected peripherals |
//! |-------|----------------------|
//! | known | address equals a requested identifier (ASCII case-insensitive) |
//! | connected | connected and exposing at least one requested service |
//!
//! Empty filter lists select nothing and never touch the radio.
//!
//! ## Dependency rule
//!
//! Depends on `blebridge-app` and `blebridge-domain` only.

mod config;
mod error;
mod filter;

pub use config::BtleplugConfig;
pub use error::BtleplugError;

use std::time::Duration;

use btleplug::api::{BDAddr, Central as _, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, Peripheral};

use blebridge_app::ports::DeviceAdapter;
use blebridge_app::service_uuid::parse_service_uuids;
use blebridge_domain::device::Device;
use blebridge_domain::error::DomainError;

use crate::filter::PeripheralSnapshot;

/// Device adapter querying the host BLE stack.
#[derive(Debug, Clone, Default)]
pub struct BtleplugAdapter {
    config: BtleplugConfig,
}

impl BtleplugAdapter {
    /// Create an adapter with the given configuration.
    #[must_use]
    pub fn new(config: BtleplugConfig) -> Self {
        Self { config }
    }

    async fn central(&self) -> Result<Adapter, BtleplugError> {
        let manager = Manager::new().await?;
        let index = self.config.adapter_index;
        let central = manager
            .adapters()
            .await?
            .into_iter()
            .nth(index)
            .ok_or(BtleplugError::NoAdapter { index })?;

        if self.config.discovery_window_ms > 0 {
            tracing::debug!(
                window_ms = self.config.discovery_window_ms,
                "scanning before enumeration"
            );
            central.start_scan(ScanFilter::default()).await?;
            tokio::time::sleep(Duration::from_millis(self.config.discovery_window_ms)).await;
            central.stop_scan().await?;
        }

        Ok(central)
    }

    async fn snapshots(&self) -> Result<Vec<PeripheralSnapshot>, BtleplugError> {
        let central = self.central().await?;
        let peripherals = central.peripherals().await?;

        let mut snapshots = Vec::with_capacity(peripherals.len());
        for peripheral in &peripherals {
            if let Some(snapshot) = snapshot(peripheral).await? {
                snapshots.push(snapshot);
            }
        }
        tracing::trace!(count = snapshots.len(), "peripherals known to the stack");
        Ok(snapshots)
    }
}

async fn snapshot(peripheral: &Peripheral) -> Result<Option<PeripheralSnapshot>, BtleplugError> {
    let Some(props) = peripheral.properties().await? else {
        return Ok(None);
    };
    if props.address == BDAddr::default() {
        return Ok(None);
    }

    let mut services = props.services;
    services.extend(peripheral.services().into_iter().map(|service| service.uuid));

    Ok(Some(PeripheralSnapshot {
        identifier: props.address.to_string(),
        name: props.local_name,
        connected: peripheral.is_connected().await?,
        services,
    }))
}

fn into_devices<'a>(
    selected: impl Iterator<Item = &'a PeripheralSnapshot>,
) -> Result<Vec<Device>, DomainError> {
    selected.map(PeripheralSnapshot::to_device).collect()
}

impl DeviceAdapter for BtleplugAdapter {
    async fn known_devices(&self, identifiers: Vec<String>) -> Result<Vec<Device>, DomainError> {
        if identifiers.is_empty() {
            return Ok(Vec::new());
        }
        let peripherals = self.snapshots().await?;
        into_devices(filter::select_known(&peripherals, &identifiers))
    }

    async fn connected_devices(
        &self,
        service_uuids: Vec<String>,
    ) -> Result<Vec<Device>, DomainError> {
        let services = parse_service_uuids(&service_uuids)?;
        if services.is_empty() {
            return Ok(Vec::new());
        }
        let peripherals = self.snapshots().await?;
        into_devices(filter::select_connected(&peripherals, &services))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blebridge_domain::error::ErrorCode;

    #[tokio::test]
    async fn should_return_empty_list_for_no_identifiers_without_radio() {
        let adapter = BtleplugAdapter::default();
        let devices = adapter.known_devices(Vec::new()).await.unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn should_return_empty_list_for_no_services_without_radio() {
        let adapter = BtleplugAdapter::default();
        let devices = adapter.connected_devices(Vec::new()).await.unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn should_reject_bad_uuid_before_touching_radio() {
        let adapter = BtleplugAdapter::default();
        let err = adapter
            .connected_devices(vec!["not-a-uuid".into()])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_IDENTIFIERS);
        assert_eq!(err.service_uuid.as_deref(), Some("not-a-uuid"));
    }

    #[test]
    fn should_keep_configuration() {
        let adapter = BtleplugAdapter::new(BtleplugConfig {
            adapter_index: 1,
            discovery_window_ms: 250,
        });
        assert_eq!(adapter.config.adapter_index, 1);
        assert_eq!(adapter.config.discovery_window_ms, 250);
    }
}
