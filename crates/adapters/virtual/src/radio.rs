//! Simulated radio.
//!
//! Every query is answered from a freshly spawned thread after the
//! configured latency, the way a platform BLE stack reports results on its
//! own callback thread.

use std::future::Future;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use blebridge_app::completion::{self, Completion};
use blebridge_app::ports::DeviceAdapter;
use blebridge_app::service_uuid::parse_service_uuids;
use blebridge_domain::device::Device;
use blebridge_domain::error::{DomainError, ErrorCode};

use crate::config::{VirtualConfig, VirtualDeviceConfig};

/// Device adapter backed by a fixed table of simulated peripherals.
#[derive(Debug, Clone)]
pub struct VirtualAdapter {
    devices: Arc<[VirtualDeviceConfig]>,
    latency: Duration,
}

impl VirtualAdapter {
    /// Create an adapter from a configured peripheral table.
    #[must_use]
    pub fn new(config: VirtualConfig) -> Self {
        Self {
            devices: config.devices.into(),
            latency: Duration::from_millis(config.latency_ms),
        }
    }

    /// Answer `select` from the radio thread.
    fn query<F>(&self, select: F) -> impl Future<Output = Result<Vec<Device>, DomainError>> + Send
    where
        F: Fn(&VirtualDeviceConfig) -> bool + Send + 'static,
    {
        let (done, outcome) = completion::completion();
        let devices = Arc::clone(&self.devices);
        let latency = self.latency;

        let spawned = thread::Builder::new()
            .name("blebridge-virtual-radio".into())
            .spawn(move || {
                thread::sleep(latency);
                report(done, &devices, select);
            });
        if let Err(err) = spawned {
            // the completion went down with the closure, so the query resolves as cancelled
            tracing::warn!(error = %err, "failed to spawn radio thread");
        }

        outcome
    }
}

fn report<F>(done: Completion<Vec<Device>>, devices: &[VirtualDeviceConfig], select: F)
where
    F: Fn(&VirtualDeviceConfig) -> bool,
{
    let selected = devices
        .iter()
        .filter(|device| select(device))
        .map(|device| {
            device.to_device().map_err(|err| {
                DomainError::new(ErrorCode::INVALID_IDENTIFIERS, err.to_string())
                    .with_device_id(device.identifier.clone())
            })
        })
        .collect::<Result<Vec<_>, _>>();
    tracing::trace!(ok = selected.is_ok(), "radio answered");
    done.complete(selected);
}

impl DeviceAdapter for VirtualAdapter {
    async fn known_devices(&self, identifiers: Vec<String>) -> Result<Vec<Device>, DomainError> {
        self.query(move |device| {
            identifiers
                .iter()
                .any(|id| id.eq_ignore_ascii_case(&device.identifier))
        })
        .await
    }

    async fn connected_devices(
        &self,
        service_uuids: Vec<String>,
    ) -> Result<Vec<Device>, DomainError> {
        let services = parse_service_uuids(&service_uuids)?;
        self.query(move |device| {
            device.connected && device.services.iter().any(|s| services.contains(s))
        })
        .await
    }
}
