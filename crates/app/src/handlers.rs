//! Device enumeration handlers.
//!
//! Each handler builds a [`Resolver`] bound to the caller's channel, issues
//! its query and returns immediately. Asynchronous queries run on the
//! injected runtime and resolve from whichever worker completes them; the
//! paired-device read resolves synchronously. Both paths go through the same
//! resolver, so the channel sees the same contract either way.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;

use blebridge_domain::device::Device;
use blebridge_domain::error::{DomainError, ErrorCode};

use crate::command::{GET_CONNECTED_DEVICES, GET_KNOWN_DEVICES, GET_PAIRED_DEVICES};
use crate::ports::{BondedDevice, DeviceAdapter, Executor, PairedDeviceRegistry, ResultChannel};
use crate::resolver::Resolver;
use crate::serializer::{self, SerializationError};

/// Resolver for every device-list operation.
pub type DeviceListResolver = Resolver<Vec<Device>, DomainError>;

/// Handlers for `getKnownDevices`, `getConnectedDevices` and
/// `getPairedDevices`.
pub struct DeviceHandlers<A, R> {
    adapter: Arc<A>,
    registry: Arc<R>,
    executor: Arc<dyn Executor>,
    runtime: Handle,
}

impl<A, R> DeviceHandlers<A, R>
where
    A: DeviceAdapter + 'static,
    R: PairedDeviceRegistry,
{
    /// Create handlers backed by the given capabilities.
    ///
    /// `executor` is where replies are delivered; `runtime` is where
    /// adapter queries are driven.
    pub fn new(
        adapter: Arc<A>,
        registry: Arc<R>,
        executor: Arc<dyn Executor>,
        runtime: Handle,
    ) -> Self {
        Self {
            adapter,
            registry,
            executor,
            runtime,
        }
    }

    /// Executor replies are delivered on.
    #[must_use]
    pub fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }

    /// Build a resolver that serializes its outcome into `channel`.
    pub fn resolver<C: ResultChannel>(&self, operation: &'static str, channel: C) -> DeviceListResolver {
        device_list_resolver(operation, Arc::clone(&self.executor), channel)
    }

    /// Query the adapter for already-known devices.
    #[tracing::instrument(skip(self, channel))]
    pub fn get_known_devices<C: ResultChannel>(&self, identifiers: Vec<String>, channel: C) {
        tracing::debug!("get known devices");
        let resolver = self.resolver(GET_KNOWN_DEVICES, channel);
        let adapter = Arc::clone(&self.adapter);
        self.spawn_query(resolver, async move { adapter.known_devices(identifiers).await });
    }

    /// Query the adapter for connected devices exposing the given services.
    #[tracing::instrument(skip(self, channel))]
    pub fn get_connected_devices<C: ResultChannel>(&self, service_uuids: Vec<String>, channel: C) {
        tracing::debug!("get connected devices");
        let resolver = self.resolver(GET_CONNECTED_DEVICES, channel);
        let adapter = Arc::clone(&self.adapter);
        self.spawn_query(resolver, async move {
            adapter.connected_devices(service_uuids).await
        });
    }

    /// Read the host's bonded devices and resolve synchronously.
    #[tracing::instrument(skip(self, channel))]
    pub fn get_paired_devices<C: ResultChannel>(&self, channel: C) {
        tracing::debug!("get paired devices");
        let resolver = self.resolver(GET_PAIRED_DEVICES, channel);
        resolver.begin();

        let outcome = self.registry.bonded_devices().and_then(|bonded| {
            bonded
                .into_iter()
                .map(BondedDevice::into_device)
                .collect::<Result<Vec<_>, _>>()
        });
        resolver.resolve(outcome);
    }

    /// Drive `query` on the runtime and resolve with its outcome.
    ///
    /// A second task watches the first: if the query panics or the runtime
    /// aborts it, the operation still resolves, with a failure.
    fn spawn_query<F>(&self, resolver: DeviceListResolver, query: F)
    where
        F: Future<Output = Result<Vec<Device>, DomainError>> + Send + 'static,
    {
        resolver.begin();
        let watcher = resolver.clone();

        let task = self.runtime.spawn(async move {
            let outcome = query.await;
            resolver.resolve(outcome);
        });

        self.runtime.spawn(async move {
            if let Err(err) = task.await {
                watcher.resolve_failure(
                    DomainError::new(ErrorCode::UNKNOWN, "Adapter query did not complete")
                        .with_internal_message(err.to_string()),
                );
            }
        });
    }
}

/// Build a resolver that serializes a device-list outcome into `channel`.
pub fn device_list_resolver<C: ResultChannel>(
    operation: &'static str,
    executor: Arc<dyn Executor>,
    channel: C,
) -> DeviceListResolver {
    DeviceListResolver::new(
        operation,
        executor,
        move |outcome: Result<Vec<Device>, DomainError>| match outcome {
            Ok(devices) => {
                tracing::debug!(operation, count = devices.len(), "found devices");
                deliver_payload(channel, serializer::devices_to_transport(&devices));
            }
            Err(err) => deliver_error(channel, operation, &err),
        },
    )
}

/// Deliver a serialized success payload, downgrading a serialization failure
/// to a generic error without a code.
pub fn deliver_payload<C: ResultChannel>(
    channel: C,
    payload: Result<serde_json::Value, SerializationError>,
) {
    match payload {
        Ok(value) => channel.success(value),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize response payload");
            channel.error(None, Some(err.to_string()), None);
        }
    }
}

/// Deliver a [`DomainError`] as an error envelope.
pub fn deliver_error<C: ResultChannel>(channel: C, operation: &'static str, err: &DomainError) {
    tracing::error!(
        operation,
        code = %err.code,
        reason = %err.reason,
        internal_message = err.internal_message.as_deref(),
        "device query failed"
    );
    channel.error(
        Some(err.code.to_string()),
        Some(err.reason.clone()),
        Some(serializer::error_to_transport(err)),
    );
}
