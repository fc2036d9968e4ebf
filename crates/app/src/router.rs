//! Command router: maps inbound method calls onto device handlers.

use std::sync::Arc;

use tokio::runtime::Handle;

use blebridge_domain::error::{DomainError, ErrorCode};

use crate::command::{Command, CommandError, MethodCall};
use crate::handlers::{DeviceHandlers, device_list_resolver};
use crate::ports::{DeviceAdapter, Executor, PairedDeviceRegistry, ResultChannel};

/// Routes each inbound call to exactly one handler.
///
/// The set of handled methods is [`Command::METHODS`] and never changes.
/// Anything else is answered with "not implemented".
pub struct CommandRouter<A, R> {
    handlers: DeviceHandlers<A, R>,
}

impl<A, R> CommandRouter<A, R>
where
    A: DeviceAdapter + 'static,
    R: PairedDeviceRegistry,
{
    /// Create a router over the given capabilities.
    ///
    /// Replies are delivered on `executor`; adapter queries run on `runtime`.
    pub fn new(
        adapter: Arc<A>,
        registry: Arc<R>,
        executor: Arc<dyn Executor>,
        runtime: Handle,
    ) -> Self {
        Self {
            handlers: DeviceHandlers::new(adapter, registry, executor, runtime),
        }
    }

    /// Methods this router handles.
    #[must_use]
    pub fn supported_methods(&self) -> &'static [&'static str] {
        &Command::METHODS
    }

    /// Whether `method` is handled by this router.
    #[must_use]
    pub fn can_handle(&self, method: &str) -> bool {
        Command::METHODS.contains(&method)
    }

    /// Parse `call` and dispatch it, delivering the outcome into `channel`.
    ///
    /// Returns as soon as the handler has issued its query.
    pub fn dispatch<C: ResultChannel>(&self, call: &MethodCall, channel: C) {
        match Command::parse(call) {
            Ok(command) => self.execute(command, channel),
            Err(CommandError::Unrecognized(method)) => {
                tracing::debug!(%method, "method not implemented");
                self.handlers
                    .executor()
                    .execute(Box::new(move || channel.not_implemented()));
            }
            Err(CommandError::InvalidArgument { method, source }) => {
                tracing::warn!(method, error = %source, "rejecting call with invalid arguments");
                let resolver =
                    device_list_resolver(method, Arc::clone(self.handlers.executor()), channel);
                resolver.begin();
                resolver.resolve_failure(DomainError::new(
                    ErrorCode::INVALID_IDENTIFIERS,
                    source.to_string(),
                ));
            }
        }
    }

    /// Run an already-parsed command.
    pub fn execute<C: ResultChannel>(&self, command: Command, channel: C) {
        match command {
            Command::GetKnownDevices { identifiers } => {
                self.handlers.get_known_devices(identifiers, channel);
            }
            Command::GetConnectedDevices { service_uuids } => {
                self.handlers.get_connected_devices(service_uuids, channel);
            }
            Command::GetPairedDevices => self.handlers.get_paired_devices(channel),
        }
    }
}
