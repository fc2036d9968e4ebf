//! # blebridged: BLE device-enumeration bridge
//!
//! Composition root that wires a BLE backend, the command router and the
//! stdio transport together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging on stderr so stdout carries only responses
//! - Start the serial executor replies are delivered on
//! - Construct the selected backend and the paired-device registry
//! - Serve JSON-lines requests from stdin until it closes
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::io::Stdout;
use std::sync::{Arc, Mutex};

use anyhow::Context as _;
use tokio::io::BufReader;
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

use blebridge_adapter_btleplug::BtleplugAdapter;
use blebridge_adapter_stdio::{ServeSummary, SharedWriter, serve};
use blebridge_adapter_virtual::{ConfiguredPairedRegistry, VirtualAdapter};
use blebridge_app::executor::SerialExecutor;
use blebridge_app::ports::{DeviceAdapter, Executor};
use blebridge_app::router::CommandRouter;

use crate::config::{BackendKind, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let executor: Arc<dyn Executor> = Arc::new(
        SerialExecutor::spawn("blebridge-main").context("failed to start reply executor")?,
    );
    let registry = Arc::new(ConfiguredPairedRegistry::new(&config.paired));
    let writer: SharedWriter<Stdout> = Arc::new(Mutex::new(std::io::stdout()));

    tracing::info!(backend = ?config.backend.kind, paired = config.paired.len(), "blebridged starting");

    let summary = match config.backend.kind {
        BackendKind::Virtual => {
            let adapter = VirtualAdapter::new(config.simulated);
            run(adapter, registry, executor, writer, &config.backend).await?
        }
        BackendKind::Btleplug => {
            let adapter = BtleplugAdapter::new(config.btleplug);
            run(adapter, registry, executor, writer, &config.backend).await?
        }
    };

    tracing::info!(
        dispatched = summary.dispatched,
        rejected = summary.rejected,
        drained = summary.drained,
        "input closed, blebridged stopping"
    );
    Ok(())
}

async fn run<A: DeviceAdapter + 'static>(
    adapter: A,
    registry: Arc<ConfiguredPairedRegistry>,
    executor: Arc<dyn Executor>,
    writer: SharedWriter<Stdout>,
    backend: &config::BackendConfig,
) -> anyhow::Result<ServeSummary> {
    let router = CommandRouter::new(Arc::new(adapter), registry, executor, Handle::current());
    let reader = BufReader::new(tokio::io::stdin());
    serve(reader, writer, &router, backend.drain_timeout())
        .await
        .context("failed to read requests from stdin")
}
