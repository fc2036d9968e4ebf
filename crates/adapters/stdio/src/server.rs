//! Request loop: read lines, dispatch, wait for replies.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _};
use tokio::sync::mpsc;

use blebridge_app::ports::{DeviceAdapter, PairedDeviceRegistry};
use blebridge_app::router::CommandRouter;

use crate::channel::{LineChannel, SharedWriter, write_response};
use crate::protocol::{ProtocolError, Request, Response};

/// What a finished [`serve`] call observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    /// Lines dispatched to the router.
    pub dispatched: usize,
    /// Lines rejected before dispatch.
    pub rejected: usize,
    /// Whether every reply was written before the drain timeout.
    pub drained: bool,
}

/// Serve requests from `reader` until it is exhausted.
///
/// Every non-blank line gets exactly one response line in `writer`, in
/// completion order rather than request order. A line that is not UTF-8 or
/// not a request is answered with a code-less error and reading goes on.
/// Once input closes, waits up to `drain_timeout` for replies still in
/// flight.
///
/// # Errors
///
/// Returns [`ProtocolError::Io`] if reading from `reader` fails. Replies
/// already in flight are still waited for first.
pub async fn serve<R, W, A, P>(
    reader: R,
    writer: SharedWriter<W>,
    router: &CommandRouter<A, P>,
    drain_timeout: Duration,
) -> Result<ServeSummary, ProtocolError>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
    A: DeviceAdapter + 'static,
    P: PairedDeviceRegistry,
{
    let (in_flight, mut drained) = mpsc::channel::<()>(1);
    let mut summary = ServeSummary::default();
    let mut segments = reader.split(b'\n');

    let read_error = loop {
        let segment = match segments.next_segment().await {
            Ok(Some(segment)) => segment,
            Ok(None) => break None,
            Err(err) => {
                tracing::error!(error = %err, "failed to read request line");
                break Some(err);
            }
        };

        match decode_line(&segment) {
            Ok(None) => {}
            Ok(Some(request)) => {
                let (id, call) = request.into_call();
                tracing::debug!(method = %call.method, %id, "dispatching request");
                let channel = LineChannel::new(id, Arc::clone(&writer), in_flight.clone());
                router.dispatch(&call, channel);
                summary.dispatched += 1;
            }
            Err(err) => {
                tracing::warn!(error = %err, "rejecting request line");
                let response = Response::Error {
                    id: Value::Null,
                    code: None,
                    message: Some(err.to_string()),
                    details: None,
                };
                if let Err(err) = write_response(&writer, &response) {
                    tracing::error!(error = %err, "failed to write response");
                }
                summary.rejected += 1;
            }
        }
    };

    drop(in_flight);
    summary.drained = tokio::time::timeout(drain_timeout, drained.recv())
        .await
        .is_ok();
    if summary.drained {
        tracing::debug!(dispatched = summary.dispatched, "input closed, all replies written");
    } else {
        tracing::warn!(
            timeout_ms = drain_timeout.as_millis(),
            "input closed with replies still in flight"
        );
    }

    match read_error {
        Some(err) => Err(err.into()),
        None => Ok(summary),
    }
}

/// Decode one raw input line; blank lines yield `None`.
fn decode_line(segment: &[u8]) -> Result<Option<Request>, ProtocolError> {
    let line = std::str::from_utf8(segment)?.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Request::parse(line).map(Some)
}
