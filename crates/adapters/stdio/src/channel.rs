//! [`ResultChannel`] writing one response line per call.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tokio::sync::mpsc;

use blebridge_app::ports::ResultChannel;

use crate::protocol::{ProtocolError, Response};

/// Shared, line-atomic response sink.
pub type SharedWriter<W> = Arc<Mutex<W>>;

/// Reply handle for one request.
///
/// Holds an in-flight token until it is consumed or dropped so the server
/// can wait for outstanding replies before it returns.
pub struct LineChannel<W> {
    id: Value,
    writer: SharedWriter<W>,
    _in_flight: mpsc::Sender<()>,
}

impl<W: Write + Send + 'static> LineChannel<W> {
    pub(crate) fn new(id: Value, writer: SharedWriter<W>, in_flight: mpsc::Sender<()>) -> Self {
        Self {
            id,
            writer,
            _in_flight: in_flight,
        }
    }

    fn send(self, response: &Response) {
        if let Err(err) = write_response(&self.writer, response) {
            tracing::error!(error = %err, id = %self.id, "failed to write response");
        }
    }
}

/// Write `response` as one line and flush.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the response cannot be encoded or written.
pub fn write_response<W: Write>(
    writer: &Mutex<W>,
    response: &Response,
) -> Result<(), ProtocolError> {
    let line = response.to_line()?;
    let mut guard = writer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.write_all(line.as_bytes())?;
    guard.flush()?;
    Ok(())
}

impl<W: Write + Send + 'static> ResultChannel for LineChannel<W> {
    fn success(self, payload: Value) {
        let response = Response::Success {
            id: self.id.clone(),
            result: payload,
        };
        self.send(&response);
    }

    fn error(self, code: Option<String>, message: Option<String>, details: Option<Value>) {
        let response = Response::Error {
            id: self.id.clone(),
            code,
            message,
            details,
        };
        self.send(&response);
    }

    fn not_implemented(self) {
        let response = Response::NotImplemented {
            id: self.id.clone(),
        };
        self.send(&response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn channel(id: Value) -> (LineChannel<Vec<u8>>, SharedWriter<Vec<u8>>, mpsc::Receiver<()>) {
        let writer = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = mpsc::channel(1);
        (LineChannel::new(id, Arc::clone(&writer), tx), writer, rx)
    }

    fn written(writer: &SharedWriter<Vec<u8>>) -> Value {
        let bytes = writer.lock().unwrap().clone();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), 1);
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn should_write_success_with_echoed_id() {
        let (channel, writer, _rx) = channel(json!("req-1"));
        channel.success(json!([{"identifier": "AA", "name": null}]));
        assert_eq!(
            written(&writer),
            json!({
                "status": "success",
                "id": "req-1",
                "result": [{"identifier": "AA", "name": null}],
            })
        );
    }

    #[test]
    fn should_write_error_envelope() {
        let (channel, writer, _rx) = channel(json!(3));
        channel.error(
            Some("42".into()),
            Some("Device not found".into()),
            Some(json!({"errorCode": 42, "reason": "Device not found"})),
        );
        assert_eq!(
            written(&writer),
            json!({
                "status": "error",
                "id": 3,
                "code": "42",
                "message": "Device not found",
                "details": {"errorCode": 42, "reason": "Device not found"},
            })
        );
    }

    #[test]
    fn should_write_not_implemented() {
        let (channel, writer, _rx) = channel(Value::Null);
        channel.not_implemented();
        assert_eq!(
            written(&writer),
            json!({"status": "notImplemented", "id": null})
        );
    }

    #[tokio::test]
    async fn should_release_in_flight_token_when_consumed() {
        let (channel, _writer, mut rx) = channel(Value::Null);
        channel.success(json!([]));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn should_release_in_flight_token_when_dropped() {
        let (channel, writer, mut rx) = channel(Value::Null);
        drop(channel);
        assert_eq!(rx.recv().await, None);
        assert!(writer.lock().unwrap().is_empty());
    }
}
