//! Result channel port: the outbound slot of a single inbound call.

/// Where the outcome of one inbound call is delivered.
///
/// Every method consumes the channel, so a value of this type can deliver at
/// most one outcome.
pub trait ResultChannel: Send + 'static {
    /// Deliver a successful payload.
    fn success(self, payload: serde_json::Value);

    /// Deliver a failure envelope.
    ///
    /// `code` is `None` for failures that did not originate from a device
    /// capability (serialization problems, malformed requests).
    fn error(
        self,
        code: Option<String>,
        message: Option<String>,
        details: Option<serde_json::Value>,
    );

    /// Signal that the requested method is not handled here.
    fn not_implemented(self);
}
