//! Wire format: one JSON object per line in each direction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use blebridge_app::command::MethodCall;

/// An inbound request line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Request {
    /// Opaque correlation value echoed in the response.
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl Request {
    /// Parse a single request line.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidRequest`] if the line is not a JSON
    /// object with a string `method`.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Split into the correlation id and the call handed to the router.
    #[must_use]
    pub fn into_call(self) -> (Value, MethodCall) {
        (
            self.id,
            MethodCall {
                method: self.method,
                arguments: self.arguments,
            },
        )
    }
}

/// An outbound response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Response {
    Success {
        id: Value,
        result: Value,
    },
    Error {
        id: Value,
        code: Option<String>,
        message: Option<String>,
        details: Option<Value>,
    },
    NotImplemented {
        id: Value,
    },
}

impl Response {
    /// Encode as a single line, newline included.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Encode`] if a payload cannot be encoded.
    pub fn to_line(&self) -> Result<String, ProtocolError> {
        let mut line = serde_json::to_string(self).map_err(ProtocolError::Encode)?;
        line.push('\n');
        Ok(line)
    }
}

/// Transport-level failures.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("failed to encode response")]
    Encode(#[source] serde_json::Error),

    #[error("transport I/O error")]
    Io(#[from] std::io::Error),
}
