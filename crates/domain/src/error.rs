//! Common error types used across the workspace.
//!
//! [`DomainError`] is what a device capability (the BLE adapter or the host
//! registry) reports when an operation fails. It crosses the bridge verbatim:
//! its [`ErrorCode`] becomes the envelope code and its fields become the
//! envelope detail.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable numeric error code.
///
/// The named constants cover the codes the enumeration paths produce
/// themselves. Any other value an adapter reports is carried through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(u16);

impl ErrorCode {
    pub const UNKNOWN: Self = Self(0);
    pub const OPERATION_CANCELLED: Self = Self(2);
    pub const OPERATION_TIMED_OUT: Self = Self(3);
    pub const INVALID_IDENTIFIERS: Self = Self(5);
    pub const BLUETOOTH_UNSUPPORTED: Self = Self(100);
    pub const BLUETOOTH_UNAUTHORIZED: Self = Self(101);
    pub const BLUETOOTH_POWERED_OFF: Self = Self(102);
    pub const DEVICE_NOT_FOUND: Self = Self(204);
    pub const DEVICE_NOT_CONNECTED: Self = Self(205);

    /// Wrap a raw code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Access the raw code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for ErrorCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure reported by a device capability.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{reason} (code {code})")]
pub struct DomainError {
    /// Stable code, sent as the envelope code.
    pub code: ErrorCode,
    /// Short human-readable reason.
    pub reason: String,
    /// Diagnostic message from the underlying stack, not meant for end users.
    pub internal_message: Option<String>,
    /// Device the failure relates to, when known.
    pub device_id: Option<String>,
    /// Service the failure relates to, when known.
    pub service_uuid: Option<String>,
    /// Free-form structured detail.
    pub detail: Option<serde_json::Value>,
}

impl DomainError {
    /// Create an error with only a code and a reason.
    #[must_use]
    pub fn new(code: impl Into<ErrorCode>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            reason: reason.into(),
            internal_message: None,
            device_id: None,
            service_uuid: None,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_internal_message(mut self, message: impl Into<String>) -> Self {
        self.internal_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    #[must_use]
    pub fn with_service_uuid(mut self, service_uuid: impl Into<String>) -> Self {
        self.service_uuid = Some(service_uuid.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("device identifier must not be empty")]
    EmptyIdentifier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_code_as_plain_number() {
        assert_eq!(ErrorCode::new(42).to_string(), "42");
        assert_eq!(ErrorCode::DEVICE_NOT_FOUND.to_string(), "204");
    }

    #[test]
    fn should_serialize_code_transparently() {
        let json = serde_json::to_string(&ErrorCode::INVALID_IDENTIFIERS).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn should_display_domain_error_with_reason_and_code() {
        let err = DomainError::new(42_u16, "Device not found");
        assert_eq!(err.to_string(), "Device not found (code 42)");
    }

    #[test]
    fn should_leave_optional_fields_empty_when_created() {
        let err = DomainError::new(ErrorCode::UNKNOWN, "boom");
        assert!(err.internal_message.is_none());
        assert!(err.device_id.is_none());
        assert!(err.service_uuid.is_none());
        assert!(err.detail.is_none());
    }

    #[test]
    fn should_attach_optional_fields_through_builder_methods() {
        let err = DomainError::new(ErrorCode::DEVICE_NOT_CONNECTED, "not connected")
            .with_internal_message("gatt status 133")
            .with_device_id("AA:BB")
            .with_service_uuid("181a")
            .with_detail(serde_json::json!({"attempt": 3}));

        assert_eq!(err.internal_message.as_deref(), Some("gatt status 133"));
        assert_eq!(err.device_id.as_deref(), Some("AA:BB"));
        assert_eq!(err.service_uuid.as_deref(), Some("181a"));
        assert_eq!(err.detail, Some(serde_json::json!({"attempt": 3})));
    }

    #[test]
    fn should_display_validation_error() {
        assert_eq!(
            ValidationError::EmptyIdentifier.to_string(),
            "device identifier must not be empty"
        );
    }
}
