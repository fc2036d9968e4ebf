//! btleplug adapter error types.

use blebridge_domain::error::{DomainError, ErrorCode};

/// Errors specific to the btleplug adapter.
#[derive(Debug, thiserror::Error)]
pub enum BtleplugError {
    /// The host has no adapter at the configured index.
    #[error("no BLE adapter at index {index}")]
    NoAdapter { index: usize },

    /// The BLE stack reported a failure.
    #[error("BLE stack error")]
    Backend(#[from] btleplug::Error),
}

impl From<BtleplugError> for DomainError {
    fn from(err: BtleplugError) -> Self {
        match err {
            BtleplugError::NoAdapter { .. } => {
                DomainError::new(ErrorCode::BLUETOOTH_UNSUPPORTED, "Bluetooth is not supported")
                    .with_internal_message(err.to_string())
            }
            BtleplugError::Backend(inner) => backend_error(&inner),
        }
    }
}

fn backend_error(err: &btleplug::Error) -> DomainError {
    let (code, reason) = match err {
        btleplug::Error::PermissionDenied => {
            (ErrorCode::BLUETOOTH_UNAUTHORIZED, "Bluetooth is unauthorized")
        }
        btleplug::Error::DeviceNotFound => (ErrorCode::DEVICE_NOT_FOUND, "Device not found"),
        btleplug::Error::NotConnected => {
            (ErrorCode::DEVICE_NOT_CONNECTED, "Device is not connected")
        }
        btleplug::Error::TimedOut(_) => (ErrorCode::OPERATION_TIMED_OUT, "Operation timed out"),
        btleplug::Error::NotSupported(_) => {
            (ErrorCode::BLUETOOTH_UNSUPPORTED, "Bluetooth is not supported")
        }
        _ => (ErrorCode::UNKNOWN, "Unknown error"),
    };
    DomainError::new(code, reason).with_internal_message(err.to_string())
}
