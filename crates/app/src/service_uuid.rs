//! Service UUID parsing shared by every [`DeviceAdapter`](crate::ports::DeviceAdapter).
//!
//! Accepts the full hyphenated or simple form, and the 16-bit (`"181a"`) and
//! 32-bit (`"0000181a"`) short forms, which expand over the Bluetooth base
//! UUID.

use uuid::Uuid;

use blebridge_domain::error::{DomainError, ErrorCode};

/// `00000000-0000-1000-8000-00805f9b34fb`
pub const BLUETOOTH_BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0080_5f9b_34fb;

/// Parse one service UUID.
///
/// # Errors
///
/// Returns [`ErrorCode::INVALID_IDENTIFIERS`] carrying the rejected value as
/// its service UUID.
pub fn parse_service_uuid(value: &str) -> Result<Uuid, DomainError> {
    if matches!(value.len(), 4 | 8)
        && value.bytes().all(|b| b.is_ascii_hexdigit())
        && let Ok(short) = u32::from_str_radix(value, 16)
    {
        return Ok(Uuid::from_u128(BLUETOOTH_BASE_UUID | (u128::from(short) << 96)));
    }
    Uuid::parse_str(value).map_err(|err| {
        DomainError::new(ErrorCode::INVALID_IDENTIFIERS, "Invalid service UUID")
            .with_internal_message(err.to_string())
            .with_service_uuid(value)
    })
}

/// Parse every value, failing on the first one that is not a UUID.
///
/// # Errors
///
/// See [`parse_service_uuid`].
pub fn parse_service_uuids(values: &[String]) -> Result<Vec<Uuid>, DomainError> {
    values.iter().map(|value| parse_service_uuid(value)).collect()
}
