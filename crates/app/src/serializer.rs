//! Domain → transport conversion.
//!
//! Produces `serde_json::Value`s so the transport adapter decides how they
//! go over the wire.

use serde::Serialize;
use serde_json::{Map, Value};

use blebridge_domain::device::Device;
use blebridge_domain::error::DomainError;

/// A value could not be turned into its transport representation.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct SerializationError(#[from] serde_json::Error);

#[derive(Serialize)]
struct TransportDevice<'a> {
    identifier: &'a str,
    name: Option<&'a str>,
}

impl<'a> From<&'a Device> for TransportDevice<'a> {
    fn from(device: &'a Device) -> Self {
        Self {
            identifier: device.identifier(),
            name: device.name(),
        }
    }
}

/// Serialize any value into its transport representation.
///
/// # Errors
///
/// Returns [`SerializationError`] if `value`'s `Serialize` implementation
/// fails or produces something JSON cannot represent (e.g. non-string map
/// keys).
pub fn to_transport<S: Serialize + ?Sized>(value: &S) -> Result<Value, SerializationError> {
    Ok(serde_json::to_value(value)?)
}

/// Convert devices into an array of `{identifier, name}` objects, in order.
///
/// An empty slice yields an empty array.
///
/// # Errors
///
/// Returns [`SerializationError`] if encoding fails; device fields are plain
/// strings so this does not happen in practice.
pub fn devices_to_transport(devices: &[Device]) -> Result<Value, SerializationError> {
    let entries: Vec<TransportDevice<'_>> = devices.iter().map(TransportDevice::from).collect();
    to_transport(&entries)
}

/// Convert a [`DomainError`] into the envelope detail object.
///
/// `errorCode` and `reason` are always present; the other keys only when the
/// error carries them.
#[must_use]
pub fn error_to_transport(err: &DomainError) -> Value {
    let mut object = Map::new();
    object.insert("errorCode".into(), Value::from(err.code.as_u16()));
    object.insert("reason".into(), Value::from(err.reason.as_str()));

    let optional = [
        ("internalMessage", err.internal_message.as_deref()),
        ("deviceID", err.device_id.as_deref()),
        ("serviceUUID", err.service_uuid.as_deref()),
    ];
    for (key, value) in optional
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
    {
        object.insert(key.into(), Value::from(value));
    }
    if let Some(detail) = &err.detail {
        object.insert("detail".into(), detail.clone());
    }

    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blebridge_domain::error::ErrorCode;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn device(identifier: &str, name: Option<&str>) -> Device {
        Device::builder()
            .identifier(identifier)
            .maybe_name(name.map(str::to_owned))
            .build()
            .unwrap()
    }

    #[test]
    fn should_produce_empty_array_for_no_devices() {
        let value = devices_to_transport(&[]).unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn should_produce_one_entry_per_device_in_order() {
        let devices = vec![
            device("AA:BB", Some("Foo")),
            device("CC:DD", None),
            device("EE:FF", Some("Bar")),
        ];
        let value = devices_to_transport(&devices).unwrap();
        assert_eq!(
            value,
            json!([
                {"identifier": "AA:BB", "name": "Foo"},
                {"identifier": "CC:DD", "name": null},
                {"identifier": "EE:FF", "name": "Bar"},
            ])
        );
    }

    #[test]
    fn should_keep_duplicates_as_separate_entries() {
        let devices = vec![device("AA:BB", None), device("AA:BB", None)];
        let value = devices_to_transport(&devices).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn should_serialize_device_list_to_expected_json_text() {
        let devices = vec![device("AA:BB", Some("Foo")), device("CC:DD", None)];
        let text = devices_to_transport(&devices).unwrap().to_string();
        assert_eq!(
            text,
            r#"[{"identifier":"AA:BB","name":"Foo"},{"identifier":"CC:DD","name":null}]"#
        );
    }

    #[test]
    fn should_map_minimal_error_to_code_and_reason() {
        let err = DomainError::new(42_u16, "Device not found");
        assert_eq!(
            error_to_transport(&err),
            json!({"errorCode": 42, "reason": "Device not found"})
        );
    }

    #[test]
    fn should_map_every_populated_error_field() {
        let err = DomainError::new(ErrorCode::DEVICE_NOT_CONNECTED, "Device is not connected")
            .with_internal_message("status 8")
            .with_device_id("AA:BB")
            .with_service_uuid("0000181a-0000-1000-8000-00805f9b34fb")
            .with_detail(json!({"retries": 2}));
        assert_eq!(
            error_to_transport(&err),
            json!({
                "errorCode": 205,
                "reason": "Device is not connected",
                "internalMessage": "status 8",
                "deviceID": "AA:BB",
                "serviceUUID": "0000181a-0000-1000-8000-00805f9b34fb",
                "detail": {"retries": 2},
            })
        );
    }

    #[test]
    fn should_report_error_for_unrepresentable_value() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "tuple keys are not valid JSON object keys");
        let result = to_transport(&map);
        assert!(result.is_err());
        assert!(!result.unwrap_err().to_string().is_empty());
    }
}
