//! Inbound method calls and the closed set of commands they map to.

use serde_json::{Map, Value};

/// `getKnownDevices` method name.
pub const GET_KNOWN_DEVICES: &str = "getKnownDevices";
/// `getConnectedDevices` method name.
pub const GET_CONNECTED_DEVICES: &str = "getConnectedDevices";
/// `getPairedDevices` method name.
pub const GET_PAIRED_DEVICES: &str = "getPairedDevices";

/// Argument key holding the device identifiers for `getKnownDevices`.
pub const DEVICE_IDENTIFIERS: &str = "deviceIdentifiers";
/// Argument key holding the service UUIDs for `getConnectedDevices`.
pub const UUIDS: &str = "uuids";

/// A method call as received from the transport: a name plus named arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Map<String, Value>,
}

impl MethodCall {
    /// Create a call without arguments.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Map::new(),
        }
    }

    /// Add an argument.
    #[must_use]
    pub fn with_argument(mut self, key: impl Into<String>, value: Value) -> Self {
        self.arguments.insert(key.into(), value);
        self
    }
}

/// Every command the bridge handles, with its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetKnownDevices { identifiers: Vec<String> },
    GetConnectedDevices { service_uuids: Vec<String> },
    GetPairedDevices,
}

impl Command {
    /// Wire names of every command, in declaration order.
    pub const METHODS: [&'static str; 3] =
        [GET_KNOWN_DEVICES, GET_CONNECTED_DEVICES, GET_PAIRED_DEVICES];

    /// Wire name of this command.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::GetKnownDevices { .. } => GET_KNOWN_DEVICES,
            Self::GetConnectedDevices { .. } => GET_CONNECTED_DEVICES,
            Self::GetPairedDevices => GET_PAIRED_DEVICES,
        }
    }

    /// Parse a method call into a command.
    ///
    /// Missing (or `null`) list arguments are read as empty lists.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unrecognized`] for an unknown method name and
    /// [`CommandError::InvalidArgument`] when a list argument has the wrong
    /// type.
    pub fn parse(call: &MethodCall) -> Result<Self, CommandError> {
        let invalid = |method: &'static str| {
            move |source: ArgumentError| CommandError::InvalidArgument { method, source }
        };

        match call.method.as_str() {
            GET_KNOWN_DEVICES => {
                let identifiers = string_list(&call.arguments, DEVICE_IDENTIFIERS)
                    .map_err(invalid(GET_KNOWN_DEVICES))?;
                Ok(Self::GetKnownDevices { identifiers })
            }
            GET_CONNECTED_DEVICES => {
                let service_uuids =
                    string_list(&call.arguments, UUIDS).map_err(invalid(GET_CONNECTED_DEVICES))?;
                Ok(Self::GetConnectedDevices { service_uuids })
            }
            GET_PAIRED_DEVICES => Ok(Self::GetPairedDevices),
            other => Err(CommandError::Unrecognized(other.to_owned())),
        }
    }
}

/// Why a method call could not become a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The method name is not one of [`Command::METHODS`].
    #[error("method `{0}` is not implemented")]
    Unrecognized(String),

    /// The method is known but one of its arguments is malformed.
    #[error("invalid arguments for `{method}`")]
    InvalidArgument {
        method: &'static str,
        #[source]
        source: ArgumentError,
    },
}

/// A single malformed argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("argument `{key}` must be a list of strings")]
    NotAStringList { key: &'static str },
}

fn string_list(arguments: &Map<String, Value>, key: &'static str) -> Result<Vec<String>, ArgumentError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => Ok(text.clone()),
                _ => Err(ArgumentError::NotAStringList { key }),
            })
            .collect(),
        Some(_) => Err(ArgumentError::NotAStringList { key }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_parse_known_devices_with_identifiers() {
        let call = MethodCall::new(GET_KNOWN_DEVICES)
            .with_argument(DEVICE_IDENTIFIERS, json!(["AA:BB", "CC:DD"]));
        assert_eq!(
            Command::parse(&call).unwrap(),
            Command::GetKnownDevices {
                identifiers: vec!["AA:BB".into(), "CC:DD".into()]
            }
        );
    }

    #[test]
    fn should_read_missing_identifiers_as_empty_list() {
        let call = MethodCall::new(GET_KNOWN_DEVICES);
        assert_eq!(
            Command::parse(&call).unwrap(),
            Command::GetKnownDevices {
                identifiers: Vec::new()
            }
        );
    }

    #[test]
    fn should_read_null_uuids_as_empty_list() {
        let call = MethodCall::new(GET_CONNECTED_DEVICES).with_argument(UUIDS, Value::Null);
        assert_eq!(
            Command::parse(&call).unwrap(),
            Command::GetConnectedDevices {
                service_uuids: Vec::new()
            }
        );
    }

    #[test]
    fn should_parse_connected_devices_with_uuids() {
        let call = MethodCall::new(GET_CONNECTED_DEVICES).with_argument(UUIDS, json!(["181a"]));
        assert_eq!(
            Command::parse(&call).unwrap(),
            Command::GetConnectedDevices {
                service_uuids: vec!["181a".into()]
            }
        );
    }

    #[test]
    fn should_ignore_arguments_for_paired_devices() {
        let call = MethodCall::new(GET_PAIRED_DEVICES).with_argument("extra", json!(1));
        assert_eq!(Command::parse(&call).unwrap(), Command::GetPairedDevices);
    }

    #[test]
    fn should_reject_unknown_method() {
        let call = MethodCall::new("connectToDevice");
        assert_eq!(
            Command::parse(&call),
            Err(CommandError::Unrecognized("connectToDevice".into()))
        );
    }

    #[test]
    fn should_match_method_names_case_sensitively() {
        let call = MethodCall::new("getpaireddevices");
        assert!(matches!(
            Command::parse(&call),
            Err(CommandError::Unrecognized(_))
        ));
    }

    #[test]
    fn should_reject_non_list_argument() {
        let call = MethodCall::new(GET_CONNECTED_DEVICES).with_argument(UUIDS, json!("181a"));
        assert_eq!(
            Command::parse(&call),
            Err(CommandError::InvalidArgument {
                method: GET_CONNECTED_DEVICES,
                source: ArgumentError::NotAStringList { key: UUIDS },
            })
        );
    }

    #[test]
    fn should_reject_list_with_non_string_items() {
        let call = MethodCall::new(GET_KNOWN_DEVICES)
            .with_argument(DEVICE_IDENTIFIERS, json!(["AA:BB", 3]));
        assert!(matches!(
            Command::parse(&call),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn should_round_trip_method_names() {
        for method in Command::METHODS {
            let command = Command::parse(&MethodCall::new(method)).unwrap();
            assert_eq!(command.method(), method);
        }
    }

    #[test]
    fn should_display_argument_error_with_key() {
        let err = ArgumentError::NotAStringList { key: UUIDS };
        assert_eq!(err.to_string(), "argument `uuids` must be a list of strings");
    }
}
