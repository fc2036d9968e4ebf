//! Peripheral selection rules, kept apart from the radio so they can be
//! tested without hardware.

use uuid::Uuid;

use blebridge_domain::device::Device;
use blebridge_domain::error::{DomainError, ErrorCode};

/// What the adapter needs to know about one peripheral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PeripheralSnapshot {
    pub identifier: String,
    pub name: Option<String>,
    pub connected: bool,
    pub services: Vec<Uuid>,
}

impl PeripheralSnapshot {
    pub(crate) fn to_device(&self) -> Result<Device, DomainError> {
        Device::builder()
            .identifier(self.identifier.clone())
            .maybe_name(self.name.clone())
            .build()
            .map_err(|err| {
                DomainError::new(ErrorCode::INVALID_IDENTIFIERS, err.to_string())
                    .with_device_id(self.identifier.clone())
            })
    }
}

/// Peripherals whose identifier matches one of `identifiers`, ignoring ASCII
/// case, in the order the stack reports them.
pub(crate) fn select_known<'a>(
    peripherals: &'a [PeripheralSnapshot],
    identifiers: &'a [String],
) -> impl Iterator<Item = &'a PeripheralSnapshot> {
    peripherals.iter().filter(|peripheral| {
        identifiers
            .iter()
            .any(|id| id.eq_ignore_ascii_case(&peripheral.identifier))
    })
}

/// Connected peripherals exposing at least one of `services`.
pub(crate) fn select_connected<'a>(
    peripherals: &'a [PeripheralSnapshot],
    services: &'a [Uuid],
) -> impl Iterator<Item = &'a PeripheralSnapshot> {
    peripherals.iter().filter(|peripheral| {
        peripheral.connected
            && peripheral
                .services
                .iter()
                .any(|service| services.contains(service))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVIRONMENTAL_SENSING: &str = "0000181a-0000-1000-8000-00805f9b34fb";
    const BATTERY: &str = "0000180f-0000-1000-8000-00805f9b34fb";

    fn snapshot(identifier: &str, connected: bool, services: &[&str]) -> PeripheralSnapshot {
        PeripheralSnapshot {
            identifier: identifier.into(),
            name: None,
            connected,
            services: services
                .iter()
                .map(|s| Uuid::parse_str(s).unwrap())
                .collect(),
        }
    }

    fn identifiers<'a>(selected: impl Iterator<Item = &'a PeripheralSnapshot>) -> Vec<&'a str> {
        selected.map(|p| p.identifier.as_str()).collect()
    }

    #[test]
    fn should_select_known_by_identifier_ignoring_case() {
        let peripherals = vec![
            snapshot("AA:BB:CC:DD:EE:01", false, &[]),
            snapshot("AA:BB:CC:DD:EE:02", true, &[]),
            snapshot("AA:BB:CC:DD:EE:03", false, &[]),
        ];
        let requested = vec!["aa:bb:cc:dd:ee:03".to_string(), "AA:BB:CC:DD:EE:01".to_string()];
        assert_eq!(
            identifiers(select_known(&peripherals, &requested)),
            vec!["AA:BB:CC:DD:EE:01", "AA:BB:CC:DD:EE:03"]
        );
    }

    #[test]
    fn should_select_nothing_for_empty_identifier_list() {
        let peripherals = vec![snapshot("AA:BB:CC:DD:EE:01", true, &[BATTERY])];
        assert_eq!(select_known(&peripherals, &[]).count(), 0);
    }

    #[test]
    fn should_select_only_connected_peripherals_with_matching_service() {
        let peripherals = vec![
            snapshot("AA:BB:CC:DD:EE:01", true, &[ENVIRONMENTAL_SENSING]),
            snapshot("AA:BB:CC:DD:EE:02", false, &[ENVIRONMENTAL_SENSING]),
            snapshot("AA:BB:CC:DD:EE:03", true, &[BATTERY]),
            snapshot("AA:BB:CC:DD:EE:04", true, &[BATTERY, ENVIRONMENTAL_SENSING]),
        ];
        let services = vec![Uuid::parse_str(ENVIRONMENTAL_SENSING).unwrap()];
        assert_eq!(
            identifiers(select_connected(&peripherals, &services)),
            vec!["AA:BB:CC:DD:EE:01", "AA:BB:CC:DD:EE:04"]
        );
    }

    #[test]
    fn should_select_nothing_for_empty_service_list() {
        let peripherals = vec![snapshot("AA:BB:CC:DD:EE:01", true, &[BATTERY])];
        assert_eq!(select_connected(&peripherals, &[]).count(), 0);
    }

    #[test]
    fn should_convert_snapshot_to_device() {
        let mut peripheral = snapshot("AA:BB:CC:DD:EE:01", true, &[]);
        peripheral.name = Some("Thermometer".into());
        let device = peripheral.to_device().unwrap();
        assert_eq!(device.identifier(), "AA:BB:CC:DD:EE:01");
        assert_eq!(device.name(), Some("Thermometer"));
    }
}
