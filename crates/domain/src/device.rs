//! Device: a peripheral reported by the adapter or read from the host's
//! bonded set.

use crate::error::ValidationError;

/// A peripheral as seen by the bridge.
///
/// Immutable once built: fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    identifier: String,
    name: Option<String>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Stable identifier (a MAC address on most platforms).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Advertised name, if the device exposes one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] when `identifier` is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.identifier.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    identifier: Option<String>,
    name: Option<String>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the name from an optional value, as returned by most stacks.
    #[must_use]
    pub fn maybe_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] if `identifier` is missing
    /// or empty.
    pub fn build(self) -> Result<Device, ValidationError> {
        let device = Device {
            identifier: self.identifier.unwrap_or_default(),
            name: self.name,
        };
        device.validate()?;
        Ok(device)
    }
}
