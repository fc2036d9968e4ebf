//! btleplug backend configuration.

use serde::Deserialize;

/// Configuration for the btleplug-backed device adapter.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BtleplugConfig {
    /// Index of the host adapter to use, in the order the OS reports them.
    pub adapter_index: usize,
    /// When non-zero, scan for this many milliseconds before each
    /// enumeration so recently advertising peripherals are known.
    pub discovery_window_ms: u64,
}
