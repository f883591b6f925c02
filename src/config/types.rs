//! Configuration constants and defaults for rota.

/// File name looked up in the current directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "rota.yaml";

// Default value functions for serde
pub(crate) fn default_true() -> bool {
    true
}
