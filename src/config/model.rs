//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a rota run.
///
/// This struct represents the contents of `rota.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Roster
    // =========================================================================
    /// Agents registered, in order, before anything else happens.
    /// Their ids follow this order (`A1` is the first entry).
    pub agents: Vec<AgentSeed>,

    // =========================================================================
    // Output
    // =========================================================================
    /// Where to append the audit events as NDJSON after a run.
    /// Unset means events stay in memory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,

    /// Print every agent's work history when a scenario finishes.
    #[serde(default = "default_true")]
    pub history_on_exit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agents: Vec::new(),
            events_file: None,
            history_on_exit: default_true(),
        }
    }
}

/// One roster entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSeed {
    pub email: String,
    pub name: String,
    /// Category names (e.g., `PAYMENT_RELATED`, `gold`). Parsed strictly.
    pub expertise: Vec<String>,
}
