//! Configuration model for rota.
//!
//! This module defines the Config struct that represents `rota.yaml`: the
//! agent roster seeded at startup plus a few run options. It supports
//! forward-compatible YAML parsing (unknown fields are ignored), sensible
//! defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{AgentSeed, Config};
pub use types::DEFAULT_CONFIG_FILE;
