//! Config loading, validation, and roster seeding.

use super::model::Config;
use super::types::DEFAULT_CONFIG_FILE;
use crate::dispatch::Dispatcher;
use crate::error::{Result, RotaError};
use crate::registry::parse_expertise;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(RotaError::Config)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RotaError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the explicit `path` if given, otherwise `rota.yaml` from the
    /// current directory if present, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!(path = %fallback.display(), "using config from current directory");
            Self::load(fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| RotaError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RotaError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - every agent has a non-empty `email` and `name`
    /// - every agent has at least one expertise, and every name is a known category
    /// - emails are unique (case-sensitive, as the store keys them)
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for (index, seed) in self.agents.iter().enumerate() {
            let position = index + 1;

            if seed.email.trim().is_empty() || seed.name.trim().is_empty() {
                return Err(RotaError::Config(format!(
                    "config validation failed: agent #{} needs both email and name",
                    position
                )));
            }

            if seed.expertise.is_empty() {
                return Err(RotaError::Config(format!(
                    "config validation failed: agent '{}' has no expertise",
                    seed.email
                )));
            }

            parse_expertise(&seed.expertise).map_err(|e| {
                RotaError::Config(format!(
                    "config validation failed: agent '{}': {}",
                    seed.email, e
                ))
            })?;

            if !seen.insert(seed.email.trim()) {
                return Err(RotaError::Config(format!(
                    "config validation failed: agent email '{}' is listed more than once",
                    seed.email
                )));
            }
        }

        Ok(())
    }

    /// A dispatcher with the configured roster registered in order.
    pub fn dispatcher(&self) -> Result<Dispatcher> {
        let dispatcher = Dispatcher::new();
        for seed in &self.agents {
            let expertise = parse_expertise(&seed.expertise)?;
            dispatcher.add_agent(&seed.email, &seed.name, &expertise)?;
        }
        Ok(dispatcher)
    }
}
