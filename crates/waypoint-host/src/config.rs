//! Configuration loading and typed config structures for the host harness.
//!
//! The configuration lives in `waypoint-config.yaml` in the working
//! directory. A missing file means defaults. Environment variables are
//! applied on top once logging is up, so a bad override gets reported:
//!
//! - `WAYPOINT_CONTROL_PANEL_PORT` overrides `host.control_panel_port`

use std::path::Path;

use serde::Deserialize;
use tracing::warn;
use waypoint_exposer::HostConfig;

/// Environment variable overriding the base port.
pub const PORT_ENV_VAR: &str = "WAYPOINT_CONTROL_PANEL_PORT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HarnessConfig {
    /// Values the simulated host hands to the plugin.
    #[serde(default)]
    pub host: HostSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarnessConfig {
    /// Load configuration from a YAML file. Overrides are applied
    /// separately with [`apply_overrides`](Self::apply_overrides).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from `lookup`, normally the process environment.
    ///
    /// An override that is not an integer is logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(PORT_ENV_VAR) {
            match raw.trim().parse::<i64>() {
                Ok(port) => self.host.control_panel_port = Some(port),
                Err(e) => warn!(
                    var = PORT_ENV_VAR,
                    value = %raw,
                    error = %e,
                    "Ignoring non-integer port override"
                ),
            }
        }
    }
}

/// What the simulated host reports to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostSettings {
    /// The host's control panel port. The waypoint endpoint listens on
    /// this plus 3. `null` leaves the endpoint disabled.
    #[serde(default = "default_control_panel_port")]
    pub control_panel_port: Option<i64>,

    /// Whether the world counts as loaded at startup.
    #[serde(default = "default_world_ready")]
    pub world_ready: bool,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            control_panel_port: default_control_panel_port(),
            world_ready: default_world_ready(),
        }
    }
}

impl HostConfig for HostSettings {
    fn base_port(&self) -> Option<i64> {
        self.control_panel_port
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    /// (trace, debug, info, warn, error, or a full directive).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
const fn default_control_panel_port() -> Option<i64> {
    Some(8080)
}

const fn default_world_ready() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HarnessConfig::default();
        assert_eq!(config.host.base_port(), Some(8080));
        assert!(config.host.world_ready);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
host:
  control_panel_port: 26900
  world_ready: false

logging:
  level: debug
  json: true
";
        let config = HarnessConfig::parse(yaml).unwrap();
        assert_eq!(config.host.control_panel_port, Some(26900));
        assert!(!config.host.world_ready);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_partial_yaml_uses_defaults() {
        let config = HarnessConfig::parse("logging:\n  level: warn\n").unwrap();
        assert_eq!(config.host, HostSettings::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn null_port_disables_endpoint() {
        let config = HarnessConfig::parse("host:\n  control_panel_port: null\n").unwrap();
        assert_eq!(config.host.base_port(), None);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            HarnessConfig::parse("host: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn env_override_replaces_port() {
        let mut config = HarnessConfig::default();
        config.apply_overrides(|key| (key == PORT_ENV_VAR).then(|| String::from(" 9000 ")));
        assert_eq!(config.host.base_port(), Some(9000));
    }

    #[test]
    fn garbage_override_is_ignored() {
        let mut config = HarnessConfig::default();
        config.apply_overrides(|_| Some(String::from("eighty")));
        assert_eq!(config.host.base_port(), Some(8080));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = HarnessConfig::from_file(Path::new("/nonexistent/waypoint-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
