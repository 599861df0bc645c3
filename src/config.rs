//! Configuration for the IsotrakIO daemon
//!
//! Loads configuration from a TOML file with the minimal parameters needed
//! to reach the tracker: the serial port, the station label, and the
//! reconnect backoff.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub serial: SerialConfig,
    pub tracker: TrackerConfig,
    pub session: SessionConfig,
}

/// Serial port configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SerialConfig {
    /// Serial port path (e.g. "/dev/ttyUSB0"); the command-line positional
    /// argument overrides this
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
}

/// Tracked station configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Station label used in published pose lines
    pub station: String,
}

/// Session loop configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Delay between failed connection attempts, in seconds
    pub retry_interval_secs: u64,
}

impl SessionConfig {
    /// Backoff between connection attempts
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default configuration for a single Isotrak station.
    ///
    /// Suitable when no configuration file is given; the serial port still
    /// comes from the command line.
    pub fn isotrak_defaults() -> Self {
        Self {
            serial: SerialConfig {
                port: "/dev/ttyUSB0".to_string(),
                baud_rate: 115200,
            },
            tracker: TrackerConfig {
                station: "Tracker1".to_string(),
            },
            session: SessionConfig {
                retry_interval_secs: 5,
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::isotrak_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::isotrak_defaults();
        assert_eq!(config.serial.port, "/dev/ttyUSB0");
        assert_eq!(config.serial.baud_rate, 115200);
        assert_eq!(config.tracker.station, "Tracker1");
        assert_eq!(config.session.retry_interval_secs, 5);
        assert_eq!(config.session.retry_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::isotrak_defaults();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[serial]"));
        assert!(toml_string.contains("[tracker]"));
        assert!(toml_string.contains("[session]"));
        assert!(toml_string.contains("baud_rate = 115200"));
        assert!(toml_string.contains("station = \"Tracker1\""));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[serial]
port = "/dev/ttyS1"
baud_rate = 9600

[tracker]
station = "Wand"

[session]
retry_interval_secs = 2
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyS1");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.tracker.station, "Wand");
        assert_eq!(config.session.retry_interval_secs, 2);
    }
}
