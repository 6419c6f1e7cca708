use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default serial device of the receiver.
#[cfg(target_os = "macos")]
pub const DEFAULT_PORT: &str = "/dev/tty.usbserial";
#[cfg(all(unix, not(target_os = "macos")))]
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
#[cfg(windows)]
pub const DEFAULT_PORT: &str = "COM1";

/// Symbol rate of NMEA-0183 receivers.
pub const DEFAULT_BAUD_RATE: u32 = 4800;

/// Upper bound on a single blocking read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// gpsread configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GpsReadConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Serial device configuration
    #[serde(default)]
    pub serial: SerialConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Serial device settings that may come from a config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Device path, platform default when absent
    #[serde(default)]
    pub port: Option<String>,
}

/// Fully resolved parameters for opening the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    pub port: String,
    pub baud_rate: u32,
    pub read_timeout: Duration,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl SerialSettings {
    pub fn with_port(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Self::default()
        }
    }
}

impl GpsReadConfig {
    /// Resolve serial settings; an explicit port wins over the config file.
    pub fn serial_settings(&self, port_override: Option<&str>) -> SerialSettings {
        match port_override.or(self.serial.port.as_deref()) {
            Some(port) => SerialSettings::with_port(port),
            None => SerialSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = GpsReadConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: GpsReadConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.global.log_level, "info");
        assert!(deserialized.serial.port.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: GpsReadConfig = toml::from_str("").unwrap();
        assert_eq!(config.global.log_level, "info");
        assert_eq!(config.serial_settings(None), SerialSettings::default());
    }

    #[test]
    fn test_serial_defaults() {
        let settings = SerialSettings::default();
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.baud_rate, 4800);
        assert_eq!(settings.read_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_port_precedence() {
        let config: GpsReadConfig = toml::from_str(
            r#"
            [serial]
            port = "/dev/ttyACM0"
            "#,
        )
        .unwrap();

        assert_eq!(config.serial_settings(None).port, "/dev/ttyACM0");
        assert_eq!(config.serial_settings(Some("/dev/ttyS1")).port, "/dev/ttyS1");
        assert_eq!(config.serial_settings(None).baud_rate, DEFAULT_BAUD_RATE);
    }
}
