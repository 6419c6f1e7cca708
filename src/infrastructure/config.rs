use crate::domain::{
    config::GpsReadConfig,
    error::{GpsReadError, GpsReadResult},
};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration manager
pub struct ConfigManager {
    global_config_path: Option<PathBuf>,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> Self {
        Self {
            global_config_path: Self::get_global_config_path(),
            project_config_path: Self::find_project_config_path(),
        }
    }

    /// Manager with explicit file locations, mainly for tests.
    pub fn with_paths(global: Option<PathBuf>, project: Option<PathBuf>) -> Self {
        Self {
            global_config_path: global,
            project_config_path: project,
        }
    }

    /// Load configuration from files
    ///
    /// Defaults first, then the global file, then the project file. Values
    /// present in a later file override earlier ones.
    pub fn load_config(&self) -> GpsReadResult<GpsReadConfig> {
        let mut config = GpsReadConfig::default();

        for path in [&self.global_config_path, &self.project_config_path]
            .into_iter()
            .flatten()
        {
            if path.exists() {
                let layer = Self::load_config_from_path(path)?;
                config.global = layer.global;
                if layer.serial.port.is_some() {
                    config.serial.port = layer.serial.port;
                }
            }
        }

        Ok(config)
    }

    /// Global configuration path
    fn get_global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("gpsread").join("config.toml"))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".gpsread").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(path: &Path) -> GpsReadResult<GpsReadConfig> {
        let content = fs::read_to_string(path).map_err(|e| GpsReadError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| GpsReadError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_files_give_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_paths(
            Some(temp_dir.path().join("absent.toml")),
            None,
        );

        let config = manager.load_config().unwrap();
        assert_eq!(config.global.log_level, "info");
        assert!(config.serial.port.is_none());
    }

    #[test]
    fn test_project_overrides_global() {
        let temp_dir = TempDir::new().unwrap();
        let global = write(
            &temp_dir,
            "global.toml",
            "[global]\nlog_level = \"warn\"\n[serial]\nport = \"/dev/ttyS0\"\n",
        );
        let project = write(&temp_dir, "project.toml", "[serial]\nport = \"/dev/ttyACM0\"\n");

        let manager = ConfigManager::with_paths(Some(global), Some(project));
        let config = manager.load_config().unwrap();

        assert_eq!(config.serial.port.as_deref(), Some("/dev/ttyACM0"));
        // project file has no [global] table, so it falls back to the default
        assert_eq!(config.global.log_level, "info");
    }

    #[test]
    fn test_global_port_kept_when_project_silent() {
        let temp_dir = TempDir::new().unwrap();
        let global = write(&temp_dir, "global.toml", "[serial]\nport = \"/dev/ttyS0\"\n");
        let project = write(&temp_dir, "project.toml", "[global]\nlog_level = \"debug\"\n");

        let manager = ConfigManager::with_paths(Some(global), Some(project));
        let config = manager.load_config().unwrap();

        assert_eq!(config.serial.port.as_deref(), Some("/dev/ttyS0"));
        assert_eq!(config.global.log_level, "debug");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "broken.toml", "[serial\nport = ");

        let result = ConfigManager::load_config_from_path(&path);
        assert!(matches!(result, Err(GpsReadError::Config { .. })));
    }
}
