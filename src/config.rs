// Tue Jan 13 2026 - Alex

use crate::accessor::DEFAULT_MAX_TRANSFER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page granularity of the in-process simulated target.
    pub page_size: usize,
    /// Largest single transfer a memory accessor hands to the target.
    pub max_transfer_size: usize,
    /// Address a loaded file is presented at when none is given.
    pub default_base_address: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 0x1000,
            max_transfer_size: DEFAULT_MAX_TRANSFER,
            default_base_address: 0,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_transfer_size(mut self, size: usize) -> Self {
        self.max_transfer_size = size;
        self
    }

    pub fn with_default_base_address(mut self, address: u64) -> Self {
        self.default_base_address = address;
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.page_size.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "page_size {} is not a power of two",
                self.page_size
            )));
        }
        if self.max_transfer_size == 0 {
            return Err(ConfigError::Invalid("max_transfer_size must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 0x1000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accessor.json");
        let config = Config::new().with_page_size(0x200).with_default_base_address(0x400000);
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "log_level": "debug" }"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.page_size, 0x1000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::new().with_page_size(3000).validate().is_err());
        assert!(Config::new().with_max_transfer_size(0).validate().is_err());
    }
}
