//! Configuration for huffcode

use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "HUFFCODE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub max_input_size: u64,
    pub io_buffer_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            io_buffer_size: 64 * 1024,
        }
    }
}

impl CodecConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CodecError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| CodecError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$HUFFCODE_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.io_buffer_size == 0 {
            return Err(CodecError::Config("io_buffer_size must be non-zero".into()));
        }
        // header counts are u32
        if self.max_input_size > u64::from(u32::MAX) {
            return Err(CodecError::Config(format!(
                "max_input_size {} exceeds the 32-bit header limit",
                self.max_input_size
            )));
        }
        Ok(())
    }
}
