//! Configuration for huffzip

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub read_buffer_size: usize,
    pub max_input_size: u64,
    pub verify: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: 64 * 1024,
            max_input_size: 100 * 1024 * 1024, // 100 MB
            verify: false,
        }
    }
}

impl CompressionConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, CompressError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| CompressError::Config(e.to_string()))?;
        if config.read_buffer_size == 0 {
            return Err(CompressError::Config("read_buffer_size must be non-zero".into()));
        }
        Ok(config)
    }

    pub fn check_size(&self, size: u64) -> Result<(), CompressError> {
        if size > self.max_input_size {
            return Err(CompressError::InputTooLarge {
                size,
                limit: self.max_input_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CompressionConfig::from_json(r#"{"verify": true}"#).unwrap();
        assert!(config.verify);
        assert_eq!(config.read_buffer_size, 64 * 1024);
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let result = CompressionConfig::from_json(r#"{"read_buffer_size": 0}"#);
        assert!(matches!(result, Err(CompressError::Config(_))));
    }

    #[test]
    fn test_bad_json() {
        assert!(CompressionConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_size_limit() {
        let config = CompressionConfig {
            max_input_size: 10,
            ..CompressionConfig::default()
        };
        assert!(config.check_size(10).is_ok());
        assert!(matches!(
            config.check_size(11),
            Err(CompressError::InputTooLarge { size: 11, limit: 10 })
        ));
    }
}
