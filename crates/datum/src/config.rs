//! Codec configuration.
//!
//! Ceilings applied to untrusted input before and during decoding.

use datum_core::canonical::DEFAULT_MAX_DEPTH;
use datum_core::DecodeLimits;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default ceiling on encoded input size (1 MiB).
pub const DEFAULT_MAX_INPUT_LEN: usize = 1 << 20;

/// Configuration for a [`DatumCodec`](crate::DatumCodec).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Maximum container nesting accepted when decoding.
    pub max_depth: usize,
    /// Maximum encoded input size in bytes.
    pub max_input_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl CodecConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject ceilings that would refuse every input.
    pub fn validate(&self) -> Result<()> {
        if self.max_input_len == 0 {
            return Err(Error::InvalidConfig("max_input_len must be positive".into()));
        }
        Ok(())
    }

    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits {
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.max_depth, 256);
        assert_eq!(config.max_input_len, 1024 * 1024);
        assert!(config.validate().is_ok());
        assert_eq!(config.decode_limits(), DecodeLimits::default());
    }

    #[test]
    fn test_from_json_partial() {
        let config = CodecConfig::from_json(r#"{ "max_depth": 8 }"#).unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.max_input_len, DEFAULT_MAX_INPUT_LEN);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            CodecConfig::from_json(r#"{ "max_input_len": 0 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            CodecConfig::from_json(r#"{ "depth": 3 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            CodecConfig::from_json("not json"),
            Err(Error::InvalidConfig(_))
        ));
    }
}
