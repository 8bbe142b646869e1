//! Query configuration loaded from TOML or JSON.
//!
//! ```toml
//! [face]
//! strategy = "slab-axis"   # or "boundary-equality"
//!
//! [tolerance]
//! linear = 1e-9
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use steer_kernel::{FaceStrategy, QueryOptions};
use steer_math::Tolerance;
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// TOML syntax or schema error.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to write TOML config: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// JSON syntax or schema error.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Tolerance must be finite and non-negative.
    #[error("tolerance.linear must be finite and >= 0, got {0}")]
    InvalidTolerance(f64),
}

/// Face identification settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceConfig {
    /// How the struck face is identified.
    pub strategy: FaceStrategy,
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Face identification settings.
    pub face: FaceConfig,
    /// Comparison tolerance.
    pub tolerance: Tolerance,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                log::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject tolerances that would break comparisons.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let linear = self.tolerance.linear;
        if !linear.is_finite() || linear < 0.0 {
            return Err(ConfigError::InvalidTolerance(linear));
        }
        Ok(())
    }

    /// Query options selected by this config.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            strategy: self.face.strategy,
            tolerance: self.tolerance,
        }
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.query_options(), QueryOptions::default());
    }

    #[test]
    fn parse_toml() {
        let config = Config::from_toml_str(
            r#"
            [face]
            strategy = "boundary-equality"

            [tolerance]
            linear = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.face.strategy, FaceStrategy::BoundaryEquality);
        assert_eq!(config.tolerance, Tolerance::EXACT);
    }

    #[test]
    fn parse_json() {
        let config =
            Config::from_json_str(r#"{"face": {"strategy": "slab-axis"}, "tolerance": {"linear": 1e-6}}"#)
                .unwrap();
        assert_eq!(config.face.strategy, FaceStrategy::SlabAxis);
        assert_eq!(config.tolerance.linear, 1e-6);
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(
            Config::from_toml_str("[face]\nmode = \"x\"\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn misspelled_tolerance_key_rejected() {
        assert!(matches!(
            Config::from_toml_str("[tolerance]\nlineer = 1e-6\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn negative_tolerance_rejected() {
        assert!(matches!(
            Config::from_toml_str("[tolerance]\nlinear = -1.0\n"),
            Err(ConfigError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn toml_roundtrip_preserves_strategy() {
        let mut config = Config::default();
        config.face.strategy = FaceStrategy::BoundaryEquality;
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/steer.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
