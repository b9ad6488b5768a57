//! Resolver configuration.
//!
//! The defaults are the empirically tuned values carried over from field
//! data. Treat them as calibrated, not arbitrary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable limits for the resolution pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// How much of the body text the content tier scans (chars). Bounding
    /// this keeps a forwarded email's quoted institution from outranking
    /// the sender's own.
    pub content_scan_limit: usize,

    /// A subject-line database match is preferred over the sender only when
    /// the resolved name is longer than this (chars).
    pub subject_priority_min_len: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            content_scan_limit: 1000,
            subject_priority_min_len: 20,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would disable whole tiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_scan_limit == 0 {
            return Err(ConfigError::Invalid {
                message: "content_scan_limit must be non-zero".to_string(),
            });
        }
        if self.subject_priority_min_len == 0 {
            return Err(ConfigError::Invalid {
                message: "subject_priority_min_len must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_the_tuned_values() {
        let config = ResolverConfig::default();
        assert_eq!(config.content_scan_limit, 1000);
        assert_eq!(config.subject_priority_min_len, 20);
    }

    #[test]
    fn default_config_validates() {
        assert!(ResolverConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_limits_rejected() {
        let config = ResolverConfig {
            content_scan_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "content_scan_limit = 500").unwrap();
        let config = ResolverConfig::from_toml_path(file.path()).unwrap();
        assert_eq!(config.content_scan_limit, 500);
        // Unset keys keep their defaults.
        assert_eq!(config.subject_priority_min_len, 20);
    }

    #[test]
    fn unknown_keys_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "no_such_key = 1").unwrap();
        assert!(ResolverConfig::from_toml_path(file.path()).is_err());
    }

    #[test]
    fn missing_file_errors() {
        let err = ResolverConfig::from_toml_path(Path::new("/nonexistent/nivaran.toml"));
        assert!(err.is_err());
    }
}
