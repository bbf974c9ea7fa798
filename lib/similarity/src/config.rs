//! Matcher configuration
//!
//! Declares how strict the duplicate check is. Loaded from JSON (all fields
//! optional) and validated before a matcher is built.

use serde::{Deserialize, Serialize};

/// Similarity a candidate must strictly exceed to count as a match
pub const DEFAULT_THRESHOLD: f64 = 90.0;

/// Configuration for [`SimilarityMatcher`](crate::SimilarityMatcher)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatcherConfig {
    /// Exclusive lower bound on the similarity score (0.0 to 100.0)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Maximum number of ranked matches to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            limit: None,
        }
    }
}

impl MatcherConfig {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatcherConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    /// - Threshold must be finite and within `[0, 100]`
    /// - Limit, when set, must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || !(0.0..=100.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }

        if self.limit == Some(0) {
            return Err(ConfigError::ZeroLimit);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration loading and validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Threshold {0} must be a number between 0 and 100")]
    InvalidThreshold(f64),

    #[error("Limit must be greater than zero")]
    ZeroLimit,

    #[error("Invalid matcher configuration: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatcherConfig::default();
        assert_eq!(config.threshold, 90.0);
        assert_eq!(config.limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_defaults() {
        let config = MatcherConfig::from_json("{}").unwrap();
        assert_eq!(config, MatcherConfig::default());

        let config = MatcherConfig::from_json(r#"{"threshold": 75, "limit": 3}"#).unwrap();
        assert_eq!(config.threshold, 75.0);
        assert_eq!(config.limit, Some(3));
    }

    #[test]
    fn test_invalid_threshold() {
        for threshold in [-1.0, 100.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                MatcherConfig::new(threshold).validate(),
                Err(ConfigError::InvalidThreshold(_))
            ));
        }
        assert!(MatcherConfig::new(0.0).validate().is_ok());
        assert!(MatcherConfig::new(100.0).validate().is_ok());
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(
            MatcherConfig::default().with_limit(0).validate(),
            Err(ConfigError::ZeroLimit)
        );
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            MatcherConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            MatcherConfig::from_json(r#"{"threshold": 150}"#),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = MatcherConfig::new(85.0).with_limit(5);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MatcherConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
