//! Quality Configuration
//!
//! Thresholds and score weights for the quality-flag evaluator.
//!
//! # Score
//!
//! ```text
//! score = clamp(1
//!     - missing_weight           * mean(missing_share)
//!     - constant_penalty         * has_constant_columns
//!     - id_duplicate_penalty     * has_suspicious_id_duplicates
//!     - high_cardinality_penalty * has_high_cardinality_categoricals, 0, 1)
//! ```
//!
//! All weights are non-negative, so the score never rises when a flag turns
//! on or missingness grows.
//!
//! # Example
//!
//! ```
//! use eda_cli::profile::QualityConfig;
//!
//! let config = QualityConfig::by_name("strict").unwrap().with_constant_penalty(0.3);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Naming rule for identifier-like columns.
///
/// A name is split into tokens at `_`, `-`, `.`, whitespace and camel-case
/// boundaries; it matches when any lowercased token is listed in `tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdNameRule {
    /// Lowercase tokens that mark an identifier
    pub tokens: Vec<String>,
}

impl Default for IdNameRule {
    fn default() -> Self {
        Self {
            tokens: ["id", "uid", "uuid", "guid", "identifier"]
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
        }
    }
}

impl IdNameRule {
    /// Rule matching only the given tokens.
    #[must_use]
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| t.into().to_lowercase())
                .collect(),
        }
    }

    /// Add a token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.tokens.push(token.into().to_lowercase());
        self
    }

    /// Whether `token` (already lowercased) is an identifier token.
    pub fn matches_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

/// Thresholds and weights for [`compute_quality_flags_with`].
///
/// [`compute_quality_flags_with`]: super::compute_quality_flags_with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Preset name for display
    pub name: String,
    /// `unique / count` above which a text column is high-cardinality
    /// (default: 0.9)
    pub high_cardinality_ratio: f64,
    /// `unique / n_rows` at or above which the only such non-numeric column is an
    /// identifier candidate (default: 0.95)
    pub near_unique_ratio: f64,
    /// Naming rule for identifier candidates
    pub id_names: IdNameRule,
    /// Weight of the mean missing share (default: 1.0)
    pub missing_weight: f64,
    /// Deduction when a constant column exists (default: 0.1)
    pub constant_penalty: f64,
    /// Deduction when an identifier has duplicates (default: 0.2)
    pub id_duplicate_penalty: f64,
    /// Deduction when a high-cardinality text column exists (default: 0.05)
    pub high_cardinality_penalty: f64,
    /// Row count below which `too_few_rows` is set (default: 100)
    pub min_rows: usize,
    /// Column count above which `too_many_columns` is set (default: 100)
    pub max_columns: usize,
    /// Largest column share above which `too_many_missing` is set
    /// (default: 0.5)
    pub max_missing_share: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            high_cardinality_ratio: 0.9,
            near_unique_ratio: 0.95,
            id_names: IdNameRule::default(),
            missing_weight: 1.0,
            constant_penalty: 0.1,
            id_duplicate_penalty: 0.2,
            high_cardinality_penalty: 0.05,
            min_rows: 100,
            max_columns: 100,
            max_missing_share: 0.5,
        }
    }
}

impl QualityConfig {
    /// Create a config with default values and a custom name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get a preset by name
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            "lenient" => Some(Self::lenient()),
            _ => None,
        }
    }

    /// List available preset names
    #[must_use]
    pub fn available_presets() -> Vec<&'static str> {
        vec!["default", "strict", "lenient"]
    }

    /// Heavier deductions, for datasets headed to production models.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            name: "strict".to_string(),
            high_cardinality_ratio: 0.8,
            missing_weight: 2.0,
            constant_penalty: 0.2,
            id_duplicate_penalty: 0.4,
            high_cardinality_penalty: 0.1,
            max_missing_share: 0.2,
            ..Self::default()
        }
    }

    /// Lighter deductions, for early exploration of raw exports.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            name: "lenient".to_string(),
            high_cardinality_ratio: 0.95,
            missing_weight: 0.5,
            constant_penalty: 0.05,
            id_duplicate_penalty: 0.1,
            high_cardinality_penalty: 0.0,
            max_missing_share: 0.8,
            ..Self::default()
        }
    }

    /// Load a config from JSON; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values fail
    /// [`QualityConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the high-cardinality ratio
    #[must_use]
    pub fn with_high_cardinality_ratio(mut self, ratio: f64) -> Self {
        self.high_cardinality_ratio = ratio;
        self
    }

    /// Set the near-unique ratio
    #[must_use]
    pub fn with_near_unique_ratio(mut self, ratio: f64) -> Self {
        self.near_unique_ratio = ratio;
        self
    }

    /// Set the identifier naming rule
    #[must_use]
    pub fn with_id_names(mut self, rule: IdNameRule) -> Self {
        self.id_names = rule;
        self
    }

    /// Set the missing-share weight
    #[must_use]
    pub fn with_missing_weight(mut self, weight: f64) -> Self {
        self.missing_weight = weight;
        self
    }

    /// Set the constant-column deduction
    #[must_use]
    pub fn with_constant_penalty(mut self, penalty: f64) -> Self {
        self.constant_penalty = penalty;
        self
    }

    /// Set the duplicate-identifier deduction
    #[must_use]
    pub fn with_id_duplicate_penalty(mut self, penalty: f64) -> Self {
        self.id_duplicate_penalty = penalty;
        self
    }

    /// Set the high-cardinality deduction
    #[must_use]
    pub fn with_high_cardinality_penalty(mut self, penalty: f64) -> Self {
        self.high_cardinality_penalty = penalty;
        self
    }

    /// Check that weights are finite and non-negative and ratios lie in
    /// `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("missing_weight", self.missing_weight),
            ("constant_penalty", self.constant_penalty),
            ("id_duplicate_penalty", self.id_duplicate_penalty),
            ("high_cardinality_penalty", self.high_cardinality_penalty),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_config(format!(
                    "{} must be a finite non-negative number, got {}",
                    field, value
                )));
            }
        }

        let ratios = [
            ("high_cardinality_ratio", self.high_cardinality_ratio),
            ("near_unique_ratio", self.near_unique_ratio),
            ("max_missing_share", self.max_missing_share),
        ];
        for (field, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_config(format!(
                    "{} must be within [0, 1], got {}",
                    field, value
                )));
            }
        }

        if self.id_names.tokens.iter().any(String::is_empty) {
            return Err(Error::invalid_config("id_names.tokens must not be empty strings"));
        }

        Ok(())
    }
}
