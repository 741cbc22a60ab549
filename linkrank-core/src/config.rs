//! Configuration management for `linkrank-core`.
//!
//! This module defines the engine configuration and the fixed fusion weights
//! derived from it. It handles (de)serialization of YAML configurations and
//! provides utilities for loading, merging, and validating these configs.
//!
//! Every optional field falls back to a documented default, so an empty user
//! file is a valid configuration.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::LinkrankError;
use crate::vocab::{DEFAULT_ENGINE_NAME, DEFAULT_ORDERING, FOAF_NAME};

/// Default ratio for disambiguation signals (name match and relatedness).
pub const DEFAULT_DISAMBIGUATION_RATIO: f64 = 2.0;

/// Default ratio for the upstream confidence of a suggestion.
pub const DEFAULT_CONFIDENCE_RATIO: f64 = 1.0;

/// Ratios from which the fusion weights are derived.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct WeightConfig {
    /// Relative importance of the disambiguation signals (default: 2.0).
    pub disambiguation_ratio: Option<f64>,
    /// Relative importance of the original confidence (default: 1.0).
    pub confidence_ratio: Option<f64>,
}

/// Names of the entity record fields the engine reads.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldConfig {
    /// Literal field holding the entity's name (default: `foaf:name`).
    pub name: Option<String>,
}

/// Top-level configuration of the disambiguation engine.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct DisambiguationConfig {
    /// Identity recorded as contributing engine on write-back.
    pub engine_name: Option<String>,
    /// Position of the engine in a host enhancement chain; lower runs later.
    pub ordering: Option<i32>,
    #[serde(default)]
    pub weights: WeightConfig,
    #[serde(default)]
    pub fields: FieldConfig,
}

/// Normalized fusion weights: `disambiguation + confidence == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// `D / (D + C)`, applied to the name-match and relatedness scores.
    pub disambiguation: f64,
    /// `C / (D + C)`, applied to the original confidence.
    pub confidence: f64,
}

impl Weights {
    /// Derives the weights from a pair of ratios.
    pub fn from_ratios(disambiguation_ratio: f64, confidence_ratio: f64) -> Result<Self, LinkrankError> {
        if !disambiguation_ratio.is_finite() || !confidence_ratio.is_finite() {
            return Err(LinkrankError::InvalidWeights(format!(
                "ratios must be finite (got {} and {})",
                disambiguation_ratio, confidence_ratio
            )));
        }
        if disambiguation_ratio < 0.0 || confidence_ratio < 0.0 {
            return Err(LinkrankError::InvalidWeights(format!(
                "ratios must not be negative (got {} and {})",
                disambiguation_ratio, confidence_ratio
            )));
        }
        let total = disambiguation_ratio + confidence_ratio;
        if total <= 0.0 {
            return Err(LinkrankError::InvalidWeights(
                "at least one ratio must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            disambiguation: disambiguation_ratio / total,
            confidence: confidence_ratio / total,
        })
    }
}

impl Default for Weights {
    fn default() -> Self {
        let total = DEFAULT_DISAMBIGUATION_RATIO + DEFAULT_CONFIDENCE_RATIO;
        Self {
            disambiguation: DEFAULT_DISAMBIGUATION_RATIO / total,
            confidence: DEFAULT_CONFIDENCE_RATIO / total,
        }
    }
}

impl DisambiguationConfig {
    /// Loads a configuration from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading disambiguation config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: DisambiguationConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads the defaults embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default disambiguation config from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: DisambiguationConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default config")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configured ratios yield usable weights and that the
    /// configured names are not blank.
    pub fn validate(&self) -> Result<(), LinkrankError> {
        self.weights()?;
        if let Some(name) = &self.engine_name {
            if name.trim().is_empty() {
                return Err(LinkrankError::InvalidConfig(
                    "`engine_name` must not be empty".to_string(),
                ));
            }
        }
        if let Some(field) = &self.fields.name {
            if field.trim().is_empty() {
                return Err(LinkrankError::InvalidConfig(
                    "`fields.name` must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn engine_name(&self) -> &str {
        self.engine_name.as_deref().unwrap_or(DEFAULT_ENGINE_NAME)
    }

    pub fn ordering(&self) -> i32 {
        self.ordering.unwrap_or(DEFAULT_ORDERING)
    }

    pub fn name_field(&self) -> &str {
        self.fields.name.as_deref().unwrap_or(FOAF_NAME)
    }

    /// The fusion weights for this configuration.
    pub fn weights(&self) -> Result<Weights, LinkrankError> {
        Weights::from_ratios(
            self.weights
                .disambiguation_ratio
                .unwrap_or(DEFAULT_DISAMBIGUATION_RATIO),
            self.weights.confidence_ratio.unwrap_or(DEFAULT_CONFIDENCE_RATIO),
        )
    }

    /// Renders the configuration with every default filled in.
    pub fn to_yaml(&self) -> Result<String, LinkrankError> {
        let resolved = DisambiguationConfig {
            engine_name: Some(self.engine_name().to_string()),
            ordering: Some(self.ordering()),
            weights: WeightConfig {
                disambiguation_ratio: Some(
                    self.weights
                        .disambiguation_ratio
                        .unwrap_or(DEFAULT_DISAMBIGUATION_RATIO),
                ),
                confidence_ratio: Some(self.weights.confidence_ratio.unwrap_or(DEFAULT_CONFIDENCE_RATIO)),
            },
            fields: FieldConfig {
                name: Some(self.name_field().to_string()),
            },
        };
        Ok(serde_yml::to_string(&resolved)?)
    }
}

/// Overlays user-provided settings on the defaults, field by field.
pub fn merge_config(
    default_config: DisambiguationConfig,
    user_config: Option<DisambiguationConfig>,
) -> DisambiguationConfig {
    let mut merged = default_config;

    if let Some(user) = user_config {
        if let Some(name) = user.engine_name {
            debug!("Overriding engine name with user value: {}", name);
            merged.engine_name = Some(name);
        }
        if let Some(ordering) = user.ordering {
            debug!("Overriding ordering with user value: {}", ordering);
            merged.ordering = Some(ordering);
        }
        if let Some(ratio) = user.weights.disambiguation_ratio {
            debug!("Overriding disambiguation ratio with user value: {}", ratio);
            merged.weights.disambiguation_ratio = Some(ratio);
        }
        if let Some(ratio) = user.weights.confidence_ratio {
            debug!("Overriding confidence ratio with user value: {}", ratio);
            merged.weights.confidence_ratio = Some(ratio);
        }
        if let Some(field) = user.fields.name {
            debug!("Overriding name field with user value: {}", field);
            merged.fields.name = Some(field);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_split_two_to_one() {
        let w = Weights::default();
        assert!((w.disambiguation - 2.0 / 3.0).abs() < 1e-12);
        assert!((w.confidence - 1.0 / 3.0).abs() < 1e-12);
        assert!((w.disambiguation + w.confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_ratios_rejects_bad_input() {
        assert!(Weights::from_ratios(0.0, 0.0).is_err());
        assert!(Weights::from_ratios(-1.0, 2.0).is_err());
        assert!(Weights::from_ratios(f64::NAN, 1.0).is_err());
        assert!(Weights::from_ratios(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_from_ratios_allows_one_zero_ratio() {
        let w = Weights::from_ratios(0.0, 3.0).unwrap();
        assert_eq!(w.disambiguation, 0.0);
        assert_eq!(w.confidence, 1.0);
    }

    #[test]
    fn test_embedded_defaults_match_constants() {
        let config = DisambiguationConfig::load_default().unwrap();
        assert_eq!(config.engine_name(), DEFAULT_ENGINE_NAME);
        assert_eq!(config.ordering(), DEFAULT_ORDERING);
        assert_eq!(config.name_field(), FOAF_NAME);
        assert_eq!(config.weights().unwrap(), Weights::default());
    }

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        let config = DisambiguationConfig::default();
        assert_eq!(config.engine_name(), DEFAULT_ENGINE_NAME);
        assert_eq!(config.weights().unwrap(), Weights::default());
    }

    #[test]
    fn test_merge_overrides_only_provided_fields() {
        let defaults = DisambiguationConfig::load_default().unwrap();
        let user = DisambiguationConfig {
            weights: WeightConfig {
                disambiguation_ratio: None,
                confidence_ratio: Some(2.0),
            },
            ..Default::default()
        };
        let merged = merge_config(defaults, Some(user));
        assert_eq!(merged.weights.disambiguation_ratio, Some(2.0));
        assert_eq!(merged.weights.confidence_ratio, Some(2.0));
        assert_eq!(merged.engine_name(), DEFAULT_ENGINE_NAME);
        let w = merged.weights().unwrap();
        assert!((w.disambiguation - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_blank_name_field() {
        let config = DisambiguationConfig {
            fields: FieldConfig {
                name: Some("  ".to_string()),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
