//! Configuration structures for the sentiment engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Main configuration for the sentiment engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text blend weights.
    pub blend: BlendConfig,
    /// Lexical model limits.
    pub lexicon: LexiconConfig,
    /// Macro indicator weights.
    pub market: MarketWeights,
    /// Institutional and insider thresholds.
    pub ownership: OwnershipConfig,
    /// Batch summary defaults.
    pub summary: SummaryConfig,
}

impl Config {
    /// Parse a configuration from JSON. Missing sections take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.blend.validate()?;
        self.lexicon.validate()?;
        self.market.validate()?;
        self.ownership.validate()?;
        self.summary.validate()
    }
}

fn check_weight(name: &str, weight: f64) -> Result<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidWeight {
            name: name.to_string(),
            weight,
        })
    }
}

/// Weights for blending the two lexical models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    /// Weight of the social-text model compound score.
    pub social_weight: f64,
    /// Weight of the general-purpose model polarity.
    pub general_weight: f64,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            social_weight: 0.6,
            general_weight: 0.4,
        }
    }
}

impl BlendConfig {
    pub fn validate(&self) -> Result<()> {
        check_weight("social", self.social_weight)?;
        check_weight("general", self.general_weight)?;
        let sum = self.social_weight + self.general_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::config(format!("blend weights must sum to 1, got {sum}")));
        }
        Ok(())
    }
}

/// Limits shared by the lexical models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Inputs longer than this (in chars) are rejected by the models.
    pub max_input_chars: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 10_000,
        }
    }
}

impl LexiconConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_input_chars == 0 {
            return Err(Error::config("max_input_chars must be positive"));
        }
        Ok(())
    }
}

/// Weights of the macro market indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketWeights {
    /// Volatility index.
    pub vix: f64,
    /// Advance/decline breadth.
    pub advance_decline: f64,
    /// Put/call ratio.
    pub put_call: f64,
    /// SPY-based breadth.
    pub spy_breadth: f64,
}

impl Default for MarketWeights {
    fn default() -> Self {
        Self {
            vix: 0.3,
            advance_decline: 0.3,
            put_call: 0.2,
            spy_breadth: 0.2,
        }
    }
}

impl MarketWeights {
    pub fn validate(&self) -> Result<()> {
        check_weight("vix", self.vix)?;
        check_weight("advance_decline", self.advance_decline)?;
        check_weight("put_call", self.put_call)?;
        check_weight("spy_breadth", self.spy_breadth)
    }
}

/// Thresholds for ownership-change signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnershipConfig {
    /// Label threshold for institutional holder changes.
    pub institutional_threshold: f64,
    /// Label threshold for insider buys/sells.
    pub insider_threshold: f64,
    /// Trailing window for insider trades, in days.
    pub insider_window_days: u32,
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            institutional_threshold: 0.3,
            insider_threshold: 0.2,
            insider_window_days: 90,
        }
    }
}

impl OwnershipConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, t) in [
            ("institutional_threshold", self.institutional_threshold),
            ("insider_threshold", self.insider_threshold),
        ] {
            if !(t > 0.0 && t <= 1.0) {
                return Err(Error::config(format!("{name} must be in (0, 1], got {t}")));
            }
        }
        if self.insider_window_days == 0 {
            return Err(Error::config("insider_window_days must be positive"));
        }
        Ok(())
    }
}

/// Defaults for ticker summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Default look-back window in days.
    pub window_days: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { window_days: 30 }
    }
}

impl SummaryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(Error::config("window_days must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.blend.social_weight, 0.6);
        assert_eq!(config.market.vix, 0.3);
        assert_eq!(config.ownership.insider_window_days, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json_str(r#"{"ownership": {"insider_window_days": 30}}"#).unwrap();
        assert_eq!(config.ownership.insider_window_days, 30);
        assert_eq!(config.ownership.insider_threshold, 0.2);
        assert_eq!(config.blend, BlendConfig::default());
    }

    #[test]
    fn test_blend_weights_must_sum_to_one() {
        let result = Config::from_json_str(r#"{"blend": {"social_weight": 0.7, "general_weight": 0.4}}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_negative_market_weight() {
        let mut config = Config::default();
        config.market.put_call = -0.2;
        assert!(matches!(config.validate(), Err(Error::InvalidWeight { .. })));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Config::from_json_str("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
