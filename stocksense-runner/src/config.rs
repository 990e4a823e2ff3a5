//! StockSense configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock behaviour: five years of history, 5-day labels at ±2%, a
//! 100-tree forest over five walk-forward folds, six headlines per symbol
//! and a NIFTY-50 scan universe.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stocksense_core::data::Period;
use stocksense_core::labels::{LabelBuilder, LabelThresholds};
use stocksense_core::model::{ForestParams, MaxFeatures, SignalModel, WalkForwardConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockSenseConfig {
    pub data: DataConfig,
    pub labels: LabelConfig,
    pub model: ModelConfig,
    pub news: NewsConfig,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub period: Period,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Bars ahead used for the forward return.
    pub horizon: usize,
    pub upper: f64,
    pub lower: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        let thresholds = LabelThresholds::default();
        Self {
            horizon: stocksense_core::labels::DEFAULT_HORIZON,
            upper: thresholds.upper,
            lower: thresholds.lower,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub n_folds: usize,
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let forest = ForestParams::default();
        Self {
            n_folds: WalkForwardConfig::default().n_folds,
            n_trees: forest.n_trees,
            max_depth: forest.max_depth,
            min_samples_split: forest.min_samples_split,
            seed: forest.seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub enabled: bool,
    pub max_headlines: usize,
    /// Average polarity strictly above this is POSITIVE.
    pub positive_threshold: f64,
    /// Average polarity strictly below this is NEGATIVE.
    pub negative_threshold: f64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_headlines: 6,
            positive_threshold: 0.15,
            negative_threshold: -0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Entries kept in each of the BUY and SELL rankings.
    pub top_n: usize,
    pub universe: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            universe: nifty_50(),
        }
    }
}

/// NIFTY-50 constituents as Yahoo Finance symbols.
pub fn nifty_50() -> Vec<String> {
    [
        "ADANIENT.NS", "ADANIPORTS.NS", "APOLLOHOSP.NS", "ASIANPAINT.NS",
        "AXISBANK.NS", "BAJAJ-AUTO.NS", "BAJFINANCE.NS", "BAJAJFINSV.NS",
        "BPCL.NS", "BHARTIARTL.NS", "BRITANNIA.NS", "CIPLA.NS", "COALINDIA.NS",
        "DIVISLAB.NS", "DRREDDY.NS", "EICHERMOT.NS", "GRASIM.NS", "HCLTECH.NS",
        "HDFCBANK.NS", "HDFCLIFE.NS", "HEROMOTOCO.NS", "HINDALCO.NS",
        "HINDUNILVR.NS", "ICICIBANK.NS", "ITC.NS", "INDUSINDBK.NS", "INFY.NS",
        "JSWSTEEL.NS", "KOTAKBANK.NS", "LT.NS", "M&M.NS", "MARUTI.NS",
        "NESTLEIND.NS", "NTPC.NS", "ONGC.NS", "POWERGRID.NS", "RELIANCE.NS",
        "SBIN.NS", "SUNPHARMA.NS", "TCS.NS", "TATAMOTORS.NS", "TATASTEEL.NS",
        "TECHM.NS", "TITAN.NS", "ULTRACEMCO.NS", "UPL.NS", "WIPRO.NS",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl StockSenseConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };
        let l = &self.labels;
        if l.horizon == 0 {
            return invalid("labels.horizon must be at least 1".into());
        }
        if !(l.lower.is_finite() && l.upper.is_finite()) || l.lower > l.upper {
            return invalid(format!(
                "labels.lower ({}) must not exceed labels.upper ({})",
                l.lower, l.upper
            ));
        }
        let m = &self.model;
        if m.n_folds == 0 || m.n_trees == 0 || m.max_depth == 0 {
            return invalid("model.n_folds, model.n_trees and model.max_depth must be positive".into());
        }
        if m.min_samples_split < 2 {
            return invalid("model.min_samples_split must be at least 2".into());
        }
        let n = &self.news;
        if n.negative_threshold > n.positive_threshold {
            return invalid(format!(
                "news.negative_threshold ({}) must not exceed news.positive_threshold ({})",
                n.negative_threshold, n.positive_threshold
            ));
        }
        if self.scan.top_n == 0 {
            return invalid("scan.top_n must be at least 1".into());
        }
        Ok(())
    }

    pub fn label_builder(&self) -> LabelBuilder {
        LabelBuilder::new(
            self.labels.horizon,
            LabelThresholds {
                upper: self.labels.upper,
                lower: self.labels.lower,
            },
        )
    }

    pub fn signal_model(&self) -> SignalModel {
        SignalModel::new(
            WalkForwardConfig {
                n_folds: self.model.n_folds,
            },
            ForestParams {
                n_trees: self.model.n_trees,
                max_depth: self.model.max_depth,
                min_samples_split: self.model.min_samples_split,
                min_samples_leaf: 1,
                max_features: MaxFeatures::Sqrt,
                bootstrap: true,
                seed: self.model.seed,
            },
        )
    }
}
