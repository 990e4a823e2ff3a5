//! StockSense Core: technical features, labels, the walk-forward signal
//! model and fusion with a news label.
//!
//! - Domain types (bars, signals, actions, news labels)
//! - Indicators (SMA, EMA, RSI, MACD histogram, ATR, hammer)
//! - Feature and label construction with a strict look-ahead guard
//! - Random-forest signal model trained over walk-forward folds
//! - Fusion of the technical signal with a news label
//! - Price providers (Yahoo Finance, CSV)

pub mod data;
pub mod domain;
pub mod error;
pub mod features;
pub mod fusion;
pub mod indicators;
pub mod labels;
pub mod model;
pub mod pipeline;
pub mod rng;

pub use error::AnalysisError;
pub use features::{FeatureBuilder, FeatureRow, FEATURE_NAMES};
pub use fusion::{decide, Decision};
pub use labels::{LabelBuilder, LabelThresholds, LabeledRow};
pub use model::{Prediction, SignalModel, TrainedModel};
pub use pipeline::{TechnicalPipeline, TechnicalReport};
