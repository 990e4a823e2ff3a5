//! Technical signal model: CART trees, a bagged forest, walk-forward splits
//! and the train/predict facade used by the pipeline.

pub mod forest;
pub mod signal_model;
pub mod tree;
pub mod walk_forward;

pub use forest::{ForestParams, MaxFeatures, RandomForest};
pub use signal_model::{FoldReport, Prediction, SignalModel, TrainedModel};
pub use walk_forward::{create_folds, FoldSpec, WalkForwardConfig};
