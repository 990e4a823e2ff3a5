//! Technical pipeline: bars -> features -> labels -> train -> predict.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::Bar;
use crate::error::AnalysisError;
use crate::features::FeatureBuilder;
use crate::labels::{LabelBuilder, LabeledRow};
use crate::model::{FoldReport, Prediction, SignalModel};

/// Everything the technical half of an analysis produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalReport {
    pub prediction: Prediction,
    pub folds: Vec<FoldReport>,
    pub rows: Vec<LabeledRow>,
}

#[derive(Default)]
pub struct TechnicalPipeline {
    pub features: FeatureBuilder,
    pub labels: LabelBuilder,
    pub model: SignalModel,
}

impl TechnicalPipeline {
    pub fn new(features: FeatureBuilder, labels: LabelBuilder, model: SignalModel) -> Self {
        Self {
            features,
            labels,
            model,
        }
    }

    /// Run the full technical chain over one symbol's bars.
    ///
    /// The model is retrained from scratch on every call.
    pub fn run(&self, symbol: &str, bars: &[Bar]) -> Result<TechnicalReport, AnalysisError> {
        let features = self.features.build(bars);
        if features.is_empty() {
            return Err(AnalysisError::insufficient(
                "features",
                bars.len(),
                self.features.min_bars(),
            ));
        }

        let rows = self.labels.build(&features);
        let trained = self.model.train(&rows)?;
        let prediction = self.model.predict(&rows, &trained)?;

        info!(
            symbol,
            bars = bars.len(),
            rows = rows.len(),
            signal = %prediction.signal,
            confidence = prediction.confidence,
            "technical signal"
        );
        Ok(TechnicalReport {
            prediction,
            folds: trained.fold_reports().to_vec(),
            rows,
        })
    }
}
