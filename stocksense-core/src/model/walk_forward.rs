//! Expanding-window walk-forward splits over time-ordered rows.
//!
//! The layout matches the usual time-series split: the last
//! `n_folds * test_size` rows are cut into consecutive test windows and every
//! fold trains on all rows before its window.
//!
//! - Fold 0: train = [0 .. n - k*t), test = next t rows
//! - Fold 1: train grows by t, test = the following t rows
//! - etc.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkForwardConfig {
    pub n_folds: usize,
}

impl Default for WalkForwardConfig {
    fn default() -> Self {
        Self { n_folds: 5 }
    }
}

impl WalkForwardConfig {
    /// Rows needed for every fold to have a non-empty train and test window.
    pub fn min_rows(&self) -> usize {
        self.n_folds + 1
    }
}

/// Bar index ranges for one fold. Ends are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldSpec {
    pub fold_index: usize,
    pub train_start: usize,
    pub train_end: usize,
    pub test_start: usize,
    pub test_end: usize,
}

impl FoldSpec {
    pub fn train_len(&self) -> usize {
        self.train_end - self.train_start
    }

    pub fn test_len(&self) -> usize {
        self.test_end - self.test_start
    }
}

pub fn create_folds(
    total_rows: usize,
    config: &WalkForwardConfig,
) -> Result<Vec<FoldSpec>, AnalysisError> {
    if config.n_folds == 0 {
        return Err(AnalysisError::InvalidInput(
            "walk-forward needs at least one fold".into(),
        ));
    }
    if total_rows < config.min_rows() {
        return Err(AnalysisError::insufficient(
            "walk-forward",
            total_rows,
            config.min_rows(),
        ));
    }

    let k = config.n_folds;
    let test_size = total_rows / (k + 1);
    let first_test = total_rows - k * test_size;

    let folds = (0..k)
        .map(|i| {
            let test_start = first_test + i * test_size;
            FoldSpec {
                fold_index: i,
                train_start: 0,
                train_end: test_start,
                test_start,
                test_end: test_start + test_size,
            }
        })
        .collect();
    Ok(folds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_folds_over_hundred_rows() {
        let folds = create_folds(100, &WalkForwardConfig::default()).unwrap();
        assert_eq!(folds.len(), 5);
        // test_size = 16, first test window starts at 20
        assert_eq!(folds[0].train_end, 20);
        assert_eq!(folds[0].test_start, 20);
        assert_eq!(folds[0].test_end, 36);
        assert_eq!(folds[4].train_end, 84);
        assert_eq!(folds[4].test_end, 100);
    }

    #[test]
    fn windows_are_contiguous_and_train_expands() {
        let folds = create_folds(253, &WalkForwardConfig { n_folds: 4 }).unwrap();
        for pair in folds.windows(2) {
            assert_eq!(pair[0].test_end, pair[1].test_start);
            assert!(pair[1].train_len() > pair[0].train_len());
        }
        for f in &folds {
            assert_eq!(f.train_end, f.test_start);
            assert!(f.test_len() > 0);
        }
        assert_eq!(folds.last().unwrap().test_end, 253);
    }

    #[test]
    fn minimum_rows() {
        let folds = create_folds(6, &WalkForwardConfig::default()).unwrap();
        assert!(folds.iter().all(|f| f.train_len() >= 1 && f.test_len() == 1));

        let err = create_folds(5, &WalkForwardConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientData { rows: 5, required: 6, .. }
        ));
    }

    #[test]
    fn zero_folds_rejected() {
        assert!(matches!(
            create_folds(50, &WalkForwardConfig { n_folds: 0 }),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}
