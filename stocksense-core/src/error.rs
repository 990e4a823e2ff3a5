//! Error taxonomy for the technical pipeline.

use thiserror::Error;

use crate::data::DataError;

/// Failures that abort one ticker's analysis.
///
/// Callers decide the policy: single-ticker mode reports and exits, scan mode
/// records the failure and moves on to the next ticker.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("price data unavailable: {0}")]
    DataFetch(#[from] DataError),

    #[error("insufficient data for {stage}: {rows} rows, need at least {required}")]
    InsufficientData {
        stage: &'static str,
        rows: usize,
        required: usize,
    },

    #[error("model training failed: {0}")]
    ModelTraining(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AnalysisError {
    pub fn insufficient(stage: &'static str, rows: usize, required: usize) -> Self {
        AnalysisError::InsufficientData {
            stage,
            rows,
            required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message() {
        let err = AnalysisError::insufficient("walk-forward split", 4, 6);
        assert_eq!(
            err.to_string(),
            "insufficient data for walk-forward split: 4 rows, need at least 6"
        );
    }

    #[test]
    fn data_error_converts() {
        let err: AnalysisError = DataError::SymbolNotFound {
            symbol: "NOPE".into(),
        }
        .into();
        assert!(matches!(err, AnalysisError::DataFetch(_)));
        assert!(err.to_string().contains("NOPE"));
    }
}
