//! Universe scan: analyze many symbols in parallel and rank the calls.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use stocksense_core::domain::Action;
use stocksense_core::AnalysisError;

use crate::pipeline::{Analysis, Analyzer};

/// One symbol's fused call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEntry {
    pub symbol: String,
    pub action: Action,
    pub confidence: f64,
}

impl From<&Analysis> for ScanEntry {
    fn from(a: &Analysis) -> Self {
        Self {
            symbol: a.symbol.clone(),
            action: a.decision.final_action,
            confidence: a.decision.technical_confidence,
        }
    }
}

/// Which stage of the analysis gave up on a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    DataFetch,
    InsufficientData { stage: String },
    ModelTraining,
    InvalidInput,
}

impl From<&AnalysisError> for FailureKind {
    fn from(err: &AnalysisError) -> Self {
        match err {
            AnalysisError::DataFetch(_) => FailureKind::DataFetch,
            AnalysisError::InsufficientData { stage, .. } => FailureKind::InsufficientData {
                stage: (*stage).to_string(),
            },
            AnalysisError::ModelTraining(_) => FailureKind::ModelTraining,
            AnalysisError::InvalidInput(_) => FailureKind::InvalidInput,
        }
    }
}

/// A symbol whose analysis failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanFailure {
    pub symbol: String,
    pub kind: FailureKind,
    pub error: String,
}

impl ScanFailure {
    pub fn new(symbol: impl Into<String>, err: &AnalysisError) -> Self {
        Self {
            symbol: symbol.into(),
            kind: FailureKind::from(err),
            error: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// Every successful call, in universe order.
    pub entries: Vec<ScanEntry>,
    /// BUY calls by descending confidence, at most `top_n`.
    pub top_buys: Vec<ScanEntry>,
    /// SELL calls by descending confidence, at most `top_n`.
    pub top_sells: Vec<ScanEntry>,
    pub failures: Vec<ScanFailure>,
}

/// Analyze every symbol independently on the rayon pool.
///
/// Failures are collected, never fatal to the scan.
pub fn scan(analyzer: &Analyzer, symbols: &[String], top_n: usize) -> ScanReport {
    let outcomes: Vec<Result<ScanEntry, ScanFailure>> = symbols
        .par_iter()
        .map(|symbol| {
            analyzer
                .analyze(symbol)
                .map(|a| ScanEntry::from(&a))
                .map_err(|e| ScanFailure::new(symbol.as_str(), &e))
        })
        .collect();

    let mut entries = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(entry) => entries.push(entry),
            Err(failure) => {
                warn!(
                    symbol = %failure.symbol,
                    kind = ?failure.kind,
                    error = %failure.error,
                    "skipping symbol"
                );
                failures.push(failure);
            }
        }
    }

    let report = rank(entries, failures, top_n);
    info!(
        scanned = symbols.len(),
        ok = report.entries.len(),
        failed = report.failures.len(),
        buys = report.top_buys.len(),
        sells = report.top_sells.len(),
        "scan complete"
    );
    report
}

/// Split successful entries into BUY and SELL rankings.
pub fn rank(entries: Vec<ScanEntry>, failures: Vec<ScanFailure>, top_n: usize) -> ScanReport {
    let top = |action: Action| {
        let mut picked: Vec<ScanEntry> = entries
            .iter()
            .filter(|e| e.action == action)
            .cloned()
            .collect();
        // stable sort keeps universe order among equal confidences
        picked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        picked.truncate(top_n);
        picked
    };
    let top_buys = top(Action::Buy);
    let top_sells = top(Action::Sell);
    ScanReport {
        entries,
        top_buys,
        top_sells,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str, action: Action, confidence: f64) -> ScanEntry {
        ScanEntry {
            symbol: symbol.into(),
            action,
            confidence,
        }
    }

    #[test]
    fn ranks_by_confidence_and_truncates() {
        let entries = vec![
            entry("A", Action::Buy, 0.55),
            entry("B", Action::Sell, 0.71),
            entry("C", Action::Buy, 0.90),
            entry("D", Action::Hold, 0.99),
            entry("E", Action::Buy, 0.62),
            entry("F", Action::Sell, 0.80),
        ];
        let report = rank(entries, Vec::new(), 2);
        let buys: Vec<&str> = report.top_buys.iter().map(|e| e.symbol.as_str()).collect();
        let sells: Vec<&str> = report.top_sells.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(buys, vec!["C", "E"]);
        assert_eq!(sells, vec!["F", "B"]);
        assert_eq!(report.entries.len(), 6);
    }

    #[test]
    fn ties_keep_universe_order() {
        let entries = vec![entry("X", Action::Buy, 0.5), entry("Y", Action::Buy, 0.5)];
        let report = rank(entries, Vec::new(), 5);
        assert_eq!(report.top_buys[0].symbol, "X");
    }

    #[test]
    fn failure_keeps_error_kind() {
        let short = ScanFailure::new("TCS.NS", &AnalysisError::insufficient("features", 40, 51));
        assert_eq!(
            short.kind,
            FailureKind::InsufficientData {
                stage: "features".into()
            }
        );
        assert!(short.error.contains("40 rows"));

        let invalid = ScanFailure::new("X", &AnalysisError::InvalidInput("n_folds".into()));
        assert_eq!(invalid.kind, FailureKind::InvalidInput);
    }

    #[test]
    fn nothing_to_rank() {
        let report = rank(Vec::new(), Vec::new(), 5);
        assert!(report.top_buys.is_empty() && report.top_sells.is_empty());
    }
}
