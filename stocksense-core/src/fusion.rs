//! FusionDecision: technical signal x news label -> final action.

use serde::{Deserialize, Serialize};

use crate::domain::{Action, NewsLabel, Signal};
use crate::error::AnalysisError;

/// Final recommendation together with the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub technical_label: Signal,
    pub technical_confidence: f64,
    pub news_label: NewsLabel,
    pub final_action: Action,
}

/// Fuse a technical prediction with a news label.
///
/// `confidence` must be finite and within [0, 1]; it does not alter the
/// verdict.
pub fn decide(technical: Signal, confidence: f64, news: NewsLabel) -> Result<Action, AnalysisError> {
    if !(0.0..=1.0).contains(&confidence) {
        return Err(AnalysisError::InvalidInput(format!(
            "technical confidence {confidence} outside [0, 1]"
        )));
    }
    Ok(verdict(technical, news))
}

/// News can veto a technical call (BUY with NEGATIVE news, SELL with POSITIVE
/// news both fall back to HOLD) but never upgrades a HOLD.
fn verdict(technical: Signal, news: NewsLabel) -> Action {
    match (technical, news) {
        (Signal::Buy, NewsLabel::Negative) => Action::Hold,
        (Signal::Buy, _) => Action::Buy,
        (Signal::Hold, _) => Action::Hold,
        (Signal::Sell, NewsLabel::Positive) => Action::Hold,
        (Signal::Sell, _) => Action::Sell,
    }
}

impl Decision {
    pub fn fuse(
        technical_label: Signal,
        technical_confidence: f64,
        news_label: NewsLabel,
    ) -> Result<Self, AnalysisError> {
        let final_action = decide(technical_label, technical_confidence, news_label)?;
        Ok(Self {
            technical_label,
            technical_confidence,
            news_label,
            final_action,
        })
    }
}
