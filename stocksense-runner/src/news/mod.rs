//! News sentiment: headline sources, lexicon scoring and the analyzer that
//! turns them into a POSITIVE / NEUTRAL / NEGATIVE label.

pub mod analyzer;
pub mod sentiment;
pub mod sources;

use thiserror::Error;

pub use analyzer::{NewsAnalyzer, NewsSignal, NewsStatus};
pub use sentiment::{LexiconScorer, SentimentScorer};
pub use sources::{base_symbol, GoogleNewsRss, HeadlineSource, YahooNews};

/// Failures while collecting headlines. Never fatal to an analysis.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("unparseable news response: {0}")]
    Parse(String),
}
