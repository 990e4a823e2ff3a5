//! NewsAnalyzer: symbol -> headlines -> averaged polarity -> label.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use stocksense_core::domain::NewsLabel;

use super::sentiment::SentimentScorer;
use super::sources::HeadlineSource;
use crate::config::NewsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsStatus {
    Ok,
    /// Sources answered but had no headlines.
    NoNews,
    /// Every source failed.
    UnknownError,
    /// News lookup was turned off.
    Skipped,
}

/// Outcome of a news lookup. Always usable: failures collapse to NEUTRAL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSignal {
    pub label: NewsLabel,
    pub avg_score: f64,
    pub headlines: Vec<String>,
    pub status: NewsStatus,
}

impl NewsSignal {
    pub fn neutral(status: NewsStatus) -> Self {
        Self {
            label: NewsLabel::Neutral,
            avg_score: 0.0,
            headlines: Vec::new(),
            status,
        }
    }
}

pub struct NewsAnalyzer {
    sources: Vec<Box<dyn HeadlineSource>>,
    scorer: Box<dyn SentimentScorer>,
    config: NewsConfig,
}

impl NewsAnalyzer {
    /// Sources are tried in order; the first non-empty answer wins.
    pub fn new(
        sources: Vec<Box<dyn HeadlineSource>>,
        scorer: Box<dyn SentimentScorer>,
        config: NewsConfig,
    ) -> Self {
        Self {
            sources,
            scorer,
            config,
        }
    }

    pub fn analyze(&self, symbol: &str) -> NewsSignal {
        if !self.config.enabled {
            return NewsSignal::neutral(NewsStatus::Skipped);
        }

        let max = self.config.max_headlines;
        let mut answered = false;
        for source in &self.sources {
            match source.headlines(symbol, max) {
                Ok(found) => {
                    answered = true;
                    let headlines = dedup(found, max);
                    debug!(symbol, source = source.name(), count = headlines.len(), "headlines");
                    if !headlines.is_empty() {
                        return self.score(headlines);
                    }
                }
                Err(e) => warn!(symbol, source = source.name(), error = %e, "headline source failed"),
            }
        }

        if answered {
            NewsSignal::neutral(NewsStatus::NoNews)
        } else {
            NewsSignal::neutral(NewsStatus::UnknownError)
        }
    }

    /// Average polarity of `headlines`, labelled against the configured
    /// thresholds. An empty list is NEUTRAL with status NO_NEWS.
    pub fn score(&self, headlines: Vec<String>) -> NewsSignal {
        if headlines.is_empty() {
            return NewsSignal::neutral(NewsStatus::NoNews);
        }
        let total: f64 = headlines.iter().map(|h| self.scorer.polarity(h)).sum();
        let avg_score = total / headlines.len() as f64;
        let label = if avg_score > self.config.positive_threshold {
            NewsLabel::Positive
        } else if avg_score < self.config.negative_threshold {
            NewsLabel::Negative
        } else {
            NewsLabel::Neutral
        };
        NewsSignal {
            label,
            avg_score,
            headlines,
            status: NewsStatus::Ok,
        }
    }
}

/// First occurrence wins, original order kept, capped at `max`.
fn dedup(headlines: Vec<String>, max: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headlines.len().min(max));
    for h in headlines {
        if out.len() == max {
            break;
        }
        if !out.contains(&h) {
            out.push(h);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{LexiconScorer, NewsError};

    struct Canned(Result<Vec<&'static str>, ()>);

    impl HeadlineSource for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        fn headlines(&self, _symbol: &str, max: usize) -> Result<Vec<String>, NewsError> {
            match &self.0 {
                Ok(v) => Ok(v.iter().take(max).map(|s| s.to_string()).collect()),
                Err(()) => Err(NewsError::Network("unreachable".into())),
            }
        }
    }

    /// Scores every headline by its leading number.
    struct Fixed;

    impl SentimentScorer for Fixed {
        fn polarity(&self, text: &str) -> f64 {
            text.split_whitespace()
                .next()
                .and_then(|w| w.parse().ok())
                .unwrap_or(0.0)
        }
    }

    fn analyzer(sources: Vec<Box<dyn HeadlineSource>>) -> NewsAnalyzer {
        NewsAnalyzer::new(sources, Box::new(Fixed), NewsConfig::default())
    }

    #[test]
    fn thresholds_are_strict() {
        let a = analyzer(Vec::new());
        assert_eq!(a.score(vec!["0.15 a".into()]).label, NewsLabel::Neutral);
        assert_eq!(a.score(vec!["0.16 a".into()]).label, NewsLabel::Positive);
        assert_eq!(a.score(vec!["-0.15 a".into()]).label, NewsLabel::Neutral);
        assert_eq!(a.score(vec!["-0.2 a".into()]).label, NewsLabel::Negative);
    }

    #[test]
    fn averages_headlines() {
        let a = analyzer(vec![Box::new(Canned(Ok(vec!["0.6 up", "-0.2 down"])))]);
        let signal = a.analyze("TCS.NS");
        assert_eq!(signal.status, NewsStatus::Ok);
        assert!((signal.avg_score - 0.2).abs() < 1e-12);
        assert_eq!(signal.label, NewsLabel::Positive);
        assert_eq!(signal.headlines.len(), 2);
    }

    #[test]
    fn falls_back_to_next_source() {
        let a = analyzer(vec![
            Box::new(Canned(Err(()))),
            Box::new(Canned(Ok(vec![]))),
            Box::new(Canned(Ok(vec!["-0.9 fraud"]))),
        ]);
        let signal = a.analyze("INFY.NS");
        assert_eq!(signal.label, NewsLabel::Negative);
        assert_eq!(signal.headlines, vec!["-0.9 fraud"]);
    }

    #[test]
    fn all_sources_empty_is_no_news() {
        let a = analyzer(vec![Box::new(Canned(Err(()))), Box::new(Canned(Ok(vec![])))]);
        assert_eq!(a.analyze("X"), NewsSignal::neutral(NewsStatus::NoNews));
    }

    #[test]
    fn all_sources_failing_is_unknown_error() {
        let a = analyzer(vec![Box::new(Canned(Err(()))), Box::new(Canned(Err(())))]);
        let signal = a.analyze("X");
        assert_eq!(signal.label, NewsLabel::Neutral);
        assert_eq!(signal.status, NewsStatus::UnknownError);
    }

    #[test]
    fn duplicates_removed_and_capped() {
        let many = vec!["0.1 a", "0.1 a", "0.2 b", "0.3 c", "0.4 d", "0.5 e", "0.6 f", "0.7 g"];
        let a = analyzer(vec![Box::new(Canned(Ok(many)))]);
        let signal = a.analyze("X");
        assert_eq!(signal.headlines.len(), 5);
        assert_eq!(signal.headlines[0], "0.1 a");
    }

    #[test]
    fn disabled_skips_sources() {
        let config = NewsConfig {
            enabled: false,
            ..NewsConfig::default()
        };
        let a = NewsAnalyzer::new(
            vec![Box::new(Canned(Ok(vec!["0.9 x"])))],
            Box::new(LexiconScorer::new()),
            config,
        );
        assert_eq!(a.analyze("X").status, NewsStatus::Skipped);
    }
}
