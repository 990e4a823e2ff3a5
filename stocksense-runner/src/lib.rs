//! StockSense Runner: configuration, price loading, news sentiment and
//! the analyze/scan orchestration built on `stocksense-core`.
//!
//! This crate provides:
//! - TOML configuration with defaults for every knob
//! - Price loading with CSV / Yahoo / synthetic fallback
//! - Headline sources (Yahoo Finance, Google News RSS) and lexicon scoring
//! - Single-symbol analysis fusing the technical signal with news
//! - Parallel universe scans with BUY/SELL rankings

pub mod config;
pub mod data_loader;
pub mod news;
pub mod pipeline;
pub mod scan;

pub use config::{ConfigError, StockSenseConfig};
pub use data_loader::{generate_synthetic_bars, LoadOptions, ProviderChain, SyntheticProvider};
pub use news::{
    GoogleNewsRss, HeadlineSource, LexiconScorer, NewsAnalyzer, NewsError, NewsSignal,
    NewsStatus, SentimentScorer, YahooNews,
};
pub use pipeline::{Analysis, Analyzer};
pub use scan::{scan, FailureKind, ScanEntry, ScanFailure, ScanReport};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn analyzer_is_shareable_across_scan_workers() {
        assert_send::<Analyzer>();
        assert_sync::<Analyzer>();
        assert_send::<NewsAnalyzer>();
        assert_sync::<NewsAnalyzer>();
        assert_send::<ProviderChain>();
        assert_sync::<ProviderChain>();
    }

    #[test]
    fn results_are_send_sync() {
        assert_send::<Analysis>();
        assert_sync::<Analysis>();
        assert_send::<ScanReport>();
        assert_sync::<ScanReport>();
        assert_send::<NewsSignal>();
        assert_sync::<NewsSignal>();
    }

    #[test]
    fn config_is_send_sync() {
        assert_send::<StockSenseConfig>();
        assert_sync::<StockSenseConfig>();
    }
}
