//! Universe scans over synthetic and failing symbols.

use chrono::NaiveDate;
use stocksense_core::data::{DataError, DataSource, FetchResult, PriceProvider};
use stocksense_core::domain::Action;
use stocksense_runner::{
    scan, Analyzer, FailureKind, LexiconScorer, NewsAnalyzer, StockSenseConfig,
    SyntheticProvider,
};

fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

struct Unreachable;

impl PriceProvider for Unreachable {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn fetch(&self, _: &str, _: NaiveDate, _: NaiveDate) -> Result<FetchResult, DataError> {
        Err(DataError::NetworkUnreachable("connection refused".into()))
    }
}

/// Synthetic bars for symbols starting with `OK`, 40 synthetic bars for
/// `SHORT*`, failure otherwise.
struct Mixed;

impl PriceProvider for Mixed {
    fn name(&self) -> &str {
        "mixed"
    }

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<FetchResult, DataError> {
        if symbol.starts_with("OK") {
            SyntheticProvider.fetch(symbol, start, end)
        } else if symbol.starts_with("SHORT") {
            let mut fetched = SyntheticProvider.fetch(symbol, start, end)?;
            fetched.bars.truncate(40);
            Ok(fetched)
        } else {
            Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
        }
    }
}

fn analyzer(prices: Box<dyn PriceProvider>, config: &StockSenseConfig) -> Analyzer {
    let news = NewsAnalyzer::new(Vec::new(), Box::new(LexiconScorer::new()), config.news.clone());
    Analyzer::new(prices, news, config).with_end_date(end_date())
}

fn small_config() -> StockSenseConfig {
    let mut config = StockSenseConfig::from_toml("[data]\nperiod = \"2y\"\n").unwrap();
    config.model.n_trees = 20;
    config
}

fn symbols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn every_symbol_failing_gives_empty_rankings() {
    let config = small_config();
    let universe = config.scan.universe.clone();
    let report = scan(&analyzer(Box::new(Unreachable), &config), &universe, 5);

    assert!(report.entries.is_empty());
    assert!(report.top_buys.is_empty());
    assert!(report.top_sells.is_empty());
    assert_eq!(report.failures.len(), universe.len());
    assert!(report.failures[0].error.contains("network unreachable"));
    assert!(report.failures.iter().all(|f| f.kind == FailureKind::DataFetch));
}

#[test]
fn failure_kind_separates_fetch_from_short_history() {
    let config = small_config();
    let names = symbols(&["BAD.NS", "SHORT.NS"]);
    let report = scan(&analyzer(Box::new(Mixed), &config), &names, 5);

    assert!(report.entries.is_empty());
    assert_eq!(report.failures[0].symbol, "BAD.NS");
    assert_eq!(report.failures[0].kind, FailureKind::DataFetch);
    assert_eq!(report.failures[1].symbol, "SHORT.NS");
    assert_eq!(
        report.failures[1].kind,
        FailureKind::InsufficientData {
            stage: "features".into()
        }
    );
}

#[test]
fn failures_are_collected_alongside_results() {
    let config = small_config();
    let names = symbols(&["OK1.NS", "BAD1.NS", "OK2.NS", "OK3.NS", "BAD2.NS"]);
    let report = scan(&analyzer(Box::new(Mixed), &config), &names, 5);

    assert_eq!(report.entries.len(), 3);
    let failed: Vec<&str> = report.failures.iter().map(|f| f.symbol.as_str()).collect();
    assert_eq!(failed, vec!["BAD1.NS", "BAD2.NS"]);

    for e in &report.entries {
        assert!((0.0..=1.0).contains(&e.confidence));
    }
    assert!(report.top_buys.iter().all(|e| e.action == Action::Buy));
    assert!(report.top_sells.iter().all(|e| e.action == Action::Sell));
    assert!(report
        .top_buys
        .windows(2)
        .all(|w| w[0].confidence >= w[1].confidence));
}

#[test]
fn scans_are_reproducible() {
    let config = small_config();
    let names = symbols(&["OK_A", "OK_B", "OK_C", "OK_D"]);
    let a = scan(&analyzer(Box::new(Mixed), &config), &names, 2);
    let b = scan(&analyzer(Box::new(Mixed), &config), &names, 2);
    assert_eq!(a.entries, b.entries);
    assert_eq!(a.top_buys, b.top_buys);
    assert_eq!(a.top_sells, b.top_sells);
}

#[test]
fn synthetic_source_is_reported() {
    let config = small_config();
    let analysis = analyzer(Box::new(SyntheticProvider), &config)
        .analyze("OK.NS")
        .unwrap();
    assert_eq!(analysis.source, DataSource::Synthetic);
    assert!(analysis.bars > 500);
}
