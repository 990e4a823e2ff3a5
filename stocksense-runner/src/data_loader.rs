//! Price loading for the runner.
//!
//! Providers are chained in a fixed fallback order:
//! 1. CSV files in `--csv-dir`, if given
//! 2. Yahoo Finance, unless offline
//! 3. Synthetic random walk, if `--synthetic`
//!
//! The first provider returning usable bars wins. Synthetic data is a
//! developer-only mode and is logged as such.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use stocksense_core::data::{
    CsvProvider, DataError, DataSource, FetchResult, PriceProvider, YahooProvider,
};
use stocksense_core::domain::Bar;

/// Options controlling where bars come from.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Directory of `<SYMBOL>.csv` files tried before the network.
    pub csv_dir: Option<PathBuf>,
    /// Never make network requests.
    pub offline: bool,
    /// Generate synthetic bars when real data is unavailable.
    pub synthetic: bool,
}

/// Ordered list of providers tried until one returns bars.
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn PriceProvider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard chain for `opts`.
    pub fn from_options(opts: &LoadOptions) -> Result<Self, DataError> {
        let mut chain = Self::new();
        if let Some(dir) = &opts.csv_dir {
            chain.push(CsvProvider::new(dir.clone()));
        }
        if !opts.offline {
            chain.push(YahooProvider::new()?);
        }
        if opts.synthetic {
            chain.push(SyntheticProvider);
        }
        if chain.is_empty() {
            return Err(DataError::Other(
                "no price source: offline without --csv-dir or --synthetic".into(),
            ));
        }
        Ok(chain)
    }

    pub fn push(&mut self, provider: impl PriceProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl PriceProvider for ProviderChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let mut last_error = None;
        for provider in &self.providers {
            match provider.fetch(symbol, start, end) {
                Ok(result) if !result.bars.is_empty() => {
                    if result.source == DataSource::Synthetic {
                        warn!(symbol, "using synthetic data, results are not market signals");
                    }
                    debug!(symbol, provider = provider.name(), bars = result.bars.len(), "bars loaded");
                    return Ok(result);
                }
                Ok(_) => {
                    last_error = Some(DataError::NoUsableBars {
                        symbol: symbol.to_string(),
                    });
                }
                Err(e) => {
                    debug!(symbol, provider = provider.name(), error = %e, "provider failed");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| DataError::Other("no price providers configured".into())))
    }
}

/// Deterministic random-walk bars, seeded from the symbol name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticProvider;

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars: generate_synthetic_bars(symbol, start, end),
            source: DataSource::Synthetic,
        })
    }
}

/// Weekday bars from `start` to `end`, starting at 100.0 with daily moves in ±3%.
pub fn generate_synthetic_bars(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut bars = Vec::new();
    let mut price = 100.0_f64;
    let mut current = start;

    while current <= end {
        let weekday = current.weekday();
        if weekday == chrono::Weekday::Sat || weekday == chrono::Weekday::Sun {
            current += chrono::Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        bars.push(Bar {
            date: current,
            open,
            high: open.max(close) * (1.0 + rng.gen_range(0.0..0.01)),
            low: open.min(close) * (1.0 - rng.gen_range(0.0..0.01)),
            close,
            volume: rng.gen_range(500_000..5_000_000u64),
        });

        price = close;
        current += chrono::Duration::days(1);
    }

    bars
}
