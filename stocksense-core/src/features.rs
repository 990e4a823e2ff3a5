//! FeatureBuilder: per-bar technical feature rows.
//!
//! Every indicator is computed over the full series at once and the results
//! are zipped back onto the bars by index. Rows inside the warm-up window, or
//! with any undefined indicator, are dropped rather than zero-filled, so the
//! output is usually shorter than the input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Bar;
use crate::indicators::{Atr, Hammer, Indicator, MacdHistogram, Rsi, Sma};

/// Model input columns, in vector order.
pub const FEATURE_NAMES: [&str; 6] = ["sma_20", "sma_50", "rsi", "macd", "atr", "hammer"];

pub const N_FEATURES: usize = FEATURE_NAMES.len();

/// Technical features for one bar, aligned to it by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub rsi: f64,
    /// MACD histogram, not the raw MACD line.
    pub macd: f64,
    pub atr: f64,
    pub hammer: u8,
}

impl FeatureRow {
    /// Feature vector in `FEATURE_NAMES` order.
    pub fn to_vector(&self) -> [f64; N_FEATURES] {
        [
            self.sma_20,
            self.sma_50,
            self.rsi,
            self.macd,
            self.atr,
            f64::from(self.hammer),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_vector().iter().all(|v| v.is_finite())
    }
}

/// Derives [`FeatureRow`]s from a bar series.
pub struct FeatureBuilder {
    sma_fast: Sma,
    sma_slow: Sma,
    rsi: Rsi,
    macd: MacdHistogram,
    atr: Atr,
    hammer: Hammer,
    warmup: usize,
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::with_sma_periods(20, 50)
    }
}

impl FeatureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with custom fast/slow SMA windows; the other indicators keep
    /// their standard periods.
    pub fn with_sma_periods(fast: usize, slow: usize) -> Self {
        let mut builder = Self {
            sma_fast: Sma::new(fast),
            sma_slow: Sma::new(slow),
            rsi: Rsi::new(14),
            macd: MacdHistogram::standard(),
            atr: Atr::new(14),
            hammer: Hammer::new(),
            warmup: 0,
        };
        builder.warmup = warmup_for(&builder.indicators());
        builder
    }

    fn indicators(&self) -> [&dyn Indicator; 6] {
        [
            &self.sma_fast,
            &self.sma_slow,
            &self.rsi,
            &self.macd,
            &self.atr,
            &self.hammer,
        ]
    }

    /// Bars of prior history a row needs before it is emitted.
    pub fn warmup(&self) -> usize {
        self.warmup
    }

    /// Smallest input length that can produce a row.
    pub fn min_bars(&self) -> usize {
        self.warmup + 1
    }

    pub fn build(&self, bars: &[Bar]) -> Vec<FeatureRow> {
        if bars.len() < self.min_bars() {
            debug!(bars = bars.len(), required = self.min_bars(), "series shorter than warm-up");
            return Vec::new();
        }

        let sma_20 = self.sma_fast.compute(bars);
        let sma_50 = self.sma_slow.compute(bars);
        let rsi = self.rsi.compute(bars);
        let macd = self.macd.compute(bars);
        let atr = self.atr.compute(bars);
        let hammer = self.hammer.compute(bars);

        let rows: Vec<FeatureRow> = bars
            .iter()
            .enumerate()
            .skip(self.warmup)
            .filter_map(|(i, bar)| {
                if hammer[i].is_nan() {
                    return None;
                }
                let row = FeatureRow {
                    date: bar.date,
                    open: bar.open,
                    close: bar.close,
                    sma_20: sma_20[i],
                    sma_50: sma_50[i],
                    rsi: rsi[i],
                    macd: macd[i],
                    atr: atr[i],
                    hammer: hammer[i] as u8,
                };
                (row.is_finite() && bar.close.is_finite()).then_some(row)
            })
            .collect();

        debug!(bars = bars.len(), rows = rows.len(), "features built");
        rows
    }
}

/// A row needs a full window of the slowest indicator behind it: the
/// longest lookback plus the bar that completes the window.
fn warmup_for(indicators: &[&dyn Indicator]) -> usize {
    indicators
        .iter()
        .map(|ind| ind.lookback())
        .max()
        .map_or(0, |lookback| lookback + 1)
}
