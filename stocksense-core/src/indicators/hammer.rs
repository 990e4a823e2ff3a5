//! Hammer candlestick flag.
//!
//! Per-bar shape test, no neighbouring bars involved:
//! body = |close - open|, lower_wick = min(close, open) - low,
//! hammer = 1 iff lower_wick > 2 * body and body > 0. A doji (zero body)
//! is never a hammer. Void bars yield NaN.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct Hammer;

impl Hammer {
    pub fn new() -> Self {
        Self
    }

    /// Shape test for a single bar.
    pub fn is_hammer(bar: &Bar) -> bool {
        let body = (bar.close - bar.open).abs();
        let lower_wick = bar.close.min(bar.open) - bar.low;
        body > 0.0 && lower_wick > 2.0 * body
    }
}

impl Indicator for Hammer {
    fn name(&self) -> &str {
        "hammer"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        bars.iter()
            .map(|bar| {
                if bar.is_void() {
                    f64::NAN
                } else if Self::is_hammer(bar) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}
