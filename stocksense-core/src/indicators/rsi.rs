//! Relative Strength Index (RSI) with Wilder smoothing.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss). The averages are seeded with
//! the plain mean of the first `period` close-to-close changes and then
//! smoothed with alpha = 1/period. First valid value at index `period`.
//! No movement at all yields 50.

use super::{closes, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let close = closes(bars);
        let n = close.len();
        let mut out = vec![f64::NAN; n];
        if n <= self.period {
            return out;
        }

        let changes: Vec<f64> = close.windows(2).map(|w| w[1] - w[0]).collect();
        let seed = &changes[..self.period];
        if seed.iter().any(|c| c.is_nan()) {
            return out;
        }

        let p = self.period as f64;
        let mut avg_gain = seed.iter().map(|c| c.max(0.0)).sum::<f64>() / p;
        let mut avg_loss = seed.iter().map(|c| (-c).max(0.0)).sum::<f64>() / p;
        out[self.period] = rsi_from_averages(avg_gain, avg_loss);

        // changes[i - 1] is the move into bar i
        for i in (self.period + 1)..n {
            let change = changes[i - 1];
            if change.is_nan() {
                break;
            }
            avg_gain = (avg_gain * (p - 1.0) + change.max(0.0)) / p;
            avg_loss = (avg_loss * (p - 1.0) + (-change).max(0.0)) / p;
            out[i] = rsi_from_averages(avg_gain, avg_loss);
        }
        out
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    match (avg_gain == 0.0, avg_loss == 0.0) {
        (true, true) => 50.0,
        (_, true) => 100.0,
        (true, _) => 0.0,
        _ => 100.0 - 100.0 / (1.0 + avg_gain / avg_loss),
    }
}
