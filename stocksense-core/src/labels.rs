//! LabelBuilder: forward-return target construction.
//!
//! `future_return[t] = close[t+H] / close[t] - 1`, mapped to a ternary
//! [`Signal`] through a named threshold pair. This is the only place in the
//! pipeline that reads forward in time; its output is the prediction target,
//! never a feature.

use serde::{Deserialize, Serialize};

use crate::domain::Signal;
use crate::features::FeatureRow;

pub const DEFAULT_HORIZON: usize = 5;

/// Return thresholds separating BUY / HOLD / SELL labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelThresholds {
    /// Returns strictly above this are BUY.
    pub upper: f64,
    /// Returns strictly below this are SELL.
    pub lower: f64,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            upper: 0.02,
            lower: -0.02,
        }
    }
}

impl LabelThresholds {
    pub fn classify(&self, future_return: f64) -> Signal {
        if future_return > self.upper {
            Signal::Buy
        } else if future_return < self.lower {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

/// A feature row with its forward-looking target attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRow {
    #[serde(flatten)]
    pub features: FeatureRow,
    pub future_return: f64,
    pub signal: Signal,
}

#[derive(Debug, Clone, Copy)]
pub struct LabelBuilder {
    pub horizon: usize,
    pub thresholds: LabelThresholds,
}

impl Default for LabelBuilder {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            thresholds: LabelThresholds::default(),
        }
    }
}

impl LabelBuilder {
    pub fn new(horizon: usize, thresholds: LabelThresholds) -> Self {
        Self { horizon, thresholds }
    }

    /// Label every row that has a close `horizon` rows ahead; the last
    /// `horizon` rows are dropped. Rows whose return is not finite are
    /// dropped as well.
    pub fn build(&self, rows: &[FeatureRow]) -> Vec<LabeledRow> {
        rows.iter()
            .zip(rows.iter().skip(self.horizon))
            .filter_map(|(now, ahead)| {
                let future_return = ahead.close / now.close - 1.0;
                future_return.is_finite().then(|| LabeledRow {
                    features: now.clone(),
                    future_return,
                    signal: self.thresholds.classify(future_return),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rows(closes: &[f64]) -> Vec<FeatureRow> {
        let base = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| FeatureRow {
                date: base + chrono::Duration::days(i as i64),
                open: close,
                close,
                sma_20: close,
                sma_50: close,
                rsi: 50.0,
                macd: 0.0,
                atr: 1.0,
                hammer: 0,
            })
            .collect()
    }

    #[test]
    fn thresholds_are_strict() {
        let t = LabelThresholds::default();
        assert_eq!(t.classify(0.021), Signal::Buy);
        assert_eq!(t.classify(0.02), Signal::Hold);
        assert_eq!(t.classify(-0.02), Signal::Hold);
        assert_eq!(t.classify(-0.021), Signal::Sell);
    }

    #[test]
    fn drops_last_horizon_rows() {
        let input = rows(&[100.0; 12]);
        let labeled = LabelBuilder::default().build(&input);
        assert_eq!(labeled.len(), 7);
        assert_eq!(labeled.last().unwrap().features.date, input[6].date);
    }

    #[test]
    fn future_return_uses_close_h_ahead() {
        let input = rows(&[100.0, 101.0, 110.0, 90.0]);
        let labeled = LabelBuilder::new(2, LabelThresholds::default()).build(&input);
        assert_eq!(labeled.len(), 2);
        assert!((labeled[0].future_return - 0.10).abs() < 1e-12);
        assert_eq!(labeled[0].signal, Signal::Buy);
        assert!((labeled[1].future_return - (90.0 / 101.0 - 1.0)).abs() < 1e-12);
        assert_eq!(labeled[1].signal, Signal::Sell);
    }

    #[test]
    fn zero_horizon_keeps_every_row() {
        let input = rows(&[100.0, 105.0, 95.0]);
        let labeled = LabelBuilder::new(0, LabelThresholds::default()).build(&input);
        assert_eq!(labeled.len(), 3);
        assert!(labeled.iter().all(|r| r.future_return == 0.0 && r.signal == Signal::Hold));
    }

    #[test]
    fn horizon_longer_than_input_is_empty() {
        assert!(LabelBuilder::default().build(&rows(&[100.0; 5])).is_empty());
    }

    #[test]
    fn custom_thresholds() {
        let builder = LabelBuilder::new(1, LabelThresholds { upper: 0.5, lower: -0.5 });
        let labeled = builder.build(&rows(&[100.0, 140.0]));
        assert_eq!(labeled[0].signal, Signal::Hold);
    }
}
