//! Single-symbol analysis: prices, technical signal, news, fusion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use stocksense_core::data::{DataError, DataSource, Period, PriceProvider};
use stocksense_core::features::FeatureBuilder;
use stocksense_core::fusion::Decision;
use stocksense_core::labels::LabeledRow;
use stocksense_core::model::{FoldReport, Prediction};
use stocksense_core::{AnalysisError, TechnicalPipeline};

use crate::config::StockSenseConfig;
use crate::news::{NewsAnalyzer, NewsSignal};

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub symbol: String,
    pub source: DataSource,
    pub bars: usize,
    pub decision: Decision,
    pub prediction: Prediction,
    pub news: NewsSignal,
    pub folds: Vec<FoldReport>,
    pub rows: Vec<LabeledRow>,
}

impl Analysis {
    /// Human-readable reasons behind the decision, based on the latest row.
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if let Some(latest) = self.rows.last().map(|r| &r.features) {
            if latest.rsi < 30.0 {
                reasons.push("RSI indicates oversold conditions".to_string());
            } else if latest.rsi > 70.0 {
                reasons.push("RSI indicates overbought conditions".to_string());
            }
            if latest.close > latest.sma_50 {
                reasons.push("Price is above 50-day moving average (bullish)".to_string());
            } else {
                reasons.push("Price is below 50-day moving average (bearish)".to_string());
            }
            if latest.hammer == 1 {
                reasons.push("Bullish hammer candlestick pattern detected".to_string());
            }
        }
        if self.news.headlines.is_empty() {
            reasons.push("No recent company-specific news found (news treated as neutral)".to_string());
        } else {
            reasons.extend(self.news.headlines.iter().take(3).map(|h| format!("News: {h}")));
        }
        reasons
    }
}

/// Runs the full pipeline for one symbol at a time.
///
/// Holds no per-symbol state, so one `Analyzer` can be shared across scan
/// workers.
pub struct Analyzer {
    prices: Box<dyn PriceProvider>,
    news: NewsAnalyzer,
    technical: TechnicalPipeline,
    period: Period,
    end: Option<NaiveDate>,
}

impl Analyzer {
    pub fn new(
        prices: Box<dyn PriceProvider>,
        news: NewsAnalyzer,
        config: &StockSenseConfig,
    ) -> Self {
        Self {
            prices,
            news,
            technical: TechnicalPipeline::new(
                FeatureBuilder::new(),
                config.label_builder(),
                config.signal_model(),
            ),
            period: config.data.period,
            end: None,
        }
    }

    /// Pin the last date of the price window (defaults to today).
    pub fn with_end_date(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn analyze(&self, symbol: &str) -> Result<Analysis, AnalysisError> {
        let end = self.end.unwrap_or_else(|| chrono::Local::now().date_naive());
        let start = self.period.start_from(end);

        let fetched = self.prices.fetch(symbol, start, end)?;
        if fetched.bars.is_empty() {
            return Err(DataError::NoUsableBars {
                symbol: symbol.to_string(),
            }
            .into());
        }

        let technical = self.technical.run(symbol, &fetched.bars)?;
        let news = self.news.analyze(symbol);
        let decision = Decision::fuse(
            technical.prediction.signal,
            technical.prediction.confidence,
            news.label,
        )?;

        info!(
            symbol,
            technical = %decision.technical_label,
            news = %decision.news_label,
            action = %decision.final_action,
            "analysis complete"
        );

        Ok(Analysis {
            symbol: symbol.to_string(),
            source: fetched.source,
            bars: fetched.bars.len(),
            decision,
            prediction: technical.prediction,
            news,
            folds: technical.folds,
            rows: technical.rows,
        })
    }
}
