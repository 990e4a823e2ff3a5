//! Bar cleaning applied to every provider's output.

use tracing::debug;

use super::provider::DataError;
use crate::domain::Bar;

/// Drop void or inconsistent bars, sort ascending and keep one bar per date
/// (the last one seen wins).
///
/// Returns `NoUsableBars` when nothing survives.
pub fn clean_bars(symbol: &str, mut bars: Vec<Bar>) -> Result<Vec<Bar>, DataError> {
    let raw = bars.len();
    bars.retain(Bar::is_sane);
    bars.sort_by_key(|b| b.date);

    let mut cleaned: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match cleaned.last_mut() {
            Some(prev) if prev.date == bar.date => *prev = bar,
            _ => cleaned.push(bar),
        }
    }

    if cleaned.len() != raw {
        debug!(symbol, raw, kept = cleaned.len(), "dropped unusable bars");
    }
    if cleaned.is_empty() {
        return Err(DataError::NoUsableBars {
            symbol: symbol.to_string(),
        });
    }
    Ok(cleaned)
}
