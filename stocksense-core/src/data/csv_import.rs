//! CSV price files: one `<SYMBOL>.csv` per ticker in a directory.
//!
//! Expected header: `date,open,high,low,close,volume` (extra columns such as
//! `adj_close` are ignored). Dates are `YYYY-MM-DD`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use super::ingest::clean_bars;
use super::provider::{DataError, DataSource, FetchResult, PriceProvider};
use crate::domain::Bar;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: f64,
}

impl From<CsvRow> for Bar {
    fn from(row: CsvRow) -> Self {
        Bar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume.max(0.0) as u64,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    /// Read every row of a CSV file into bars, without any date filtering.
    pub fn read_file(path: &Path) -> Result<Vec<Bar>, DataError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
        reader
            .deserialize::<CsvRow>()
            .map(|row| row.map(Bar::from).map_err(DataError::from))
            .collect()
    }
}

impl PriceProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let bars: Vec<Bar> = Self::read_file(&path)?
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars: clean_bars(symbol, bars)?,
            source: DataSource::CsvImport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn write_csv(dir: &Path, symbol: &str, body: &str) {
        let mut f = std::fs::File::create(dir.join(format!("{symbol}.csv"))).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn reads_and_filters_by_date() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(
            dir.path(),
            "TCS.NS",
            "date,open,high,low,close,volume\n\
             2024-01-03,101,103,100,102,1200\n\
             2024-01-02,100,102,99,101,1000\n\
             2024-01-04,102,104,101,103,900\n",
        );
        let provider = CsvProvider::new(dir.path());
        let result = provider
            .fetch("TCS.NS", d(2024, 1, 2), d(2024, 1, 3))
            .unwrap();
        assert_eq!(result.source, DataSource::CsvImport);
        assert_eq!(result.bars.len(), 2);
        assert_eq!(result.bars[0].date, d(2024, 1, 2));
        assert_eq!(result.bars[1].volume, 1200);
    }

    #[test]
    fn accepts_capitalised_headers_and_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(
            dir.path(),
            "INFY",
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,10,11,9,10.5,10.4,5000\n",
        );
        let bars = CsvProvider::read_file(&dir.path().join("INFY.csv")).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 10.5);
    }

    #[test]
    fn missing_file_is_symbol_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(dir.path());
        assert!(matches!(
            provider.fetch("NOPE", d(2024, 1, 1), d(2024, 2, 1)),
            Err(DataError::SymbolNotFound { .. })
        ));
    }

    #[test]
    fn malformed_row_is_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "BAD", "date,open,high,low,close,volume\nnot-a-date,1,1,1,1,1\n");
        let provider = CsvProvider::new(dir.path());
        assert!(matches!(
            provider.fetch("BAD", d(2024, 1, 1), d(2024, 2, 1)),
            Err(DataError::Csv(_))
        ));
    }
}
