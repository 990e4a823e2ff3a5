//! Price data: provider trait, Yahoo and CSV providers, bar cleaning and
//! lookback periods.

pub mod csv_import;
pub mod ingest;
pub mod period;
pub mod provider;
pub mod yahoo;

pub use csv_import::CsvProvider;
pub use ingest::clean_bars;
pub use period::{ParsePeriodError, Period};
pub use provider::{DataError, DataSource, FetchResult, PriceProvider};
pub use yahoo::YahooProvider;
