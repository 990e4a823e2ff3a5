//! Lookback periods for price history (`1d`, `5d`, `1mo`, ..., `10y`).

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    #[default]
    FiveYears,
    TenYears,
}

impl Period {
    pub const ALL: [Period; 9] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
        }
    }

    /// First calendar date covered when the window ends on `end`.
    pub fn start_from(self, end: NaiveDate) -> NaiveDate {
        let back = |months: u32| end.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN);
        match self {
            Period::OneDay => end - Duration::days(1),
            Period::FiveDays => end - Duration::days(5),
            Period::OneMonth => back(1),
            Period::ThreeMonths => back(3),
            Period::SixMonths => back(6),
            Period::OneYear => back(12),
            Period::TwoYears => back(24),
            Period::FiveYears => back(60),
            Period::TenYears => back(120),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown period '{0}' (expected one of 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y)")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}

impl TryFrom<String> for Period {
    type Error = ParsePeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(p: Period) -> Self {
        p.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_all_periods() {
        for p in Period::ALL {
            assert_eq!(p.as_str().parse::<Period>().unwrap(), p);
        }
        assert_eq!(" 5Y ".parse::<Period>().unwrap(), Period::FiveYears);
        assert!("7w".parse::<Period>().is_err());
    }

    #[test]
    fn default_is_five_years() {
        assert_eq!(Period::default(), Period::FiveYears);
    }

    #[test]
    fn start_dates() {
        let end = d(2024, 3, 31);
        assert_eq!(Period::FiveDays.start_from(end), d(2024, 3, 26));
        assert_eq!(Period::OneMonth.start_from(end), d(2024, 2, 29));
        assert_eq!(Period::FiveYears.start_from(end), d(2019, 3, 31));
        assert_eq!(Period::TenYears.start_from(end), d(2014, 3, 31));
    }

    #[test]
    fn serde_uses_short_names() {
        #[derive(Serialize, Deserialize)]
        struct Wrap {
            period: Period,
        }
        let w: Wrap = serde_json::from_str(r#"{"period":"6mo"}"#).unwrap();
        assert_eq!(w.period, Period::SixMonths);
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"period":"6mo"}"#);
    }
}
