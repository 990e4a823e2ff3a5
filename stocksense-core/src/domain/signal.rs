//! Ternary technical signal, final action, and news label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Technical class predicted by the model: SELL (-1), HOLD (0), BUY (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Signal {
    Sell,
    Hold,
    Buy,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::Sell, Signal::Hold, Signal::Buy];

    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Sell => -1,
            Signal::Hold => 0,
            Signal::Buy => 1,
        }
    }

    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            -1 => Some(Signal::Sell),
            0 => Some(Signal::Hold),
            1 => Some(Signal::Buy),
            _ => None,
        }
    }

    /// Dense index used by the classifier's class table (SELL=0, HOLD=1, BUY=2).
    pub(crate) fn class_index(self) -> usize {
        (self.as_i8() + 1) as usize
    }

    pub(crate) fn from_class_index(index: usize) -> Option<Self> {
        Self::from_i8(index as i8 - 1)
    }
}

impl From<Signal> for i8 {
    fn from(signal: Signal) -> i8 {
        signal.as_i8()
    }
}

impl TryFrom<i8> for Signal {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Signal::from_i8(value).ok_or_else(|| format!("signal must be -1, 0 or 1, got {value}"))
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Action::from(*self), f)
    }
}

/// Final fused action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    Hold,
    Sell,
}

impl From<Signal> for Action {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Buy => Action::Buy,
            Signal::Hold => Action::Hold,
            Signal::Sell => Action::Sell,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Buy => "BUY",
            Action::Hold => "HOLD",
            Action::Sell => "SELL",
        };
        f.pad(s)
    }
}

/// Coarse news sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for NewsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NewsLabel::Positive => "POSITIVE",
            NewsLabel::Neutral => "NEUTRAL",
            NewsLabel::Negative => "NEGATIVE",
        };
        f.pad(s)
    }
}

impl FromStr for NewsLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Ok(NewsLabel::Positive),
            "NEUTRAL" => Ok(NewsLabel::Neutral),
            "NEGATIVE" => Ok(NewsLabel::Negative),
            other => Err(format!("unknown news label '{other}'")),
        }
    }
}
