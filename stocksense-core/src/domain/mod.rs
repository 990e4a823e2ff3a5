//! Domain types for StockSense

pub mod bar;
pub mod signal;

pub use bar::Bar;
pub use signal::{Action, NewsLabel, Signal};

/// Symbol type alias
pub type Symbol = String;
