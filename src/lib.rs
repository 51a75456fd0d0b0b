#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod comparator;
pub mod components;
pub mod error;
pub mod format;
pub mod metrics;
pub mod netinfo;

pub use app::{PriceComparatorApp, SystemMonitorApp};
pub use error::{Error, Result};

/// Placeholder shown wherever a value could not be obtained.
pub const NOT_AVAILABLE: &str = "Non disponibile";
