//! Black-Scholes valuation of a stock's price history.
//!
//! Load the history, estimate the volatility, price one call and put per row and
//! strike scenario, and report the results as CSV.

pub mod config;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod report;

pub use config::{RateConfig, ScenarioConfig};
pub use error::{Result, ValuationError};
pub use history::PriceHistory;
pub use pipeline::{run, ScenarioResult, Valuation};
