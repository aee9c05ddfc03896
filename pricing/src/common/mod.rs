pub mod models;

pub use models::{MarketParameters, MarketSeries};
