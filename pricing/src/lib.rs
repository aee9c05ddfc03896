pub mod analytic;
pub mod common;
pub mod error;
pub mod simulation;

pub use analytic::{ElementwisePricingModel, OptionPrice, PriceResult, PricingModel};
pub use common::{MarketParameters, MarketSeries};
pub use error::PricingError;
