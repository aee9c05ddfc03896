pub mod black_scholes;

pub use black_scholes::{cdf, ElementwisePricingModel, Leg, OptionPrice, PriceResult, PricingModel};
