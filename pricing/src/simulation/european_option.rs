use rand::{Rng, SeedableRng};
use rand_hc::Hc128Rng;
use tracing::debug;

use crate::analytic::PriceResult;
use crate::common::models::MarketParameters;
use crate::error::PricingError;
use crate::simulation::gbm::GeometricBrownianMotion;

/// Monte Carlo valuation of a European call and put on the terminal stock price.
pub struct MonteCarloEuropeanOption {
    option_params: MarketParameters,
    nr_paths: usize,
    seed_nr: u64,
}

impl MonteCarloEuropeanOption {
    pub fn new(option_params: MarketParameters, nr_paths: usize, seed_nr: u64) -> Self {
        Self {
            option_params,
            nr_paths,
            seed_nr,
        }
    }

    fn discount_factor(&self) -> f64 {
        (-self.option_params.risk_free_rate * self.option_params.time_to_expiry).exp()
    }

    /// Discounted average call and put payoffs over `nr_paths` terminal prices.
    pub fn price(&self) -> Result<PriceResult, PricingError> {
        if self.nr_paths == 0 {
            return Err(PricingError::NoSamples);
        }
        let stock_gbm: GeometricBrownianMotion = (&self.option_params).into();
        let strike = self.option_params.strike_price;
        let mut rn_generator = Hc128Rng::seed_from_u64(self.seed_nr);

        let (call_sum, put_sum) = (0..self.nr_paths)
            .map(|_| rn_generator.sample(stock_gbm))
            .fold((0.0, 0.0), |(call, put), st: f64| {
                (call + (st - strike).max(0.0), put + (strike - st).max(0.0))
            });

        let disc_factor = self.discount_factor() / self.nr_paths as f64;
        debug!(
            nr_paths = self.nr_paths,
            seed = self.seed_nr,
            "sampled terminal prices"
        );
        Ok(PriceResult {
            call: call_sum * disc_factor,
            put: put_sum * disc_factor,
        })
    }
}

impl From<&MarketParameters> for GeometricBrownianMotion {
    fn from(params: &MarketParameters) -> Self {
        // under the risk neutral measure we have mu = r
        GeometricBrownianMotion::new(
            params.underlying_price,
            params.risk_free_rate,
            params.volatility,
            params.time_to_expiry,
        )
    }
}
