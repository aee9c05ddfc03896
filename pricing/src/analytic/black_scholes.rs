use crate::common::models::{MarketParameters, MarketSeries};
use ndarray::{Array1, Zip};
use probability::distribution::{Distribution, Gaussian};

/// Cumulative distribution function of the standard normal distribution.
pub fn cdf(d: f64) -> f64 {
    let normal = Gaussian::new(0.0, 1.0);
    normal.distribution(d)
}

pub trait OptionPrice {
    type Value;
    fn call(&self) -> Self::Value;
    fn put(&self) -> Self::Value;

    fn price(&self) -> PriceResult<Self::Value> {
        PriceResult {
            call: self.call(),
            put: self.put(),
        }
    }
}

/// Call and put value of the same option parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceResult<T = f64> {
    pub call: T,
    pub put: T,
}

/// Call-side and put-side contribution of one term of the pricing formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leg<T = f64> {
    pub call: T,
    pub put: T,
}

fn d1_d2(s: f64, k: f64, r: f64, t: f64, vola: f64) -> (f64, f64) {
    let sigma_exp = vola * t.sqrt();
    let d1 = ((s / k).ln() + (r + vola.powi(2) / 2.0) * t) / sigma_exp;
    (d1, d1 - sigma_exp)
}

/// European put and call option prices for stocks.
/// https://en.wikipedia.org/wiki/Black-Scholes_model
///
/// `d1` and `d2` are computed once at construction, prices on demand. Inputs are not
/// validated, see [`MarketParameters::validate`]. A zero time to expiry or volatility
/// divides by zero: `d1` is infinite and the prices fall to their finite limits, or NaN
/// when the numerator is zero as well. A negative volatility gives finite but
/// meaningless prices.
#[derive(Clone, Copy, Debug)]
pub struct PricingModel {
    params: MarketParameters,
    d1: f64,
    d2: f64,
}

impl PricingModel {
    pub fn new(params: MarketParameters) -> Self {
        let (d1, d2) = d1_d2(
            params.underlying_price,
            params.strike_price,
            params.risk_free_rate,
            params.time_to_expiry,
            params.volatility,
        );
        Self { params, d1, d2 }
    }

    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    pub fn d1(&self) -> f64 {
        self.d1
    }

    pub fn d2(&self) -> f64 {
        self.d2
    }

    pub fn discounted_strike(&self) -> f64 {
        self.params.discounted_strike()
    }

    /// `S N(d1)` and `S N(-d1)`
    pub fn underlying_leg(&self) -> Leg {
        let s = self.params.underlying_price;
        Leg {
            call: s * cdf(self.d1),
            put: s * cdf(-self.d1),
        }
    }

    /// `K e^{-rt} N(d2)` and `K e^{-rt} N(-d2)`
    pub fn discounted_strike_leg(&self) -> Leg {
        let discounted = self.discounted_strike();
        Leg {
            call: discounted * cdf(self.d2),
            put: discounted * cdf(-self.d2),
        }
    }
}

impl From<MarketParameters> for PricingModel {
    fn from(params: MarketParameters) -> Self {
        Self::new(params)
    }
}

impl OptionPrice for PricingModel {
    type Value = f64;

    fn call(&self) -> f64 {
        self.underlying_leg().call - self.discounted_strike_leg().call
    }

    fn put(&self) -> f64 {
        self.discounted_strike_leg().put - self.underlying_leg().put
    }
}

/// [`PricingModel`] applied independently at every position of a [`MarketSeries`].
#[derive(Clone, Debug)]
pub struct ElementwisePricingModel {
    series: MarketSeries,
    d1: Array1<f64>,
    d2: Array1<f64>,
}

impl ElementwisePricingModel {
    pub fn new(series: MarketSeries) -> Self {
        let (t, vola) = (series.time_to_expiry(), series.volatility());
        let d = Zip::from(series.underlying_price())
            .and(series.strike_price())
            .and(series.risk_free_rate())
            .map_collect(|&s, &k, &r| d1_d2(s, k, r, t, vola));

        Self {
            d1: d.mapv(|(d1, _)| d1),
            d2: d.mapv(|(_, d2)| d2),
            series,
        }
    }

    pub fn series(&self) -> &MarketSeries {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn d1(&self) -> &Array1<f64> {
        &self.d1
    }

    pub fn d2(&self) -> &Array1<f64> {
        &self.d2
    }

    /// The scalar model at position `idx`.
    pub fn model_at(&self, idx: usize) -> Option<PricingModel> {
        self.series.at(idx).map(PricingModel::new)
    }

    pub fn discounted_strike(&self) -> Array1<f64> {
        let t = self.series.time_to_expiry();
        Zip::from(self.series.strike_price())
            .and(self.series.risk_free_rate())
            .map_collect(|&k, &r| MarketParameters::new(0.0, k, r, t, 0.0).discounted_strike())
    }

    pub fn underlying_leg(&self) -> Leg<Array1<f64>> {
        Leg {
            call: Zip::from(self.series.underlying_price())
                .and(&self.d1)
                .map_collect(|&s, &d1| s * cdf(d1)),
            put: Zip::from(self.series.underlying_price())
                .and(&self.d1)
                .map_collect(|&s, &d1| s * cdf(-d1)),
        }
    }

    pub fn discounted_strike_leg(&self) -> Leg<Array1<f64>> {
        let discounted = self.discounted_strike();
        Leg {
            call: Zip::from(&discounted)
                .and(&self.d2)
                .map_collect(|&k, &d2| k * cdf(d2)),
            put: Zip::from(&discounted)
                .and(&self.d2)
                .map_collect(|&k, &d2| k * cdf(-d2)),
        }
    }
}

impl OptionPrice for ElementwisePricingModel {
    type Value = Array1<f64>;

    fn call(&self) -> Array1<f64> {
        self.underlying_leg().call - self.discounted_strike_leg().call
    }

    fn put(&self) -> Array1<f64> {
        self.discounted_strike_leg().put - self.underlying_leg().put
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use ndarray::array;

    const TOLERANCE: f64 = 1e-4;

    fn model(s: f64, k: f64, r: f64, t: f64, vola: f64) -> PricingModel {
        PricingModel::new(MarketParameters::new(s, k, r, t, vola))
    }

    #[test]
    fn normal_cdf() {
        let center_value = cdf(0.0);
        assert_eq!(center_value, 0.5);

        let sigma_top = cdf(1.0); // mu + 1 sigma
        assert_approx_eq!(sigma_top, 0.8413447460685429, 1e-9);
        assert_approx_eq!(cdf(-1.0), 0.15865525393145707, 1e-9);
        assert_approx_eq!(cdf(2.5), 0.9937903346742238, 1e-9);
        assert_approx_eq!(cdf(-6.0), 9.865876450376946e-10, 1e-9);
        assert_approx_eq!(cdf(10.0), 1.0, 1e-9);
        assert_approx_eq!(cdf(-10.0), 0.0, 1e-9);
    }

    #[test]
    fn derived_quantities() {
        let bs = model(100.0, 100.0, 0.0, 1.0, 0.2);
        assert_approx_eq!(bs.d1(), 0.1, 1e-12);
        assert_approx_eq!(bs.d2(), -0.1, 1e-12);
    }

    #[test]
    fn european_call() {
        let bs = model(300.0, 250.0, 0.03, 1.0, 0.15);
        assert_approx_eq!(bs.call(), 58.8197, TOLERANCE);

        let bs = model(310.0, 250.0, 0.05, 3.5, 0.25);
        assert_approx_eq!(bs.call(), 113.4155, TOLERANCE);
    }

    #[test]
    fn european_put() {
        let bs = model(300.0, 250.0, 0.03, 1.0, 0.15);
        assert_approx_eq!(bs.put(), 1.4311, TOLERANCE);

        let bs = model(310.0, 250.0, 0.05, 3.5, 0.25);
        assert_approx_eq!(bs.put(), 13.2797, TOLERANCE);
    }

    #[test]
    fn legs_compose_prices() {
        let bs = model(300.0, 250.0, 0.03, 1.0, 0.15);
        let underlying = bs.underlying_leg();
        let strike = bs.discounted_strike_leg();

        assert_eq!(bs.call(), underlying.call - strike.call);
        assert_eq!(bs.put(), strike.put - underlying.put);
        assert_approx_eq!(underlying.call + underlying.put, 300.0, 1e-9);
        assert_approx_eq!(strike.call + strike.put, bs.discounted_strike(), 1e-9);
        assert_eq!(bs.price(), PriceResult { call: bs.call(), put: bs.put() });
    }

    #[test]
    fn at_the_money_symmetry() {
        let bs = model(100.0, 100.0, 0.0, 1.0, 0.2);
        assert_approx_eq!(bs.call(), 7.9656, TOLERANCE);
        assert_approx_eq!(bs.put(), 7.9656, TOLERANCE);
    }

    #[test]
    fn european_put_call_parity() {
        for (s, k, r, t, vola) in [
            (300.0, 250.0, 0.03, 1.0, 0.15),
            (310.0, 250.0, 0.05, 3.5, 0.25),
            (12.0, 14.5, 0.008, 60.0, 0.41),
            (50.0, 45.0, -0.01, 0.25, 0.6),
        ] {
            let bs = model(s, k, r, t, vola);
            let parity = s - k * (-r * t).exp();
            assert_approx_eq!(bs.call() - bs.put(), parity, 1e-6 * s);
        }
    }

    #[test]
    fn prices_within_bounds() {
        for s in [50.0, 90.0, 100.0, 110.0, 200.0] {
            let bs = model(s, 100.0, 0.02, 0.5, 0.3);
            assert!(bs.call() >= 0.0 && bs.call() <= s);
            assert!(bs.put() >= 0.0 && bs.put() <= bs.discounted_strike());
        }
    }

    #[test]
    fn monotone_in_underlying() {
        let prices: Vec<_> = (0..20)
            .map(|i| model(80.0 + 2.0 * i as f64, 100.0, 0.01, 1.0, 0.25).price())
            .collect();

        for pair in prices.windows(2) {
            assert!(pair[1].call > pair[0].call);
            assert!(pair[1].put < pair[0].put);
        }
    }

    #[test]
    fn expiry_limit_is_intrinsic() {
        let t = 1e-10;
        let itm_call = model(110.0, 100.0, 0.05, t, 0.2);
        assert_approx_eq!(itm_call.call(), 10.0, 1e-6);
        assert_approx_eq!(itm_call.put(), 0.0, 1e-6);

        let itm_put = model(90.0, 100.0, 0.05, t, 0.2);
        assert_approx_eq!(itm_put.call(), 0.0, 1e-6);
        assert_approx_eq!(itm_put.put(), 10.0, 1e-6);
    }

    #[test]
    fn zero_volatility_is_discounted_intrinsic() {
        let bs = model(100.0, 90.0, 0.05, 1.0, 1e-10);
        assert_approx_eq!(bs.call(), 100.0 - 90.0 * (-0.05_f64).exp(), 1e-9);
        assert_approx_eq!(bs.put(), 0.0, 1e-9);

        let bs = model(80.0, 90.0, 0.05, 1.0, 1e-10);
        assert_approx_eq!(bs.call(), 0.0, 1e-9);
        assert_approx_eq!(bs.put(), 90.0 * (-0.05_f64).exp() - 80.0, 1e-9);
    }

    #[test]
    fn invalid_inputs_propagate_nan() {
        // 0 / 0
        assert!(model(100.0, 100.0, 0.0, 1.0, 0.0).call().is_nan());
        assert!(model(100.0, 100.0, 0.0, 1.0, 0.0).put().is_nan());
        assert!(model(100.0, 100.0, 0.0, 0.0, 0.2).call().is_nan());
        assert!(model(-5.0, 100.0, 0.01, 1.0, 0.2).d1().is_nan());
    }

    #[test]
    fn zero_volatility_at_the_money_is_finite() {
        // r t / 0 = inf, so the prices are their deterministic limits
        let bs = model(100.0, 100.0, 0.01, 1.0, 0.0);
        assert_eq!(bs.d1(), f64::INFINITY);
        assert_approx_eq!(bs.call(), 100.0 - bs.discounted_strike(), 1e-12);
        assert_eq!(bs.put(), 0.0);
    }

    #[test]
    fn elementwise_matches_scalar() {
        let underlying = array![80.0, 95.5, 100.0, 104.25, 130.0];
        let series = MarketSeries::new(
            underlying.clone(),
            array![100.0],
            array![0.01],
            0.75,
            0.3,
        )
        .unwrap();
        let bs = ElementwisePricingModel::new(series);
        let prices = bs.price();

        assert_eq!(prices.call.len(), 5);
        for (idx, s) in underlying.iter().enumerate() {
            let scalar = model(*s, 100.0, 0.01, 0.75, 0.3);
            assert_eq!(prices.call[idx], scalar.call());
            assert_eq!(prices.put[idx], scalar.put());
            assert_eq!(bs.d1()[idx], scalar.d1());
            assert_eq!(bs.model_at(idx).unwrap().call(), scalar.call());
        }
        assert!(bs.model_at(5).is_none());
    }

    #[test]
    fn elementwise_with_rate_series() {
        let series = MarketSeries::new(
            array![10.0, 11.0, 12.0],
            array![9.0, 12.1, 13.2],
            array![0.005, 0.0075, 0.01],
            60.0,
            0.4,
        )
        .unwrap();
        let bs = ElementwisePricingModel::new(series);
        let call = bs.call();
        let put = bs.put();
        let discounted = bs.discounted_strike();

        for idx in 0..bs.len() {
            let s = bs.series().underlying_price()[idx];
            assert_approx_eq!(call[idx] - put[idx], s - discounted[idx], 1e-6 * s);
        }
    }
}
