use ndarray::{Array1, ArrayView1};

use crate::error::PricingError;

/// Market inputs for pricing a single European option.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketParameters {
    /// the asset's price at time t
    pub underlying_price: f64,
    /// the strike or exercise price of the asset
    pub strike_price: f64,
    /// the annualized, continuously compounded risk-free interest rate
    pub risk_free_rate: f64,
    /// (T - t) in years, where T is the time of the option's expiration and t is the current time
    pub time_to_expiry: f64,
    /// the annualized standard deviation of the stock's log returns
    pub volatility: f64,
}

impl MarketParameters {
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        risk_free_rate: f64,
        time_to_expiry: f64,
        volatility: f64,
    ) -> Self {
        Self {
            underlying_price,
            strike_price,
            risk_free_rate,
            time_to_expiry,
            volatility,
        }
    }

    /// Reject inputs for which the closed form is undefined.
    pub fn validate(&self) -> Result<(), PricingError> {
        positive("underlying_price", self.underlying_price)?;
        positive("strike_price", self.strike_price)?;
        finite("risk_free_rate", self.risk_free_rate)?;
        positive("time_to_expiry", self.time_to_expiry)?;
        positive("volatility", self.volatility)
    }

    /// `K * exp(-r * t)`
    pub fn discounted_strike(&self) -> f64 {
        self.strike_price * (-self.risk_free_rate * self.time_to_expiry).exp()
    }
}

/// Market inputs for pricing one option per position of a series,
/// e.g. a fixed expiry and volatility across a history of closing prices.
///
/// The price, strike and rate series share a common length; a series of length one
/// is broadcast to that length. Fields are read-only so the lengths stay aligned.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketSeries {
    underlying_price: Array1<f64>,
    strike_price: Array1<f64>,
    risk_free_rate: Array1<f64>,
    time_to_expiry: f64,
    volatility: f64,
}

impl MarketSeries {
    pub fn new(
        underlying_price: Array1<f64>,
        strike_price: Array1<f64>,
        risk_free_rate: Array1<f64>,
        time_to_expiry: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        let len = common_len(&[
            underlying_price.len(),
            strike_price.len(),
            risk_free_rate.len(),
        ])?;

        Ok(Self {
            underlying_price: broadcast(underlying_price, len)?,
            strike_price: broadcast(strike_price, len)?,
            risk_free_rate: broadcast(risk_free_rate, len)?,
            time_to_expiry,
            volatility,
        })
    }

    pub fn underlying_price(&self) -> &Array1<f64> {
        &self.underlying_price
    }

    pub fn strike_price(&self) -> &Array1<f64> {
        &self.strike_price
    }

    pub fn risk_free_rate(&self) -> &Array1<f64> {
        &self.risk_free_rate
    }

    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn len(&self) -> usize {
        self.underlying_price.len()
    }

    pub fn is_empty(&self) -> bool {
        self.underlying_price.is_empty()
    }

    /// The scalar parameters at position `idx`.
    pub fn at(&self, idx: usize) -> Option<MarketParameters> {
        Some(MarketParameters::new(
            *self.underlying_price.get(idx)?,
            *self.strike_price.get(idx)?,
            *self.risk_free_rate.get(idx)?,
            self.time_to_expiry,
            self.volatility,
        ))
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        positive("time_to_expiry", self.time_to_expiry)?;
        positive("volatility", self.volatility)?;
        all(self.underlying_price.view(), |v| positive("underlying_price", v))?;
        all(self.strike_price.view(), |v| positive("strike_price", v))?;
        all(self.risk_free_rate.view(), |v| finite("risk_free_rate", v))
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter { name, value })
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter { name, value })
    }
}

fn all(
    values: ArrayView1<f64>,
    check: impl Fn(f64) -> Result<(), PricingError>,
) -> Result<(), PricingError> {
    values.iter().try_for_each(|v| check(*v))
}

fn common_len(lens: &[usize]) -> Result<usize, PricingError> {
    let len = lens.iter().copied().max().unwrap_or(0);
    match lens.iter().find(|l| **l != len && **l != 1) {
        Some(found) => Err(PricingError::ShapeMismatch {
            expected: len,
            found: *found,
        }),
        None => Ok(len),
    }
}

fn broadcast(series: Array1<f64>, len: usize) -> Result<Array1<f64>, PricingError> {
    if series.len() == len {
        return Ok(series);
    }
    series
        .broadcast(len)
        .map(|view| view.to_owned())
        .ok_or(PricingError::ShapeMismatch {
            expected: len,
            found: series.len(),
        })
}
