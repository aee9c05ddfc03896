use ndarray::Array1;
use pricing::{ElementwisePricingModel, MarketSeries, OptionPrice};
use tracing::{debug, info};

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::history::PriceHistory;

/// Call and put values of one strike scenario, aligned with the history rows.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioResult {
    pub strike_offset: f64,
    pub strikes: Array1<f64>,
    pub calls: Array1<f64>,
    pub puts: Array1<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Valuation {
    pub volatility: f64,
    pub dates: Vec<String>,
    pub underlying: Array1<f64>,
    pub rates: Array1<f64>,
    pub scenarios: Vec<ScenarioResult>,
}

/// Price one option per history row and strike offset, using the close as the
/// underlying and the weighted high-low range as the volatility.
pub fn run(history: &PriceHistory, config: &ScenarioConfig) -> Result<Valuation> {
    config.validate()?;
    let volatility = history.volatility()?;
    let rates = config.rate.series(history.len())?;
    info!(
        rows = history.len(),
        volatility,
        time_to_expiry = config.time_to_expiry,
        scenarios = config.strike_offsets.len(),
        "starting valuation"
    );

    let scenarios = config
        .strike_offsets
        .iter()
        .map(|offset| price_scenario(history, &rates, *offset, config.time_to_expiry, volatility))
        .collect::<Result<Vec<_>>>()?;

    Ok(Valuation {
        volatility,
        dates: history.dates.clone(),
        underlying: history.close.clone(),
        rates,
        scenarios,
    })
}

fn price_scenario(
    history: &PriceHistory,
    rates: &Array1<f64>,
    strike_offset: f64,
    time_to_expiry: f64,
    volatility: f64,
) -> Result<ScenarioResult> {
    let strikes = history.close.mapv(|close| close * (1.0 + strike_offset));
    let series = MarketSeries::new(
        history.close.clone(),
        strikes.clone(),
        rates.clone(),
        time_to_expiry,
        volatility,
    )?;
    series.validate()?;

    let prices = ElementwisePricingModel::new(series).price();
    debug!(
        strike_offset,
        mean_call = prices.call.mean(),
        mean_put = prices.put.mean(),
        "priced scenario"
    );

    Ok(ScenarioResult {
        strike_offset,
        strikes,
        calls: prices.call,
        puts: prices.put,
    })
}
