//! Scenario configuration, read from a TOML file. Every key is optional; the
//! defaults are shown below.
//!
//! ```toml
//! time_to_expiry = 60.0
//! strike_offsets = [-0.1, 0.1]
//!
//! [rate]
//! kind = "uniform"    # or "constant"
//! value = 0.0075      # constant rate
//! low = 0.005
//! high = 0.01
//! seed = 42
//! ```

use std::fs;
use std::path::Path;

use ndarray::Array1;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use rand_hc::Hc128Rng;
use serde::Deserialize;

use crate::error::{Result, ValuationError};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// in years
    pub time_to_expiry: f64,
    /// strike = close * (1 + offset), one scenario per offset
    pub strike_offsets: Vec<f64>,
    pub rate: RateConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            time_to_expiry: 60.0,
            strike_offsets: vec![-0.1, 0.1],
            rate: RateConfig::default(),
        }
    }
}

/// How the risk-free rate of each history row is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    /// `value` on every row
    Constant,
    /// independent draws from `[low, high)`
    #[default]
    Uniform,
}

/// Risk-free rate per history row. Keys not used by `kind` are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateConfig {
    pub kind: RateKind,
    pub value: f64,
    pub low: f64,
    pub high: f64,
    pub seed: u64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            kind: RateKind::Uniform,
            value: 0.0075,
            low: 0.005,
            high: 0.01,
            seed: 42,
        }
    }
}

impl RateConfig {
    pub fn constant(value: f64) -> Self {
        Self {
            kind: RateKind::Constant,
            value,
            ..Self::default()
        }
    }

    pub fn uniform(low: f64, high: f64, seed: u64) -> Self {
        Self {
            kind: RateKind::Uniform,
            low,
            high,
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.kind {
            RateKind::Constant if !self.value.is_finite() => Err(ValuationError::Config(
                format!("rate must be finite, got {}", self.value),
            )),
            RateKind::Uniform
                if !(self.low < self.high && self.low.is_finite() && self.high.is_finite()) =>
            {
                Err(ValuationError::Config(format!(
                    "empty rate range [{}, {})",
                    self.low, self.high
                )))
            }
            _ => Ok(()),
        }
    }

    /// `len` rates; the same seed gives the same draws.
    pub fn series(&self, len: usize) -> Result<Array1<f64>> {
        self.validate()?;
        Ok(match self.kind {
            RateKind::Constant => Array1::from_elem(len, self.value),
            RateKind::Uniform => {
                let mut rn_generator = Hc128Rng::seed_from_u64(self.seed);
                Uniform::new(self.low, self.high)
                    .sample_iter(&mut rn_generator)
                    .take(len)
                    .collect()
            }
        })
    }
}

impl ScenarioConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.time_to_expiry > 0.0 && self.time_to_expiry.is_finite()) {
            return Err(ValuationError::Config(format!(
                "time_to_expiry must be positive, got {}",
                self.time_to_expiry
            )));
        }
        if self.strike_offsets.is_empty() {
            return Err(ValuationError::Config("no strike offsets".to_string()));
        }
        if let Some(offset) = self
            .strike_offsets
            .iter()
            .find(|o| !(**o > -1.0 && o.is_finite()))
        {
            return Err(ValuationError::Config(format!(
                "strike offset {} leaves no positive strike",
                offset
            )));
        }
        self.rate.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_empty_file() {
        let config = ScenarioConfig::from_toml("").unwrap();
        assert_eq!(config, ScenarioConfig::default());
        assert_eq!(config.time_to_expiry, 60.0);
        assert_eq!(config.strike_offsets, vec![-0.1, 0.1]);
    }

    #[test]
    fn parses_constant_rate() {
        let config = ScenarioConfig::from_toml(
            r#"
            time_to_expiry = 0.5
            strike_offsets = [0.0, 0.05, 0.23]

            [rate]
            kind = "constant"
            value = 0.02
            "#,
        )
        .unwrap();

        assert_eq!(config.rate, RateConfig::constant(0.02));
        assert_eq!(config.strike_offsets.len(), 3);
        assert_eq!(config.rate.series(3).unwrap(), Array1::from_elem(3, 0.02));
    }

    #[test]
    fn uniform_rates_are_seeded_and_in_range() {
        let rate = RateConfig::default();
        let first = rate.series(250).unwrap();
        assert_eq!(first, rate.series(250).unwrap());
        assert!(first.iter().all(|r| (0.005..0.01).contains(r)));
    }

    #[test]
    fn partial_rate_table_uses_defaults() {
        let config = ScenarioConfig::from_toml("[rate]\nlow = 0.001\nhigh = 0.002").unwrap();
        assert_eq!(config.rate, RateConfig::uniform(0.001, 0.002, 42));

        let config = ScenarioConfig::from_toml("[rate]\nkind = \"uniform\"\nlow = 0.005\nhigh = 0.01")
            .unwrap();
        assert_eq!(config.rate, RateConfig::default());

        let config = ScenarioConfig::from_toml("[rate]\nkind = \"constant\"").unwrap();
        assert_eq!(config.rate.series(2).unwrap(), Array1::from_elem(2, 0.0075));
    }

    #[test]
    fn empty_range_is_an_error_not_a_panic() {
        let rate = RateConfig::uniform(0.01, 0.01, 1);
        assert!(matches!(rate.series(3), Err(ValuationError::Config(_))));
    }

    #[test]
    fn rejects_invalid_config() {
        for content in [
            "time_to_expiry = 0.0",
            "strike_offsets = []",
            "strike_offsets = [-1.0]",
            "[rate]\nkind = \"uniform\"\nlow = 0.01\nhigh = 0.01\nseed = 1",
            "[rate]\nhigh = 0.001",
        ] {
            assert!(matches!(
                ScenarioConfig::from_toml(content),
                Err(ValuationError::Config(_))
            ));
        }
        for content in ["volatility = 0.3", "[rate]\nkind = \"normal\""] {
            assert!(matches!(
                ScenarioConfig::from_toml(content),
                Err(ValuationError::Toml(_))
            ));
        }
    }
}
