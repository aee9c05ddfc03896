//! Daily price history and the volatility estimate derived from it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::{Array1, ArrayView1};
use pricing::PricingError;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ValuationError};

#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "High", alias = "High (in $)")]
    high: String,
    #[serde(rename = "Low", alias = "Low (in $)")]
    low: String,
    #[serde(rename = "Close", alias = "Close/Last")]
    close: String,
}

/// Aligned daily columns of one stock, in the row order of the file.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceHistory {
    pub dates: Vec<String>,
    pub high: Array1<f64>,
    pub low: Array1<f64>,
    pub close: Array1<f64>,
}

impl PriceHistory {
    pub fn new(
        dates: Vec<String>,
        high: Array1<f64>,
        low: Array1<f64>,
        close: Array1<f64>,
    ) -> Result<Self> {
        if close.is_empty() {
            return Err(ValuationError::EmptyHistory);
        }
        for column in [dates.len(), high.len(), low.len()] {
            if column != close.len() {
                return Err(PricingError::ShapeMismatch {
                    expected: close.len(),
                    found: column,
                }
                .into());
            }
        }
        Ok(Self {
            dates,
            high,
            low,
            close,
        })
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Read `Date`, `High`, `Low` and `Close` columns; other columns are ignored.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let (mut dates, mut high, mut low, mut close) = (vec![], vec![], vec![], vec![]);
        for (idx, row) in csv_reader.deserialize::<HistoryRow>().enumerate() {
            let row = row?;
            let line = idx + 1;
            high.push(parse_price(line, "High", &row.high)?);
            low.push(parse_price(line, "Low", &row.low)?);
            close.push(parse_price(line, "Close", &row.close)?);
            dates.push(row.date);
        }
        debug!(rows = close.len(), "loaded price history");

        Self::new(dates, high.into(), low.into(), close.into())
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Average daily high-low range, weighted by the close.
    pub fn volatility(&self) -> Result<f64> {
        let range = &self.high - &self.low;
        weighted_average(range.view(), self.close.view())
    }
}

/// Prices may be exported with a currency sign, e.g. `$12.34`.
fn parse_price(row: usize, column: &'static str, value: &str) -> Result<f64> {
    value
        .trim_start_matches('$')
        .trim()
        .parse()
        .map_err(|_| ValuationError::Parse {
            row,
            column,
            value: value.to_string(),
        })
}

/// `sum(w_i * v_i) / sum(w_i)`
pub fn weighted_average(values: ArrayView1<f64>, weights: ArrayView1<f64>) -> Result<f64> {
    if values.len() != weights.len() {
        return Err(PricingError::ShapeMismatch {
            expected: values.len(),
            found: weights.len(),
        }
        .into());
    }
    if values.is_empty() {
        return Err(ValuationError::EmptyHistory);
    }
    let weight_sum = weights.sum();
    if weight_sum == 0.0 {
        return Err(ValuationError::ZeroWeights);
    }
    Ok(values.dot(&weights) / weight_sum)
}
