use pricing::PricingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValuationError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("row {row}: cannot parse {column} value {value:?}")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("price history is empty")]
    EmptyHistory,

    #[error("weights sum to zero")]
    ZeroWeights,

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ValuationError>;
