use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("shape mismatch: expected length {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("no samples to average")]
    NoSamples,
}
