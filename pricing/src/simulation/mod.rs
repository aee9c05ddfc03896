pub mod european_option;
pub mod gbm;
pub mod monte_carlo;

pub use european_option::MonteCarloEuropeanOption;
pub use gbm::{BrownianMotion, GeometricBrownianMotion};
pub use monte_carlo::{MonteCarloPathSimulator, PathEvaluator, PathSampler};
