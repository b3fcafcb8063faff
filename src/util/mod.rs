pub mod error;
pub mod estimator;
pub mod logger;
