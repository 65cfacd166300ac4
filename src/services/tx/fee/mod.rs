pub mod fee_service;
pub mod fee_strategy;

pub use fee_service::FeeEstimator;
