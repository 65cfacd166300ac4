// services/tx/fee/fee_service.rs

use crate::errors::AppError;
use crate::log_debug;
use crate::models::domain::FeeStatistics;
use crate::services::tx::fee::fee_strategy::percentile_for_congestion;

/// 基于 mempool 拥堵度的费率估算（结果始终落在 [min_rate, max_rate]）
#[derive(Clone, Debug)]
pub struct FeeEstimator {
    /// mempool 统计中参考的交易类别，如 token_transfer
    category: String,
    min_rate: u64,
    max_rate: u64,
}

impl FeeEstimator {
    pub fn new(category: impl Into<String>, min_rate: u64, max_rate: u64) -> Self {
        Self {
            category: category.into(),
            min_rate,
            max_rate,
        }
    }

    pub fn estimate(&self, stats: &FeeStatistics) -> Result<u64, AppError> {
        let total = stats.total_pending();
        let percentile = percentile_for_congestion(total);

        let averages = stats.fee_averages.get(&self.category).ok_or_else(|| {
            AppError::UnexpectedResponse(format!(
                "mempool stats have no fee averages for category '{}'",
                self.category
            ))
        })?;
        let selected = averages.get(percentile).ok_or_else(|| {
            AppError::UnexpectedResponse(format!(
                "mempool stats have no {} fee average for category '{}'",
                percentile, self.category
            ))
        })?;

        let fee = self.clamp(selected);
        log_debug!(
            "mempool size {} -> {} of {} = {} -> fee rate {}",
            total,
            percentile,
            self.category,
            selected,
            fee
        );
        Ok(fee)
    }

    /// floor(clamp(x)) == clamp(floor(x))，因为边界都是整数
    pub fn clamp(&self, raw: f64) -> u64 {
        // `as` 对负数/NaN 饱和到 0，对过大值饱和到 u64::MAX
        let floored = raw.floor() as u64;
        floored.max(self.min_rate).min(self.max_rate.max(self.min_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::PercentileFees;
    use std::collections::HashMap;

    fn stats(count: u64, fees: PercentileFees) -> FeeStatistics {
        let mut fee_averages = HashMap::new();
        fee_averages.insert("token_transfer".to_string(), fees);
        let mut tx_counts = HashMap::new();
        tx_counts.insert("token_transfer".to_string(), count / 2);
        tx_counts.insert("contract_call".to_string(), count - count / 2);
        FeeStatistics {
            fee_averages,
            tx_counts,
        }
    }

    fn fees() -> PercentileFees {
        PercentileFees {
            p25: Some(30.0),
            p50: Some(60.0),
            p75: Some(90.0),
        }
    }

    #[test]
    fn picks_percentile_from_total_count() {
        let estimator = FeeEstimator::new("token_transfer", 10, 200);
        assert_eq!(estimator.estimate(&stats(1_000, fees())).unwrap(), 30);
        assert_eq!(estimator.estimate(&stats(2_499, fees())).unwrap(), 30);
        assert_eq!(estimator.estimate(&stats(2_500, fees())).unwrap(), 60);
        assert_eq!(estimator.estimate(&stats(4_999, fees())).unwrap(), 60);
        assert_eq!(estimator.estimate(&stats(5_000, fees())).unwrap(), 90);
    }

    #[test]
    fn output_is_always_within_bounds() {
        let estimator = FeeEstimator::new("token_transfer", 10, 200);
        for raw in [-5.0, 0.0, 9.99, 10.0, 123.7, 200.0, 200.5, 1e12, f64::MAX] {
            let fee = estimator.clamp(raw);
            assert!((10..=200).contains(&fee), "{raw} -> {fee}");
        }
        assert_eq!(estimator.clamp(123.7), 123);
        assert_eq!(estimator.clamp(9.99), 10);
        assert_eq!(estimator.clamp(1e12), 200);
    }

    #[test]
    fn missing_category_is_hard_error() {
        let estimator = FeeEstimator::new("contract_call", 10, 200);
        assert!(matches!(
            estimator.estimate(&stats(10, fees())),
            Err(AppError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn missing_percentile_is_hard_error() {
        let estimator = FeeEstimator::new("token_transfer", 10, 200);
        let partial = PercentileFees {
            p25: None,
            ..fees()
        };
        assert!(matches!(
            estimator.estimate(&stats(10, partial)),
            Err(AppError::UnexpectedResponse(_))
        ));
    }
}
