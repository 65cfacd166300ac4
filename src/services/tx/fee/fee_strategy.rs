// services/tx/fee/fee_strategy.rs

use crate::models::domain::Percentile;

/// mempool 总交易数达到该值后使用 p50
pub const MODERATE_CONGESTION: u64 = 2_500;
/// mempool 总交易数达到该值后使用 p75
pub const HIGH_CONGESTION: u64 = 5_000;

/// 根据拥堵程度选择费率分位；边界值归入更高档
pub fn percentile_for_congestion(total_pending: u64) -> Percentile {
    if total_pending < MODERATE_CONGESTION {
        Percentile::P25
    } else if total_pending < HIGH_CONGESTION {
        Percentile::P50
    } else {
        Percentile::P75
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries_belong_to_higher_bucket() {
        assert_eq!(percentile_for_congestion(0), Percentile::P25);
        assert_eq!(percentile_for_congestion(2_499), Percentile::P25);
        assert_eq!(percentile_for_congestion(2_500), Percentile::P50);
        assert_eq!(percentile_for_congestion(4_999), Percentile::P50);
        assert_eq!(percentile_for_congestion(5_000), Percentile::P75);
        assert_eq!(percentile_for_congestion(u64::MAX), Percentile::P75);
    }
}
