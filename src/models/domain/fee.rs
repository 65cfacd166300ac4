use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Percentile {
    P25,
    P50,
    P75,
}

impl Percentile {
    pub fn label(&self) -> &'static str {
        match self {
            Percentile::P25 => "p25",
            Percentile::P50 => "p50",
            Percentile::P75 => "p75",
        }
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 某一交易类别的各分位平均费率；API 可能返回 null
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PercentileFees {
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
}

impl PercentileFees {
    pub fn get(&self, percentile: Percentile) -> Option<f64> {
        match percentile {
            Percentile::P25 => self.p25,
            Percentile::P50 => self.p50,
            Percentile::P75 => self.p75,
        }
    }
}

/// mempool 统计：类别 -> 分位费率，类别 -> 待处理交易数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeStatistics {
    pub fee_averages: HashMap<String, PercentileFees>,
    pub tx_counts: HashMap<String, u64>,
}

impl FeeStatistics {
    pub fn total_pending(&self) -> u64 {
        self.tx_counts
            .values()
            .fold(0u64, |acc, n| acc.saturating_add(*n))
    }
}
