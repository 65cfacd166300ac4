//! 链索引 API（`/extended/v1`）的 JSON 契约
use crate::models::domain::{
    ContractCallInfo, FeeStatistics, NonceInfo, PendingTransaction, PercentileFees, TxType,
};
use crate::utils::u64_from_number_or_string;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct NoncesResponse {
    pub possible_next_nonce: u64,
    pub last_executed_tx_nonce: Option<u64>,
}

impl From<NoncesResponse> for NonceInfo {
    fn from(r: NoncesResponse) -> Self {
        Self {
            possible_next_nonce: r.possible_next_nonce,
            last_executed_tx_nonce: r.last_executed_tx_nonce,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssetBalance {
    /// 十进制字符串
    pub balance: String,
}

#[derive(Debug, Deserialize)]
pub struct BalancesResponse {
    pub stx: AssetBalance,
}

/// 分页列表的通用外壳
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionSummary {
    pub burn_block_time: u64,
}

#[derive(Debug, Deserialize)]
pub struct ContractCallDto {
    pub contract_id: String,
    pub function_name: String,
}

#[derive(Debug, Deserialize)]
pub struct MempoolTransaction {
    pub tx_id: String,
    pub tx_type: String,
    pub sender_address: String,
    pub nonce: u64,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub fee_rate: u64,
    pub contract_call: Option<ContractCallDto>,
}

impl From<MempoolTransaction> for PendingTransaction {
    fn from(tx: MempoolTransaction) -> Self {
        Self {
            tx_id: tx.tx_id,
            sender_address: tx.sender_address,
            tx_type: TxType::from(tx.tx_type.as_str()),
            contract_call: tx.contract_call.map(|c| ContractCallInfo {
                contract_id: c.contract_id,
                function_name: c.function_name,
            }),
            nonce: tx.nonce,
            fee_rate: tx.fee_rate,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PercentileFeesDto {
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct MempoolStatsResponse {
    pub tx_type_counts: HashMap<String, u64>,
    pub tx_simple_fee_averages: HashMap<String, PercentileFeesDto>,
}

impl From<MempoolStatsResponse> for FeeStatistics {
    fn from(r: MempoolStatsResponse) -> Self {
        let fee_averages = r
            .tx_simple_fee_averages
            .into_iter()
            .map(|(category, f)| {
                (
                    category,
                    PercentileFees {
                        p25: f.p25,
                        p50: f.p50,
                        p75: f.p75,
                    },
                )
            })
            .collect();
        Self {
            fee_averages,
            tx_counts: r.tx_type_counts,
        }
    }
}
