use crate::models::domain::contract::CallTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxType {
    TokenTransfer,
    ContractCall,
    SmartContract,
    Coinbase,
    PoisonMicroblock,
    TenureChange,
    Other(String),
}

impl From<&str> for TxType {
    fn from(raw: &str) -> Self {
        match raw {
            "token_transfer" => TxType::TokenTransfer,
            "contract_call" => TxType::ContractCall,
            "smart_contract" => TxType::SmartContract,
            "coinbase" => TxType::Coinbase,
            "poison_microblock" => TxType::PoisonMicroblock,
            "tenure_change" => TxType::TenureChange,
            other => TxType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCallInfo {
    pub contract_id: String,
    pub function_name: String,
}

/// 签名者在 mempool 中尚未确认的交易
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    pub tx_id: String,
    pub sender_address: String,
    pub tx_type: TxType,
    pub contract_call: Option<ContractCallInfo>,
    pub nonce: u64,
    pub fee_rate: u64,
}

impl PendingTransaction {
    /// 是否就是 keeper 自己之前提交的那笔调用
    pub fn matches(&self, target: &CallTarget) -> bool {
        if self.sender_address != target.sender || self.tx_type != TxType::ContractCall {
            return false;
        }
        match &self.contract_call {
            Some(call) => {
                call.contract_id == target.contract.to_string()
                    && call.function_name == target.function_name
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingState {
    Absent,
    Present(PendingTransaction),
}
