use serde::Serialize;
use std::fmt;

/// `/nonces` 接口的领域表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceInfo {
    pub possible_next_nonce: u64,
    /// 从未执行过交易的账户为 None
    pub last_executed_tx_nonce: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxKind {
    New,
    Replacement,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::New => f.write_str("New"),
            TxKind::Replacement => f.write_str("Replacement"),
        }
    }
}

/// 本次运行最终提交的 (nonce, fee, kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceDecision {
    pub nonce: u64,
    pub fee_rate: u64,
    pub kind: TxKind,
}
