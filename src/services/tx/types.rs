// services/tx/types.rs

use crate::models::domain::{CallTarget, NonceDecision, PostConditionMode, SecretKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 交给签名/广播协作方的合约调用参数
#[derive(Debug, Clone, Serialize)]
pub struct ContractCall {
    pub contract_address: String,
    pub contract_name: String,
    pub function_name: String,
    /// 本 keeper 的调用没有参数
    pub function_args: Vec<String>,
    pub sender_key: SecretKey,
    pub nonce: u64,
    pub fee: u64,
    pub post_condition_mode: PostConditionMode,
}

impl ContractCall {
    pub fn new(
        target: &CallTarget,
        sender_key: SecretKey,
        decision: &NonceDecision,
        post_condition_mode: PostConditionMode,
    ) -> Self {
        Self {
            contract_address: target.contract.address().to_string(),
            contract_name: target.contract.name().to_string(),
            function_name: target.function_name.clone(),
            function_args: Vec::new(),
            sender_key,
            nonce: decision.nonce,
            fee: decision.fee_rate,
            post_condition_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub tx_id: TxId,
    pub decision: NonceDecision,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{ContractId, TxKind};

    #[test]
    fn call_is_built_from_target_and_decision() {
        let target = CallTarget {
            sender: "SPKEEPER".into(),
            contract: ContractId::new("SPORACLE", "proxy").unwrap(),
            function_name: "send-to-proxy".into(),
        };
        let decision = NonceDecision {
            nonce: 8,
            fee_rate: 120,
            kind: TxKind::Replacement,
        };
        let call = ContractCall::new(
            &target,
            SecretKey::new("22".repeat(32)),
            &decision,
            PostConditionMode::Allow,
        );

        assert_eq!(call.contract_address, "SPORACLE");
        assert_eq!(call.contract_name, "proxy");
        assert!(call.function_args.is_empty());
        assert_eq!((call.nonce, call.fee), (8, 120));
        assert!(!format!("{:?}", call).contains(&"22".repeat(32)));

        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["post_condition_mode"], "allow");
        assert_eq!(json["sender_key"], "22".repeat(32));
    }
}
