use crate::errors::AppError;
use crate::services::tx::types::{ContractCall, TxId};
use async_trait::async_trait;

/// 构建、签名并广播合约调用的外部能力。只尝试一次，失败直接返回
#[async_trait]
pub trait ContractCallSubmitter: Send + Sync {
    async fn submit(&self, call: &ContractCall) -> Result<TxId, AppError>;
    fn name(&self) -> &'static str;
}
