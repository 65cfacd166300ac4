// services/tx/submitter/dry_run_submitter.rs

use crate::errors::AppError;
use crate::log_info;
use crate::services::tx::submitter::ContractCallSubmitter;
use crate::services::tx::types::{ContractCall, TxId};

/// 只记录将要提交的调用，不触网
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunSubmitter;

#[async_trait::async_trait]
impl ContractCallSubmitter for DryRunSubmitter {
    async fn submit(&self, call: &ContractCall) -> Result<TxId, AppError> {
        log_info!(
            "[dry-run] would call {}.{}::{} nonce={} fee={} post_condition_mode={:?}({})",
            call.contract_address,
            call.contract_name,
            call.function_name,
            call.nonce,
            call.fee,
            call.post_condition_mode,
            call.post_condition_mode.wire_value()
        );
        Ok(TxId(format!("dry-run-{}", call.nonce)))
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}
