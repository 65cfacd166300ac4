// services/keeper_service.rs
use crate::config::Config;
use crate::errors::AppError;
use crate::infrastructure::provider::ChainIndex;
use crate::models::domain::{
    ContractId, NonceDecision, PendingState, PostConditionMode, SecretKey,
};
use crate::services::gate::{GateDecision, SkipReason, StalenessGate};
use crate::services::tx::balance::ensure_affordable;
use crate::services::tx::fee::FeeEstimator;
use crate::services::tx::nonce::NonceReconciler;
use crate::services::tx::submitter::ContractCallSubmitter;
use crate::services::tx::types::{ContractCall, DispatchReport};
use crate::utils::now_unix_secs;
use crate::{log_debug, log_info};
use std::sync::Arc;
use std::time::Duration;

/// 单次运行的结果：跳过（非错误）或已提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Skipped(SkipReason),
    Dispatched(DispatchReport),
}

/// 读取与决策阶段的产物
enum Plan {
    Skip(SkipReason),
    Submit {
        call: ContractCall,
        decision: NonceDecision,
    },
}

/// Gate → 费率估算 → Reconciler → 余额检查 → 提交
pub struct KeeperService {
    chain: Arc<dyn ChainIndex>,
    submitter: Arc<dyn ContractCallSubmitter>,
    gate: StalenessGate,
    estimator: FeeEstimator,
    reconciler: NonceReconciler,
    source_contract: ContractId,
    signer_key: SecretKey,
    unanchored_balance: bool,
    post_condition_mode: PostConditionMode,
}

impl KeeperService {
    pub fn new(
        config: &Config,
        chain: Arc<dyn ChainIndex>,
        submitter: Arc<dyn ContractCallSubmitter>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            chain,
            submitter,
            gate: StalenessGate::new(config.oracle.freshness_window_secs),
            estimator: FeeEstimator::new(
                config.fee.category.clone(),
                config.fee.min_rate,
                config.fee.max_rate,
            ),
            reconciler: NonceReconciler::new(config.call_target()?, config.fee.rbf_increment),
            source_contract: config.source_contract()?,
            signer_key: config.signer.private_key.clone(),
            unanchored_balance: config.balance.unanchored,
            post_condition_mode: config.dispatch.post_condition_mode,
        })
    }

    pub async fn run_once(&self, limit: Duration) -> Result<RunOutcome, AppError> {
        self.run_once_within(now_unix_secs(), limit).await
    }

    /// `limit` 只约束读取与决策阶段。提交一旦开始就等待其结果
    /// （relay 请求自身有超时），避免广播已落地却被报告为超时
    pub async fn run_once_within(&self, now: u64, limit: Duration) -> Result<RunOutcome, AppError> {
        let plan = tokio::time::timeout(limit, self.plan_at(now))
            .await
            .map_err(|_| AppError::Timeout(limit.as_secs()))??;

        match plan {
            Plan::Skip(reason) => Ok(RunOutcome::Skipped(reason)),
            Plan::Submit { call, decision } => {
                // 提交（一次，不重试）
                let tx_id = self.submitter.submit(&call).await?;
                Ok(RunOutcome::Dispatched(DispatchReport { tx_id, decision }))
            }
        }
    }

    async fn plan_at(&self, now: u64) -> Result<Plan, AppError> {
        let target = self.reconciler.target();
        let signer = target.sender.as_str();
        let source_id = self.source_contract.to_string();
        let proxy_id = target.contract.to_string();

        // 1. Staleness gate
        let (source_ts, proxy_ts) = tokio::try_join!(
            self.chain.fetch_latest_timestamp(&source_id),
            self.chain.fetch_latest_timestamp(&proxy_id),
        )?;
        log_debug!(
            "timestamps: source={} proxy={} now={}",
            source_ts,
            proxy_ts,
            now
        );
        if let GateDecision::Skip(reason) = self.gate.evaluate(source_ts, proxy_ts, now) {
            return Ok(Plan::Skip(reason));
        }

        // 2. 其余读取互不依赖，并发执行
        let (pending, balance, nonces, stats) = tokio::try_join!(
            self.chain.fetch_latest_pending(signer),
            self.chain.fetch_balance(signer, self.unanchored_balance),
            self.chain.fetch_nonces(signer),
            self.chain.fetch_mempool_stats(),
        )?;
        if let PendingState::Present(tx) = &pending {
            log_debug!(
                "latest pending tx {} nonce={} fee={}",
                tx.tx_id,
                tx.nonce,
                tx.fee_rate
            );
        }

        // 3. 费率估算（替换交易时结果会被丢弃，但统计缺失仍然中止）
        let estimated_fee = self.estimator.estimate(&stats)?;

        // 4. New / Replacement
        let decision = self
            .reconciler
            .reconcile(&pending, &nonces, estimated_fee)?;
        log_info!(
            "decision: {} nonce={} fee={} (estimate {}, balance {})",
            decision.kind,
            decision.nonce,
            decision.fee_rate,
            estimated_fee,
            balance
        );

        // 5. 余额
        ensure_affordable(balance, decision.fee_rate)?;

        let call = ContractCall::new(
            target,
            self.signer_key.clone(),
            &decision,
            self.post_condition_mode,
        );
        Ok(Plan::Submit { call, decision })
    }

    pub fn submitter_name(&self) -> &'static str {
        self.submitter.name()
    }
}
