// services/tx/nonce/nonce_service.rs

use crate::errors::AppError;
use crate::log_warn;
use crate::models::domain::{CallTarget, NonceDecision, NonceInfo, PendingState, TxKind};

/// mempool 中签名者最新交易与本次调用的关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingMatch {
    NoPending,
    /// 就是 keeper 之前提交的同一调用，走 RBF 替换
    MatchingPending { nonce: u64, fee_rate: u64 },
    UnrelatedPending,
}

/// 决定本次提交的 nonce / 费率 / 类型（New 或 Replacement）
///
/// 每次运行只读取一次 pending 状态，不做内部重试。
#[derive(Debug, Clone)]
pub struct NonceReconciler {
    target: CallTarget,
    /// 替换交易相对原交易的最小加价
    rbf_increment: u64,
}

impl NonceReconciler {
    pub fn new(target: CallTarget, rbf_increment: u64) -> Self {
        Self {
            target,
            rbf_increment,
        }
    }

    pub fn target(&self) -> &CallTarget {
        &self.target
    }

    pub fn classify(&self, pending: &PendingState) -> PendingMatch {
        match pending {
            PendingState::Absent => PendingMatch::NoPending,
            PendingState::Present(tx) if tx.matches(&self.target) => {
                PendingMatch::MatchingPending {
                    nonce: tx.nonce,
                    fee_rate: tx.fee_rate,
                }
            }
            PendingState::Present(_) => PendingMatch::UnrelatedPending,
        }
    }

    pub fn reconcile(
        &self,
        pending: &PendingState,
        nonces: &NonceInfo,
        estimated_fee: u64,
    ) -> Result<NonceDecision, AppError> {
        let mut decision = match self.classify(pending) {
            PendingMatch::NoPending | PendingMatch::UnrelatedPending => NonceDecision {
                nonce: nonces.possible_next_nonce,
                fee_rate: estimated_fee,
                kind: TxKind::New,
            },
            // 替换交易必须严格高于原费率；此时不使用拥堵估算
            PendingMatch::MatchingPending { nonce, fee_rate } => NonceDecision {
                nonce,
                fee_rate: fee_rate.checked_add(self.rbf_increment).ok_or_else(|| {
                    AppError::Conversion(format!(
                        "replacement fee overflows: pending fee {} + increment {}",
                        fee_rate, self.rbf_increment
                    ))
                })?,
                kind: TxKind::Replacement,
            },
        };

        // API 返回的 next nonce 可能滞后；已执行的 nonce 不能再用。
        // next == last_executed 说明实际上没有在途交易，pending 视为无效
        if let Some(last_executed) = nonces.last_executed_tx_nonce {
            if decision.nonce == last_executed || nonces.possible_next_nonce == last_executed {
                log_warn!(
                    "nonce {} already executed, advancing to {} as a new transaction",
                    last_executed,
                    last_executed.saturating_add(1)
                );
                decision.nonce = last_executed.saturating_add(1);
                decision.kind = TxKind::New;
            }
        }
        Ok(decision)
    }
}
