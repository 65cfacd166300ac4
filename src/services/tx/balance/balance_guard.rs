// services/tx/balance/balance_guard.rs

use crate::errors::AppError;

/// 余额连手续费都付不起时中止（需要运维补充资金，不自动重试）
pub fn ensure_affordable(balance: u64, fee_rate: u64) -> Result<(), AppError> {
    if balance < fee_rate {
        return Err(AppError::InsufficientFunds { balance, fee_rate });
    }
    Ok(())
}
