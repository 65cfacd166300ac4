use super::stacks_api::ChainIndex;
use crate::errors::AppError;
use crate::log_warn;
use crate::models::domain::{FeeStatistics, NonceInfo, PendingState};
use async_trait::async_trait;
use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// 为任意 ChainIndex 增加指数退避重试；只重试网络层错误。
/// mempool 读取除外：每次运行只读一次 pending 状态，失败即中止，由下一次调度重试
pub struct RetryAdapter {
    inner: Arc<dyn ChainIndex>,
    max_retries: usize,
    base_delay: Duration,
}

impl RetryAdapter {
    pub fn new(inner: Arc<dyn ChainIndex>, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    /// 第 n 次重试的等待时间：base * 2^(n-1)，指数上限 10，另加 0~10% 抖动
    fn backoff(&self, attempt: usize) -> Duration {
        let exponent = (attempt - 1).min(10) as u32;
        let base_ms = self.base_delay.as_millis() as u64;
        let delay_ms = base_ms.saturating_mul(1u64 << exponent);
        let jitter = rand::thread_rng().gen_range(0..=(delay_ms / 10));
        Duration::from_millis(delay_ms + jitter)
    }

    async fn retry_call<T, Fut, F>(&self, what: &str, mut f: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, AppError>> + Send,
    {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay = self.backoff(attempt);
                log_warn!(
                    "{} 失败，第 {} 次重试，等待 {:?}",
                    what,
                    attempt + 1,
                    delay
                );
                sleep(delay).await;
            }

            match f().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt + 1 < self.max_retries => {
                    log_warn!("{} 调用失败 (第 {} 次): {}", what, attempt + 1, e);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl ChainIndex for RetryAdapter {
    async fn fetch_nonces(&self, address: &str) -> Result<NonceInfo, AppError> {
        self.retry_call("fetch_nonces", || self.inner.fetch_nonces(address))
            .await
    }

    async fn fetch_balance(&self, address: &str, unanchored: bool) -> Result<u64, AppError> {
        self.retry_call("fetch_balance", || {
            self.inner.fetch_balance(address, unanchored)
        })
        .await
    }

    async fn fetch_latest_timestamp(&self, address: &str) -> Result<u64, AppError> {
        self.retry_call("fetch_latest_timestamp", || {
            self.inner.fetch_latest_timestamp(address)
        })
        .await
    }

    async fn fetch_latest_pending(&self, address: &str) -> Result<PendingState, AppError> {
        self.inner.fetch_latest_pending(address).await
    }

    async fn fetch_mempool_stats(&self) -> Result<FeeStatistics, AppError> {
        self.retry_call("fetch_mempool_stats", || self.inner.fetch_mempool_stats())
            .await
    }
}
