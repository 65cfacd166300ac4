use crate::config::ApiConfig;
use crate::errors::AppError;
use crate::log_debug;
use crate::models::api::{
    BalancesResponse, ListResponse, MempoolStatsResponse, MempoolTransaction, NoncesResponse,
    TransactionSummary,
};
use crate::models::domain::{FeeStatistics, NonceInfo, PendingState};
use crate::utils::parse_amount;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// 链索引服务（只读）。keeper 的所有链上状态都从这里读取
#[async_trait]
pub trait ChainIndex: Send + Sync {
    async fn fetch_nonces(&self, address: &str) -> Result<NonceInfo, AppError>;
    /// STX 可用余额（micro-STX）
    async fn fetch_balance(&self, address: &str, unanchored: bool) -> Result<u64, AppError>;
    /// 地址最近一笔已确认交易的 burn_block_time
    async fn fetch_latest_timestamp(&self, address: &str) -> Result<u64, AppError>;
    /// 地址在 mempool 中最新的一笔交易（最多一笔）
    async fn fetch_latest_pending(&self, address: &str) -> Result<PendingState, AppError>;
    async fn fetch_mempool_stats(&self) -> Result<FeeStatistics, AppError>;
}

/// Stacks Blockchain API (`/extended/v1`) 的 HTTP 实现
pub struct StacksApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl StacksApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        Url::parse(&config.base_url).map_err(|e| {
            AppError::Configuration(format!("invalid API base URL '{}': {}", config.base_url, e))
        })?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("oracle-keeper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let url = format!("{}{}", self.base_url, path);
        log_debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::UpstreamQuery(format!("GET {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamQuery(format!(
                "GET {} returned HTTP {}",
                path, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                AppError::UnexpectedResponse(format!("GET {}: {}", path, e))
            } else {
                AppError::UpstreamQuery(format!("GET {} body read failed: {}", path, e))
            }
        })
    }
}

#[async_trait]
impl ChainIndex for StacksApiClient {
    async fn fetch_nonces(&self, address: &str) -> Result<NonceInfo, AppError> {
        let path = format!("/extended/v1/address/{}/nonces", address);
        let response: NoncesResponse = self.get_json(&path, &[]).await?;
        Ok(response.into())
    }

    async fn fetch_balance(&self, address: &str, unanchored: bool) -> Result<u64, AppError> {
        let path = format!("/extended/v1/address/{}/balances", address);
        let response: BalancesResponse = self
            .get_json(&path, &[("unanchored", unanchored.to_string())])
            .await?;
        parse_amount(&response.stx.balance)
    }

    async fn fetch_latest_timestamp(&self, address: &str) -> Result<u64, AppError> {
        let path = format!("/extended/v1/address/{}/transactions", address);
        let response: ListResponse<TransactionSummary> =
            self.get_json(&path, &[("limit", "1".to_string())]).await?;

        response
            .results
            .first()
            .map(|tx| tx.burn_block_time)
            .ok_or_else(|| {
                AppError::UnexpectedResponse(format!("address {} has no transactions", address))
            })
    }

    async fn fetch_latest_pending(&self, address: &str) -> Result<PendingState, AppError> {
        let path = format!("/extended/v1/address/{}/mempool", address);
        let response: ListResponse<MempoolTransaction> =
            self.get_json(&path, &[("limit", "1".to_string())]).await?;

        Ok(match response.results.into_iter().next() {
            Some(tx) => PendingState::Present(tx.into()),
            None => PendingState::Absent,
        })
    }

    async fn fetch_mempool_stats(&self) -> Result<FeeStatistics, AppError> {
        let response: MempoolStatsResponse =
            self.get_json("/extended/v1/tx/mempool/stats", &[]).await?;
        Ok(response.into())
    }
}
