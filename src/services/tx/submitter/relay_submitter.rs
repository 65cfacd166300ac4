// services/tx/submitter/relay_submitter.rs

use crate::errors::AppError;
use crate::log_info;
use crate::services::tx::submitter::ContractCallSubmitter;
use crate::services::tx::types::{ContractCall, TxId};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct RelayResponse {
    txid: String,
}

/// 通过本地签名 relay 构建/签名/广播交易：POST JSON，返回 `{"txid": "..."}`
#[derive(Clone)]
pub struct RelaySubmitter {
    http: reqwest::Client,
    endpoint: String,
}

impl RelaySubmitter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("failed to build relay client: {}", e)))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl ContractCallSubmitter for RelaySubmitter {
    async fn submit(&self, call: &ContractCall) -> Result<TxId, AppError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(call)
            .send()
            .await
            .map_err(|e| AppError::Dispatch(format!("relay request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Dispatch(format!(
                "relay rejected the transaction (HTTP {}): {}",
                status,
                body.trim()
            )));
        }

        let parsed: RelayResponse = response
            .json()
            .await
            .map_err(|e| AppError::Dispatch(format!("relay returned an invalid body: {}", e)))?;
        if parsed.txid.trim().is_empty() {
            return Err(AppError::Dispatch("relay returned an empty txid".into()));
        }

        log_info!("relay accepted transaction {}", parsed.txid);
        Ok(TxId(parsed.txid))
    }

    fn name(&self) -> &'static str {
        "relay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{PostConditionMode, SecretKey};
    use mockito::Matcher;
    use serde_json::json;

    fn call() -> ContractCall {
        ContractCall {
            contract_address: "SPORACLE".into(),
            contract_name: "proxy".into(),
            function_name: "send-to-proxy".into(),
            function_args: vec![],
            sender_key: SecretKey::new("33".repeat(32)),
            nonce: 4,
            fee: 30,
            post_condition_mode: PostConditionMode::Allow,
        }
    }

    #[tokio::test]
    async fn posts_call_and_returns_txid() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/submit")
            .match_body(Matcher::PartialJson(json!({
                "contract_address": "SPORACLE",
                "contract_name": "proxy",
                "function_name": "send-to-proxy",
                "function_args": [],
                "nonce": 4,
                "fee": 30,
                "post_condition_mode": "allow"
            })))
            .with_status(200)
            .with_body(r#"{"txid":"0xbeef"}"#)
            .create_async()
            .await;

        let relay =
            RelaySubmitter::new(format!("{}/submit", server.url()), Duration::from_secs(5)).unwrap();
        let tx_id = relay.submit(&call()).await.unwrap();
        assert_eq!(tx_id, TxId("0xbeef".into()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejection_is_dispatch_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/submit")
            .with_status(400)
            .with_body("ConflictingNonceInMempool")
            .expect(1)
            .create_async()
            .await;

        let relay =
            RelaySubmitter::new(format!("{}/submit", server.url()), Duration::from_secs(5)).unwrap();
        match relay.submit(&call()).await {
            Err(AppError::Dispatch(msg)) => assert!(msg.contains("ConflictingNonceInMempool")),
            other => panic!("unexpected {other:?}"),
        }
        // 不重试
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_txid_is_dispatch_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/submit")
            .with_status(200)
            .with_body(r#"{"txid":""}"#)
            .create_async()
            .await;

        let relay =
            RelaySubmitter::new(format!("{}/submit", server.url()), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            relay.submit(&call()).await,
            Err(AppError::Dispatch(_))
        ));
    }

    #[tokio::test]
    async fn dry_run_never_fails() {
        let id = crate::services::tx::submitter::DryRunSubmitter
            .submit(&call())
            .await
            .unwrap();
        assert_eq!(id.to_string(), "dry-run-4");
    }
}
