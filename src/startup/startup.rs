use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::infrastructure::provider::{ChainIndex, RetryAdapter, StacksApiClient};
use crate::services::tx::submitter::{ContractCallSubmitter, DryRunSubmitter, RelaySubmitter};
use crate::services::{KeeperService, RunOutcome};

/// 单次运行的 keeper 应用（由外部调度器周期性启动）
pub struct Application {
    keeper: KeeperService,
    run_timeout: Duration,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl Application {
    /// 组装依赖；配置应已通过 `Config::validate`
    pub fn build(config: Config, dry_run: bool) -> Result<Self> {
        // 1. 链索引客户端 + 重试
        let api = Arc::new(StacksApiClient::new(&config.api)?);
        let chain = Arc::new(RetryAdapter::new(
            api,
            config.api.max_retries,
            Duration::from_millis(config.api.base_delay_ms),
        )) as Arc<dyn ChainIndex>;

        // 2. 提交方
        let submitter: Arc<dyn ContractCallSubmitter> = if dry_run {
            Arc::new(DryRunSubmitter)
        } else {
            let relay_url = config.dispatch.relay_url.clone().ok_or_else(|| {
                AppError::Configuration("dispatch.relay_url is required".into())
            })?;
            Arc::new(RelaySubmitter::new(
                relay_url,
                Duration::from_secs(config.api.timeout_secs),
            )?)
        };

        let keeper = KeeperService::new(&config, chain, submitter)?;
        info!(
            "keeper ready: proxy={} source={} submitter={}",
            config.oracle.proxy_contract,
            config.oracle.source_contract,
            keeper.submitter_name()
        );

        Ok(Self {
            keeper,
            run_timeout: Duration::from_secs(config.run.timeout_secs),
        })
    }

    /// 执行一次完整运行；读取/决策阶段超时视为本次运行失败
    pub async fn run(self) -> Result<RunOutcome> {
        self.keeper.run_once(self.run_timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_uses_dry_run_submitter() {
        let app = Application::build(Config::sample(), true).unwrap();
        assert_eq!(app.keeper.submitter_name(), "dry-run");
        assert_eq!(app.run_timeout, Duration::from_secs(120));
    }

    #[test]
    fn live_run_uses_relay_submitter() {
        let mut config = Config::sample();
        config.dispatch.relay_url = Some("http://127.0.0.1:8787/submit".into());
        config.run.timeout_secs = 30;

        let app = Application::build(config, false).unwrap();
        assert_eq!(app.keeper.submitter_name(), "relay");
        assert_eq!(app.run_timeout, Duration::from_secs(30));
    }

    #[test]
    fn live_run_without_relay_is_rejected() {
        match Application::build(Config::sample(), false) {
            Err(AppError::Configuration(msg)) => assert!(msg.contains("relay_url")),
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("build should fail without a relay"),
        }
    }
}
