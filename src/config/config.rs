use crate::errors::AppError;
use crate::models::domain::{CallTarget, ContractId, PostConditionMode, SecretKey};
use config::{Environment, File};
use serde::Deserialize;
use std::path::Path;
use url::Url;

const ENV_PREFIX: &str = "KEEPER";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub signer: SignerConfig,
    pub oracle: OracleConfig,
    pub fee: FeeConfig,
    #[serde(default)]
    pub balance: BalanceConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// 链索引 API（Stacks Blockchain API）
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
    /// 总尝试次数（含首次）
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SignerConfig {
    /// 签名者地址，同时也是 mempool/nonce/balance 查询地址
    pub address: String,
    pub private_key: SecretKey,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OracleConfig {
    pub source_contract: String,
    pub proxy_contract: String,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default = "default_freshness_window_secs")]
    pub freshness_window_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeeConfig {
    pub min_rate: u64,
    pub max_rate: u64,
    pub rbf_increment: u64,
    /// mempool 统计中用于估算的交易类别
    #[serde(default = "default_fee_category")]
    pub category: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BalanceConfig {
    /// 余额查询是否包含未锚定（microblock）状态
    #[serde(default)]
    pub unanchored: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DispatchConfig {
    /// 签名/广播 relay 地址；dry-run 时可省略
    pub relay_url: Option<String>,
    #[serde(default)]
    pub post_condition_mode: PostConditionMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    #[serde(default = "default_run_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_run_timeout_secs(),
        }
    }
}

fn default_api_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> usize {
    3
}
fn default_base_delay_ms() -> u64 {
    500
}
fn default_function_name() -> String {
    "send-to-proxy".to_string()
}
fn default_freshness_window_secs() -> u64 {
    3600
}
fn default_fee_category() -> String {
    "token_transfer".to_string()
}
fn default_run_timeout_secs() -> u64 {
    120
}

impl Config {
    /// 加载顺序：config/default → config/{environment} → KEEPER_* 环境变量
    pub fn load(config_dir: &Path, environment: &str) -> Result<Self, AppError> {
        Self::load_with_env(config_dir, environment, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(
        config_dir: &Path,
        environment: &str,
        env: Environment,
    ) -> Result<Self, AppError> {
        let default_file = config_dir.join("default");
        let env_file = config_dir.join(environment);

        config::Config::builder()
            .add_source(File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
            .add_source(env.prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }

    /// 启动时一次性校验；失败则不执行任何运行
    pub fn validate(&self, require_relay: bool) -> Result<(), AppError> {
        require_url("api.base_url", &self.api.base_url)?;
        if self.api.max_retries == 0 {
            return Err(AppError::Configuration(
                "api.max_retries must be at least 1".into(),
            ));
        }
        require_non_empty("signer.address", &self.signer.address)?;
        self.signer.private_key.validate()?;

        self.source_contract()?;
        self.proxy_contract()?;
        require_non_empty("oracle.function_name", &self.oracle.function_name)?;
        require_non_empty("fee.category", &self.fee.category)?;

        if self.fee.min_rate > self.fee.max_rate {
            return Err(AppError::Configuration(format!(
                "fee.min_rate ({}) exceeds fee.max_rate ({})",
                self.fee.min_rate, self.fee.max_rate
            )));
        }

        if require_relay {
            match self.dispatch.relay_url.as_deref() {
                Some(url) => require_url("dispatch.relay_url", url)?,
                None => {
                    return Err(AppError::Configuration(
                        "dispatch.relay_url is required unless running with --dry-run".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn source_contract(&self) -> Result<ContractId, AppError> {
        parse_contract("oracle.source_contract", &self.oracle.source_contract)
    }

    pub fn proxy_contract(&self) -> Result<ContractId, AppError> {
        parse_contract("oracle.proxy_contract", &self.oracle.proxy_contract)
    }

    /// keeper 每次运行要提交的调用
    pub fn call_target(&self) -> Result<CallTarget, AppError> {
        Ok(CallTarget {
            sender: self.signer.address.clone(),
            contract: self.proxy_contract()?,
            function_name: self.oracle.function_name.clone(),
        })
    }
}

#[cfg(test)]
pub const SAMPLE_SIGNER: &str = "SPKEEPER";
#[cfg(test)]
pub const SAMPLE_SOURCE: &str = "SPORACLE.source-oracle";
#[cfg(test)]
pub const SAMPLE_PROXY: &str = "SPORACLE.proxy-oracle";

#[cfg(test)]
impl Config {
    /// 单元测试用的完整配置（dry-run 形态，无 relay）
    pub fn sample() -> Self {
        Config {
            api: ApiConfig {
                base_url: "http://localhost:3999".into(),
                timeout_secs: 5,
                max_retries: 1,
                base_delay_ms: 0,
            },
            signer: SignerConfig {
                address: SAMPLE_SIGNER.into(),
                private_key: SecretKey::new("44".repeat(32)),
            },
            oracle: OracleConfig {
                source_contract: SAMPLE_SOURCE.into(),
                proxy_contract: SAMPLE_PROXY.into(),
                function_name: "send-to-proxy".into(),
                freshness_window_secs: 3600,
            },
            fee: FeeConfig {
                min_rate: 10,
                max_rate: 200,
                rbf_increment: 20,
                category: "token_transfer".into(),
            },
            balance: BalanceConfig::default(),
            dispatch: DispatchConfig::default(),
            run: RunConfig::default(),
        }
    }
}

fn require_non_empty(key: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Configuration(format!("{} must not be empty", key)));
    }
    Ok(())
}

fn require_url(key: &str, value: &str) -> Result<(), AppError> {
    require_non_empty(key, value)?;
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| AppError::Configuration(format!("{} is not a valid URL: {}", key, e)))
}

fn parse_contract(key: &str, value: &str) -> Result<ContractId, AppError> {
    require_non_empty(key, value)?;
    value
        .parse::<ContractId>()
        .map_err(|e| AppError::Configuration(format!("{}: {}", key, e)))
}
