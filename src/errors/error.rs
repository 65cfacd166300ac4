use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// 启动配置缺失或非法（不会执行任何一次运行）
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 链索引 API 网络/状态码错误，下一次调度可安全重试
    #[error("Upstream query failed: {0}")]
    UpstreamQuery(String),

    /// 响应结构不符合约定（缺字段、缺统计项等）
    #[error("Unexpected upstream response: {0}")]
    UnexpectedResponse(String),

    #[error("Insufficient funds: balance {balance} is below fee rate {fee_rate}")]
    InsufficientFunds { balance: u64, fee_rate: u64 },

    /// 签名/广播失败，下一次运行由 reconciler 通过 mempool 检测副作用
    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    /// 读取/决策阶段超时；此时尚未提交任何交易
    #[error("Run timed out after {0}s")]
    Timeout(u64),

    /// 类型转换错误（字符串数字、溢出等）
    #[error("类型转换错误: {0}")]
    Conversion(String),
}

impl AppError {
    /// 只有网络层面的读失败值得在同一次运行内重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::UpstreamQuery(_))
    }
}

impl From<::config::ConfigError> for AppError {
    fn from(err: ::config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}
