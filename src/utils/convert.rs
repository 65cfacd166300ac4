use crate::errors::AppError;
use serde::{Deserialize, Deserializer};

/// API 中部分整数以字符串返回（fee_rate、balance），部分以数字返回
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

/// serde 辅助：接受 `180` 或 `"180"`
pub fn u64_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse::<u64>().map_err(serde::de::Error::custom),
    }
}

/// 解析十进制字符串金额（micro-STX 等最小单位）
pub fn parse_amount(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| AppError::Conversion(format!("无效的金额 '{}': {}", raw, e)))
}
