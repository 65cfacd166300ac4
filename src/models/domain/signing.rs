use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 签名私钥（hex）。Debug 输出脱敏，避免进入日志
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(hex_key: impl Into<String>) -> Self {
        Self(hex_key.into())
    }

    /// 32 字节私钥，或带压缩标记 `01` 的 33 字节
    pub fn validate(&self) -> Result<(), AppError> {
        let raw = self.0.trim().trim_start_matches("0x");
        let bytes = hex::decode(raw)
            .map_err(|e| AppError::Configuration(format!("signer private key is not hex: {}", e)))?;
        match bytes.len() {
            32 | 33 => Ok(()),
            n => Err(AppError::Configuration(format!(
                "signer private key must be 32 or 33 bytes, got {}",
                n
            ))),
        }
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

/// 链上 post-condition 模式；wire 值与交易编码一致
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostConditionMode {
    /// 不校验 post-condition
    #[default]
    Allow,
    Deny,
}

impl PostConditionMode {
    pub fn wire_value(&self) -> u8 {
        match self {
            PostConditionMode::Allow => 1,
            PostConditionMode::Deny => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let key = SecretKey::new("ab".repeat(32));
        assert_eq!(format!("{:?}", key), "SecretKey(***)");
    }

    #[test]
    fn accepts_plain_and_compressed_keys() {
        assert!(SecretKey::new("11".repeat(32)).validate().is_ok());
        assert!(SecretKey::new(format!("{}01", "11".repeat(32))).validate().is_ok());
        assert!(SecretKey::new("11".repeat(20)).validate().is_err());
        assert!(SecretKey::new("zz".repeat(32)).validate().is_err());
    }
}
