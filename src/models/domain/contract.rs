use crate::errors::AppError;
use std::fmt;
use std::str::FromStr;

/// 合约限定标识 `<address>.<name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractId {
    address: String,
    name: String,
}

impl ContractId {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Result<Self, AppError> {
        let address = address.into();
        let name = name.into();
        if address.trim().is_empty() || name.trim().is_empty() || name.contains('.') {
            return Err(AppError::Conversion(format!(
                "无效的合约标识: '{}.{}'",
                address, name
            )));
        }
        Ok(Self { address, name })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for ContractId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, name) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| AppError::Conversion(format!("合约标识缺少 '.': '{}'", s)))?;
        Self::new(address, name)
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.address, self.name)
    }
}

/// keeper 自己会提交的那笔调用：用于识别 mempool 中"同一笔"交易
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTarget {
    pub sender: String,
    pub contract: ContractId,
    pub function_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_qualified_identifier() {
        let id: ContractId = "SP3K8BC0PPEVCV7NZ6QSRWPQ2JE9E5B6N3PA0KBR9.oracle-proxy"
            .parse()
            .unwrap();
        assert_eq!(id.address(), "SP3K8BC0PPEVCV7NZ6QSRWPQ2JE9E5B6N3PA0KBR9");
        assert_eq!(id.name(), "oracle-proxy");
        assert_eq!(
            id.to_string(),
            "SP3K8BC0PPEVCV7NZ6QSRWPQ2JE9E5B6N3PA0KBR9.oracle-proxy"
        );
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for raw in ["", "SPADDR", ".name", "SPADDR.", "SPADDR.a.b"] {
            assert!(raw.parse::<ContractId>().is_err(), "{raw} should not parse");
        }
    }
}
