pub mod contract;
pub mod fee;
pub mod nonce;
pub mod pending;
pub mod signing;

pub use contract::{CallTarget, ContractId};
pub use fee::{FeeStatistics, Percentile, PercentileFees};
pub use nonce::{NonceDecision, NonceInfo, TxKind};
pub use pending::{ContractCallInfo, PendingState, PendingTransaction, TxType};
pub use signing::{PostConditionMode, SecretKey};
