pub mod stacks_api;
mod retry_adapter;

pub use stacks_api::{ChainIndex, StacksApiClient};
pub use retry_adapter::RetryAdapter;
