pub mod balance;
pub mod fee;
pub mod nonce;
pub mod submitter;
pub mod types;
