pub mod gate;
pub mod keeper_service;
pub mod tx;

pub use keeper_service::{KeeperService, RunOutcome};
