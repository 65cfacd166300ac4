pub mod dry_run_submitter;
pub mod relay_submitter;
pub mod submitter_trait;

pub use dry_run_submitter::DryRunSubmitter;
pub use relay_submitter::RelaySubmitter;
pub use submitter_trait::ContractCallSubmitter;
