pub mod staleness_gate;

pub use staleness_gate::{GateDecision, SkipReason, StalenessGate};
