pub mod balance_guard;

pub use balance_guard::ensure_affordable;
