pub mod convert;
pub mod logger;
pub mod time;

pub use convert::*;
pub use time::now_unix_secs;
