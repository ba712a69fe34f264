pub mod error;
pub mod config;
pub mod util;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
