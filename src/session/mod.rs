pub mod types;
pub mod runner;

pub use types::*;
pub use runner::run_session;
