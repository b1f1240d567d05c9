pub mod error;
pub mod logger;
pub mod monitor;
pub mod open_dir;
pub mod run_log;
pub mod validation;
