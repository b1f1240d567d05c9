pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LogFormat};

pub use config::cli::LocalStorage;
pub use config::settings::{ConfigLayer, ConversionConfig, InputSelection};
pub use config::toml_config::TomlConfig;
pub use core::{etl::EtlEngine, pipeline::ConversionPipeline, workbook::CalamineReader};
pub use domain::model::RunReport;
pub use utils::error::{ConvertError, Result};
pub use utils::run_log::RunLog;
