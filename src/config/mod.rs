pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::settings::ConfigLayer;
#[cfg(feature = "cli")]
use crate::core::selection::parse_file_list;
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "FCM_Excel_2_JSON")]
#[command(about = "Convert FantaCalcio Manager season workbooks (.xls/.xlsx) into JSON")]
pub struct CliConfig {
    /// Workbooks to convert
    #[arg(value_name = "FILE")]
    pub paths: Vec<PathBuf>,

    /// Workbook list separated by ';', ',' or newlines (as copied from a file picker)
    #[arg(long)]
    pub files: Option<String>,

    /// Convert every workbook in this directory (ignored when files are given)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Where the season JSON files, seasons.json and conversion.log are written
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Sheet to read from each workbook [default: "Tutti i dati"]
    #[arg(long)]
    pub sheet: Option<String>,

    /// Keep cell values as found instead of normalizing numbers and percentages
    #[arg(long)]
    pub raw: bool,

    /// Keep seasons already listed in an existing seasons.json
    #[arg(long)]
    pub merge_manifest: bool,

    /// TOML file with default settings; command line flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Open the output directory when the run finishes
    #[arg(long)]
    pub open: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Settings given on the command line; unset flags stay open for lower layers.
    pub fn to_layer(&self) -> ConfigLayer {
        let mut files = self.paths.clone();
        if let Some(list) = &self.files {
            files.extend(parse_file_list(list));
        }

        ConfigLayer {
            files,
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            sheet_name: self.sheet.clone(),
            raw_mode: self.raw.then_some(true),
            merge_manifest: self.merge_manifest.then_some(true),
            monitor: self.monitor.then_some(true),
        }
    }
}
