use crate::core::selection::{scan_input_dir, WORKBOOK_EXTENSIONS};
use crate::core::workbook::DEFAULT_SHEET_NAME;
use crate::core::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{
    validate_existing_dir, validate_file_extensions, validate_non_empty_string, validate_path,
    validate_required_field, Validate,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum InputSelection {
    Files(Vec<PathBuf>),
    Directory(PathBuf),
}

/// Fully resolved settings for one conversion run.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub input: InputSelection,
    pub output_dir: PathBuf,
    pub sheet_name: String,
    pub raw_mode: bool,
    pub merge_manifest: bool,
    pub monitor: bool,
}

impl ConversionConfig {
    /// Workbook paths to hand to the engine.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        match &self.input {
            InputSelection::Files(files) => Ok(files.clone()),
            InputSelection::Directory(dir) => scan_input_dir(dir),
        }
    }
}

impl ConfigProvider for ConversionConfig {
    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    fn raw_mode(&self) -> bool {
        self.raw_mode
    }

    fn merge_manifest(&self) -> bool {
        self.merge_manifest
    }
}

impl Validate for ConversionConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output.dir", &self.output_dir.to_string_lossy())?;
        validate_non_empty_string("conversion.sheet_name", &self.sheet_name)?;

        match &self.input {
            InputSelection::Files(files) => {
                validate_file_extensions("input.files", files, &WORKBOOK_EXTENSIONS)
            }
            InputSelection::Directory(dir) => validate_existing_dir("input.dir", dir),
        }
    }
}

/// Settings contributed by one source (command line or config file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigLayer {
    pub files: Vec<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub sheet_name: Option<String>,
    pub raw_mode: Option<bool>,
    pub merge_manifest: Option<bool>,
    pub monitor: Option<bool>,
}

impl ConfigLayer {
    /// Stacks `self` on top of `base`; set values in `self` win.
    ///
    /// The input selection is taken as a unit so a directory given on the
    /// command line is not shadowed by files listed in the config file.
    pub fn over(self, base: ConfigLayer) -> ConfigLayer {
        let (files, input_dir) = if !self.files.is_empty() || self.input_dir.is_some() {
            (self.files, self.input_dir)
        } else {
            (base.files, base.input_dir)
        };

        ConfigLayer {
            files,
            input_dir,
            output_dir: self.output_dir.or(base.output_dir),
            sheet_name: self.sheet_name.or(base.sheet_name),
            raw_mode: self.raw_mode.or(base.raw_mode),
            merge_manifest: self.merge_manifest.or(base.merge_manifest),
            monitor: self.monitor.or(base.monitor),
        }
    }

    pub fn resolve(self) -> Result<ConversionConfig> {
        let output_dir = validate_required_field("output.dir", &self.output_dir)?.clone();

        // Explicit files take priority over the input directory.
        let input = if !self.files.is_empty() {
            InputSelection::Files(self.files)
        } else if let Some(dir) = self.input_dir {
            InputSelection::Directory(dir)
        } else {
            return Err(ConvertError::ConfigError {
                message: "Select an input directory or one or more workbook files".to_string(),
            });
        };

        Ok(ConversionConfig {
            input,
            output_dir,
            sheet_name: self
                .sheet_name
                .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            raw_mode: self.raw_mode.unwrap_or(false),
            merge_manifest: self.merge_manifest.unwrap_or(false),
            monitor: self.monitor.unwrap_or(false),
        })
    }
}
