use crate::config::settings::ConfigLayer;
use crate::core::selection::WORKBOOK_EXTENSIONS;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub conversion: Option<ConversionSection>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub files: Option<Vec<String>>,
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: Option<String>,
    pub merge_manifest: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionSection {
    pub sheet_name: Option<String>,
    pub raw_mode: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: Option<bool>,
}

impl TomlConfig {
    /// Loads a config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses config text after `${VAR}` substitution
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn sheet_name(&self) -> Option<&str> {
        self.conversion.as_ref()?.sheet_name.as_deref()
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.output.as_ref()?.dir.as_deref()
    }

    pub fn input_files(&self) -> &[String] {
        self.input
            .as_ref()
            .and_then(|input| input.files.as_deref())
            .unwrap_or(&[])
    }

    pub fn monitoring_enabled(&self) -> Option<bool> {
        self.monitoring.as_ref()?.enabled
    }

    /// Settings this file contributes, to be stacked under the command line.
    pub fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            files: self.input_files().iter().map(PathBuf::from).collect(),
            input_dir: self
                .input
                .as_ref()
                .and_then(|input| input.dir.as_ref())
                .map(PathBuf::from),
            output_dir: self.output_dir().map(PathBuf::from),
            sheet_name: self.sheet_name().map(str::to_string),
            raw_mode: self.conversion.as_ref().and_then(|c| c.raw_mode),
            merge_manifest: self.output.as_ref().and_then(|o| o.merge_manifest),
            monitor: self.monitoring_enabled(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = self.output_dir() {
            validate_path("output.dir", dir)?;
        }
        if let Some(sheet) = self.sheet_name() {
            validate_non_empty_string("conversion.sheet_name", sheet)?;
        }
        validate_file_extensions("input.files", self.input_files(), &WORKBOOK_EXTENSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[input]
files = ["stats/2020_2021.xlsx", "stats/2021_2022.xls"]

[output]
dir = "./json"
merge_manifest = true

[conversion]
sheet_name = "Tutti i dati"
raw_mode = true

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let layer = config.to_layer();
        assert_eq!(layer.files.len(), 2);
        assert_eq!(layer.output_dir, Some(PathBuf::from("./json")));
        assert_eq!(layer.raw_mode, Some(true));
        assert_eq!(layer.merge_manifest, Some(true));
        assert_eq!(layer.monitor, Some(true));
    }

    #[test]
    fn test_empty_config_contributes_nothing() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.to_layer(), ConfigLayer::default());
    }

    #[test]
    fn test_sections_may_be_left_empty() {
        let config = TomlConfig::from_toml_str("[monitoring]\n[output]\n").unwrap();
        assert!(config.monitoring.is_some());
        assert_eq!(config.monitoring_enabled(), None);
        assert_eq!(config.to_layer(), ConfigLayer::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FCM_TEST_OUTPUT_DIR", "/tmp/fcm-json");

        let toml_content = r#"
[output]
dir = "${FCM_TEST_OUTPUT_DIR}"

[input]
dir = "${FCM_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_dir(), Some("/tmp/fcm-json"));
        assert_eq!(
            config.input.unwrap().dir.as_deref(),
            Some("${FCM_TEST_UNSET_VARIABLE}")
        );

        std::env::remove_var("FCM_TEST_OUTPUT_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[input]
files = ["2021_2022.csv"]
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[conversion]
sheet_name = "   "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[output\ndir = 1").unwrap_err();
        assert!(matches!(err, ConvertError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\ndir = \"./from-file\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_dir(), Some("./from-file"));
    }
}
