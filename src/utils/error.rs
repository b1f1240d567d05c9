use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Workbook error: {0}")]
    WorkbookError(#[from] calamine::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Cannot derive season from file name '{file}' (expected a YYYY_YYYY pattern)")]
    SeasonNotFound { file: String },

    #[error("Cannot read sheet '{sheet}': {message}")]
    SheetReadError { sheet: String, message: String },

    #[error("Missing columns: {}", .columns.join(", "))]
    MissingColumnsError { columns: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::ConfigError { .. }
            | ConvertError::MissingConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ConvertError::SeasonNotFound { .. }
            | ConvertError::SheetReadError { .. }
            | ConvertError::WorkbookError(_) => ErrorCategory::Input,
            ConvertError::MissingColumnsError { .. } => ErrorCategory::Data,
            ConvertError::IoError(_) | ConvertError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // A bad workbook only costs that one file.
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code used when this error aborts a run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium | ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ConvertError::ConfigError { .. } | ConvertError::MissingConfigError { .. } => {
                "Pass --output-dir and either --files or --input-dir (see --help)".to_string()
            }
            ConvertError::InvalidConfigValueError { field, .. }
            | ConvertError::ConfigValidationError { field, .. } => {
                format!("Check the value given for '{}'", field)
            }
            ConvertError::SeasonNotFound { .. } => {
                "Rename the file so it contains the season, e.g. 'Statistiche_2021_2022.xlsx'"
                    .to_string()
            }
            ConvertError::SheetReadError { sheet, .. } => format!(
                "Make sure the workbook is an FCM export containing the '{}' sheet",
                sheet
            ),
            ConvertError::WorkbookError(_) => {
                "Re-export the workbook from FCM; the file may be corrupted".to_string()
            }
            ConvertError::MissingColumnsError { .. } => {
                "Export the full statistics sheet without removing columns".to_string()
            }
            ConvertError::IoError(_) | ConvertError::SerializationError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Cannot read input: {}", self),
            ErrorCategory::Data => format!("Unexpected sheet content: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
