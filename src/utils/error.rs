use crate::xml::XmlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Cannot read input file {path}: {source}")]
    InputReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML serialization error: {0}")]
    XmlError(#[from] XmlError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration file could not be parsed: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Serialization,
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
            ConvertError::InputNotFound { .. } | ConvertError::InputReadError { .. } => {
                ErrorCategory::Input
            }
            ConvertError::XmlError(_) => ErrorCategory::Serialization,
            ConvertError::IoError(_) => ErrorCategory::System,
            ConvertError::ConfigError { .. }
            | ConvertError::ConfigParseError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Serialization => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Exit status for the binary; configuration problems are distinguished
    /// from failures that happen while converting.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::InputNotFound { path } => {
                format!("Cannot find the INI file '{}'", path)
            }
            ConvertError::InputReadError { path, source } => {
                format!("Cannot read the INI file '{}': {}", path, source)
            }
            ConvertError::IoError(e) => format!("A file operation failed: {}", e),
            ConvertError::XmlError(e) => format!("The XML document could not be written: {}", e),
            ConvertError::MissingConfigError { field } => {
                format!("The setting '{}' is required", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the INI file path and that the file is readable",
            ErrorCategory::Configuration => {
                "Review the command-line arguments and the --config file"
            }
            ErrorCategory::Serialization => {
                "Remove control characters from the INI file; XML 1.0 cannot represent them"
            }
            ErrorCategory::System => {
                "Check that the output directory exists and is writable, then retry"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
