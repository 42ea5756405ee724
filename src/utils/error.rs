use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Page store rejected draft '{title}': {reason}")]
    PageRejected { title: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::HttpError(_) => ErrorCategory::Network,
            ImportError::CsvError(_) => ErrorCategory::Input,
            ImportError::IoError(_) | ImportError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            ImportError::PageRejected { .. } => ErrorCategory::Storage,
            ImportError::MissingConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a single rejected row never stops a batch
            ImportError::PageRejected { .. } => ErrorSeverity::Low,
            ImportError::HttpError(_) => ErrorSeverity::Medium,
            ImportError::CsvError(_) | ImportError::SerializationError(_) => ErrorSeverity::High,
            ImportError::IoError(_) => ErrorSeverity::High,
            ImportError::MissingConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::HttpError(e) => format!("Could not reach the page store: {}", e),
            ImportError::CsvError(e) => format!("The CSV file could not be parsed: {}", e),
            ImportError::IoError(e) => format!("A file operation failed: {}", e),
            ImportError::SerializationError(e) => format!("Could not encode page data: {}", e),
            ImportError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            ImportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ImportError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            ImportError::PageRejected { title, reason } => {
                format!("Page '{}' was not created: {}", title, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the TOML configuration file and command line flags"
            }
            ErrorCategory::Input => "Make sure the file is comma-separated CSV with a header row",
            ErrorCategory::Network => "Check the store endpoint, credentials and network access",
            ErrorCategory::Storage => "Check that the output location exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
