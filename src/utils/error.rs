use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitterError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to load catalog resource '{resource}': {reason}")]
    CatalogLoadError { resource: String, reason: String },

    #[error("Duplicate module id {id} in catalog")]
    DuplicateModuleError { id: u32 },

    #[error("Duplicate stat definition '{name}' in catalog")]
    DuplicateStatError { name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FitterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FitterError::HttpError(_) => ErrorCategory::Network,
            FitterError::SerializationError(_)
            | FitterError::CatalogLoadError { .. }
            | FitterError::DuplicateModuleError { .. }
            | FitterError::DuplicateStatError { .. } => ErrorCategory::Data,
            FitterError::ConfigError { .. }
            | FitterError::ConfigValidationError { .. }
            | FitterError::InvalidConfigValueError { .. }
            | FitterError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FitterError::IoError(_) | FitterError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether this error may surface from a catalog load.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            FitterError::HttpError(_)
                | FitterError::IoError(_)
                | FitterError::SerializationError(_)
                | FitterError::CatalogLoadError { .. }
                | FitterError::DuplicateModuleError { .. }
                | FitterError::DuplicateStatError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FitterError::HttpError(_) => "Could not reach the catalog server".to_string(),
            FitterError::IoError(e) => format!("File system error: {}", e),
            FitterError::SerializationError(_) => "Catalog data is not valid JSON".to_string(),
            FitterError::CsvError(_) => "Could not write the CSV report".to_string(),
            FitterError::CatalogLoadError { resource, .. } => {
                format!("Catalog resource '{}' could not be loaded", resource)
            }
            FitterError::DuplicateModuleError { id } => {
                format!("Module id {} appears more than once in the catalog", id)
            }
            FitterError::DuplicateStatError { name } => {
                format!("Stat '{}' is defined more than once", name)
            }
            FitterError::ConfigError { message } => format!("Configuration problem: {}", message),
            FitterError::ConfigValidationError { field, message } => {
                format!("Invalid configuration in '{}': {}", field, message)
            }
            FitterError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            FitterError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the catalog URL and your network connection, then run again",
            ErrorCategory::Data => "Fix the modules/stats JSON documents and run again",
            ErrorCategory::Configuration => "Check the configuration file and command-line flags",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, FitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_errors_are_classified() {
        let err = FitterError::DuplicateModuleError { id: 3 };
        assert!(err.is_load_error());
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = FitterError::MissingConfigError {
            field: "catalog.source".to_string(),
        };
        assert!(!err.is_load_error());
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("catalog.source"));
    }
}
