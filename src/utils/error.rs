use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown pattern: {name}")]
    UnknownPattern {
        name: String,
        available: Vec<String>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Demo '{demo}' failed: {message}")]
    DemoError { demo: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Lookup,
    Io,
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::UnknownPattern { .. } => ErrorCategory::Lookup,
            CatalogError::IoError(_) | CatalogError::SerializationError(_) => ErrorCategory::Io,
            CatalogError::TomlError(_)
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            CatalogError::DemoError { .. } => ErrorCategory::Demo,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Demo => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::UnknownPattern { name, .. } => {
                format!("There is no pattern demo called '{}'", name)
            }
            CatalogError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            CatalogError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            CatalogError::TomlError(_) | CatalogError::ConfigValidationError { .. } => {
                "The configuration file could not be read".to_string()
            }
            CatalogError::IoError(e) => format!("File system error: {}", e),
            CatalogError::SerializationError(e) => format!("Could not render output: {}", e),
            CatalogError::DemoError { demo, message } => {
                format!("The '{}' demo stopped early: {}", demo, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CatalogError::UnknownPattern { available, .. } if !available.is_empty() => {
                format!("Available patterns: {}", available.join(", "))
            }
            CatalogError::UnknownPattern { .. } => {
                "Run with --list to see every available pattern".to_string()
            }
            CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::TomlError(_) => {
                "Check the TOML configuration file against the documented sections".to_string()
            }
            CatalogError::IoError(_) => "Check that the file exists and is readable".to_string(),
            CatalogError::SerializationError(_) => "Retry with --format text".to_string(),
            CatalogError::DemoError { .. } => "Re-run the demo with --verbose".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_pattern_is_high_severity_lookup() {
        let err = CatalogError::UnknownPattern {
            name: "singleton".to_string(),
            available: vec!["builder".to_string(), "proxy".to_string()],
        };
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("singleton"));
        assert_eq!(err.recovery_suggestion(), "Available patterns: builder, proxy");
    }

    #[test]
    fn test_unknown_pattern_without_names_points_to_list() {
        let err = CatalogError::UnknownPattern {
            name: "singleton".to_string(),
            available: Vec::new(),
        };
        assert!(err.recovery_suggestion().contains("--list"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = CatalogError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
