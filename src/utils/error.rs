use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopifyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Response body is not valid JSON (HTTP {status}): {message}")]
    InvalidResponseBody { status: u16, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ShopifyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShopifyError::ApiError(_) => ErrorCategory::Network,
            ShopifyError::IoError(_) => ErrorCategory::System,
            ShopifyError::SerializationError(_) | ShopifyError::InvalidResponseBody { .. } => {
                ErrorCategory::Data
            }
            ShopifyError::ConfigError { .. }
            | ShopifyError::ConfigValidationError { .. }
            | ShopifyError::InvalidConfigValueError { .. }
            | ShopifyError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ShopifyError::ApiError(e) if e.is_timeout() || e.is_connect() => ErrorSeverity::Medium,
            ShopifyError::ApiError(_) => ErrorSeverity::High,
            ShopifyError::InvalidResponseBody { .. } => ErrorSeverity::Medium,
            ShopifyError::SerializationError(_) => ErrorSeverity::High,
            ShopifyError::IoError(_) => ErrorSeverity::Critical,
            ShopifyError::ConfigError { .. }
            | ShopifyError::ConfigValidationError { .. }
            | ShopifyError::InvalidConfigValueError { .. }
            | ShopifyError::MissingConfigError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ShopifyError::ApiError(e) if e.is_timeout() => {
                "Increase client.timeout_seconds or retry later".to_string()
            }
            ShopifyError::ApiError(_) => {
                "Check network connectivity and the shop domain".to_string()
            }
            ShopifyError::IoError(_) => "Check that the file exists and is readable".to_string(),
            ShopifyError::SerializationError(_) => {
                "Make sure the input file contains valid JSON".to_string()
            }
            ShopifyError::InvalidResponseBody { status, .. } => format!(
                "The API answered HTTP {} with a non-JSON body; check the endpoint and API version",
                status
            ),
            ShopifyError::ConfigError { .. } | ShopifyError::ConfigValidationError { .. } => {
                "Review the TOML configuration file".to_string()
            }
            ShopifyError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            ShopifyError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the Shopify API: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Could not read response data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopifyError>;
