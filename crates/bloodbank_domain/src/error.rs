//! Error taxonomy shared by the store, services and HTTP layer

use thiserror::Error;

/// Main error type for blood bank operations
#[derive(Error, Debug)]
pub enum BloodBankError {
    #[error("{record} validation failed: {}", .issues.join(", "))]
    ValidationError { record: String, issues: Vec<String> },

    #[error("{resource} not found")]
    NotFoundError { resource: String, id: String },

    #[error("Store operation failed: {operation}")]
    StoreError {
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error: {field}")]
    ConfigurationError {
        field: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BloodBankError {
    /// Create a validation error for a single issue
    pub fn validation_error(record: impl Into<String>, issue: impl Into<String>) -> Self {
        Self::ValidationError { record: record.into(), issues: vec![issue.into()] }
    }

    /// Create a validation error listing every issue found on a record
    pub fn validation_errors(record: impl Into<String>, issues: Vec<String>) -> Self {
        Self::ValidationError { record: record.into(), issues }
    }

    /// Create a not-found error for a record identifier
    pub fn not_found_error(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFoundError { resource: resource.into(), id: id.into() }
    }

    /// Create a new store error
    pub fn store_error(operation: impl Into<String>) -> Self {
        Self::StoreError { operation: operation.into(), source: None }
    }

    /// Create a new store error with source
    pub fn store_error_with_source(
        operation: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::StoreError { operation: operation.into(), source: Some(source.into()) }
    }

    /// Create a new configuration error
    pub fn configuration_error(field: impl Into<String>) -> Self {
        Self::ConfigurationError { field: field.into(), source: None }
    }

    /// Create a new configuration error with source
    pub fn configuration_error_with_source(
        field: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigurationError { field: field.into(), source: Some(Box::new(source)) }
    }

    /// Get the error code for HTTP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "VALIDATION_ERROR",
            Self::NotFoundError { .. } => "NOT_FOUND",
            Self::StoreError { .. } => "STORE_ERROR",
            Self::ConfigurationError { .. } => "CONFIGURATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::ValidationError { .. } => 400,
            Self::NotFoundError { .. } => 404,
            Self::StoreError { .. } => 500,
            Self::ConfigurationError { .. } => 500,
        }
    }

    /// Message shown to API callers. Store driver details are appended so
    /// operators can see what the backend reported.
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

/// Result type alias for blood bank operations
pub type Result<T> = std::result::Result<T, BloodBankError>;
