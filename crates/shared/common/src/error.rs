//! Unified error handling for the ticket service.
//!
//! Provides a single error type that can be converted to
//! Tonic gRPC status codes, and back again on the client side.

use domain::DomainError;
use thiserror::Error;
use tonic::Status;

/// Underlying cause of a storage failure.
#[derive(Error, Debug)]
pub enum StorageCause {
    #[cfg(feature = "database")]
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Tags column could not be encoded or decoded as a JSON array
    #[error("tags are not a JSON string array: {0}")]
    Tags(#[from] serde_json::Error),
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("{operation}: ticket not found: {id}")]
    NotFound { operation: &'static str, id: String },

    /// Any fault while talking to or decoding from the store
    #[error("{operation} failed for {target}")]
    Storage {
        operation: &'static str,
        target: String,
        #[source]
        source: StorageCause,
    },

    // gRPC specific
    #[error("Service unavailable")]
    ServiceUnavailable(String),

    #[error("gRPC error: {0}")]
    Grpc(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Message plus the storage cause, for server-side logs only.
    pub fn detail(&self) -> String {
        match self {
            AppError::Storage { source, .. } => format!("{}: {}", self, source),
            _ => self.to_string(),
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound { .. } => self.to_string(),

            // Hide details for internal errors
            AppError::Storage {
                operation,
                target,
                source,
            } => {
                tracing::error!(operation = %operation, ticket = %target, "Storage error: {}", source);
                format!("{} failed: a storage error occurred", operation)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::ServiceUnavailable(service) => {
                tracing::error!("Service unavailable: {}", service);
                format!("Service {} is unavailable", service)
            }
            AppError::Grpc(msg) => {
                tracing::error!("gRPC error: {}", msg);
                "A service communication error occurred".to_string()
            }
        }
    }

    /// True for a missing target, as opposed to a broken service
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::Validation(_) => tonic::Code::InvalidArgument,
            AppError::NotFound { .. } => tonic::Code::NotFound,
            AppError::ServiceUnavailable(_) => tonic::Code::Unavailable,
            _ => tonic::Code::Internal,
        };

        Status::new(code, err.user_message())
    }
}

impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        match status.code() {
            tonic::Code::InvalidArgument => AppError::Validation(status.message().to_string()),
            tonic::Code::Unavailable => AppError::ServiceUnavailable(status.message().to_string()),
            _ => AppError::Grpc(status.message().to_string()),
        }
    }
}

impl AppError {
    /// Convert a remote status, keeping `NOT_FOUND` tied to the requested id.
    pub fn from_status(operation: &'static str, id: &str, status: Status) -> Self {
        match status.code() {
            tonic::Code::NotFound => AppError::not_found(operation, id),
            _ => AppError::from(status),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, operation: &'static str, id: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, operation: &'static str, id: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(operation, id))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(operation: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            operation,
            id: id.into(),
        }
    }

    pub fn storage(
        operation: &'static str,
        target: impl Into<String>,
        source: impl Into<StorageCause>,
    ) -> Self {
        AppError::Storage {
            operation,
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
