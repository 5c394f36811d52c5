use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Studio not found: {0}")]
    TenantNotFound(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Slot no longer available: {0}")]
    SlotUnavailable(String),

    #[error("Cart hold expired at {0}")]
    HoldExpired(DateTime<Utc>),

    #[error("Backend error: {0}")]
    Backend(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Field-scoped validation failure, rendered inline next to `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The form field a validation error belongs to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
