use axum::http::StatusCode;
use thiserror::Error;

use super::{impl_into_response, AppError};
use crate::models::StoreErrorBody;
use crate::services::callback::CompletionDropped;

/// Failures reported by the document store, carried to the caller unchanged
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to reach the document store: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Not found: {error}: {reason}")]
    NotFound { error: String, reason: String },

    #[error("Conflict: {error}: {reason}")]
    Conflict { error: String, reason: String },

    #[error("Bad request: {error}: {reason}")]
    BadRequest { error: String, reason: String },

    #[error("Unauthorized: {error}: {reason}")]
    Unauthorized { error: String, reason: String },

    #[error("Document store returned {status}: {error}: {reason}")]
    Server { status: u16, error: String, reason: String },

    #[error("Malformed response from the document store: {details}")]
    MalformedResponse { details: String },

    #[error(transparent)]
    CompletionDropped(#[from] CompletionDropped),
}

impl StoreError {
    /// Classifies a non-2xx store response by its HTTP status
    pub fn from_response(status: u16, body: StoreErrorBody) -> Self {
        let StoreErrorBody { error, reason } = body;
        match status {
            400 => StoreError::BadRequest { error, reason },
            401 | 403 => StoreError::Unauthorized { error, reason },
            404 => StoreError::NotFound { error, reason },
            409 => StoreError::Conflict { error, reason },
            _ => StoreError::Server { status, error, reason },
        }
    }

    pub fn conflict() -> Self {
        StoreError::Conflict {
            error: "conflict".to_string(),
            reason: "Document update conflict.".to_string(),
        }
    }

    pub fn not_found<S: Into<String>>(reason: S) -> Self {
        StoreError::NotFound {
            error: "not_found".to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed<S: Into<String>>(details: S) -> Self {
        StoreError::MalformedResponse { details: details.into() }
    }
}

impl AppError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Conflict { .. } => StatusCode::CONFLICT,
            StoreError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            StoreError::Connection(_)
            | StoreError::Unauthorized { .. }
            | StoreError::Server { .. }
            | StoreError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
            StoreError::CompletionDropped(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            StoreError::NotFound { .. } => "Memo not found".to_string(),
            StoreError::Conflict { .. } => {
                "Memo was changed by someone else. Reload it and try again".to_string()
            }
            StoreError::BadRequest { reason, .. } => format!("Invalid request: {}", reason),
            StoreError::Connection(_) => "Memo database is unreachable".to_string(),
            StoreError::Unauthorized { .. } => "Memo database rejected the credentials".to_string(),
            StoreError::Server { .. } | StoreError::MalformedResponse { .. } => {
                "Memo database returned an unexpected response".to_string()
            }
            StoreError::CompletionDropped(_) => "An internal error occurred".to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "STORE_NOT_FOUND",
            StoreError::Conflict { .. } => "STORE_CONFLICT",
            StoreError::BadRequest { .. } => "STORE_BAD_REQUEST",
            StoreError::Connection(_) => "STORE_UNREACHABLE",
            StoreError::Unauthorized { .. } => "STORE_UNAUTHORIZED",
            StoreError::Server { .. } => "STORE_SERVER_ERROR",
            StoreError::MalformedResponse { .. } => "STORE_MALFORMED_RESPONSE",
            StoreError::CompletionDropped(_) => "STORE_COMPLETION_DROPPED",
        }
    }
}

impl_into_response!(StoreError);
