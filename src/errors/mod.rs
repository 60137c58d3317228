use axum::http::StatusCode;
use thiserror::Error;

/// Common trait for all custom error types in the application
pub trait AppError: std::error::Error + Send + Sync + 'static {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get the error code for frontend handling
    fn error_code(&self) -> &'static str;
}

/// Macro to implement IntoResponse for all AppError types
/// This provides consistent HTTP response formatting
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                use crate::errors::AppError;
                use axum::response::Json;
                use serde_json::json;

                let status = self.status_code();
                if status.is_server_error() {
                    tracing::error!("❌ {} ({}): {}", self.error_code(), status, self);
                } else {
                    tracing::debug!("{} ({}): {}", self.error_code(), status, self);
                }

                let body = Json(json!({
                    "error": self.user_message(),
                    "code": self.error_code(),
                    "status": status.as_u16()
                }));

                (status, body).into_response()
            }
        }
    };
}

pub(crate) use impl_into_response;

pub mod store;

pub use store::StoreError;

/// Error returned by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Store(e) => e.status_code(),
        }
    }

    fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest { message } => message.clone(),
            ApiError::Store(e) => e.user_message(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Store(e) => e.error_code(),
        }
    }
}

impl_into_response!(ApiError);

impl ApiError {
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest { message: message.into() }
    }
}
