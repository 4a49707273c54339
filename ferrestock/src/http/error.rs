// HTTP error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// Body sent whenever the database handle could not be established
pub const DATABASE_CONNECTION_ERROR: &str = "Database connection error.";

/// Application error with HTTP status code, rendered as plain text
#[derive(Debug, Clone)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// 500 with the fixed connection-failure message
    pub fn database_connection() -> Self {
        Self::internal_server_error(DATABASE_CONNECTION_ERROR)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

/// Convert ferrestock_core errors to HTTP errors
///
/// Driver details are logged, never sent to the client.
impl From<ferrestock_core::Error> for AppError {
    fn from(err: ferrestock_core::Error) -> Self {
        use ferrestock_core::Error;

        match err {
            Error::Connection(reason) => {
                tracing::error!("Database connection error: {}", reason);
                AppError::database_connection()
            }
            other => {
                tracing::error!("Internal error: {}", other);
                AppError::internal_server_error("Internal server error")
            }
        }
    }
}
