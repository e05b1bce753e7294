use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Failed to load config: {0}")]
    Config(#[from] envy::Error),
}

impl AppError {
    /// Text placed in the envelope's `message`
    ///
    /// Errors raised by MySQL itself carry the server's message verbatim,
    /// without sqlx's "error returned from database" prefix.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Database(e) => e
                .as_database_error()
                .map(|db| db.message().to_string())
                .unwrap_or_else(|| e.to_string()),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed before reaching a handler");

        let body = Json(ApiResponse::<()>::failure(self.client_message()));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
