use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::IntoResponse,
};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::config::CONFIG;

#[derive(Debug, ThisError)]
pub enum VitiError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("{0}")]
    JsonBody(#[from] JsonRejection),

    #[error("{0}")]
    FormBody(#[from] FormRejection),

    #[error("{0}")]
    PathParam(#[from] PathRejection),

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Missing or invalid bearer token")]
    Unauthorized,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Resource not found")]
    NotFound,

    #[error("Username already registered")]
    UsernameTaken,

    #[error("Download of {url} failed with status {status}")]
    Download { url: String, status: StatusCode },

    #[error("Column `{column}` missing from {table} source")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("Invalid number `{value}` in {table} source")]
    InvalidNumber { table: &'static str, value: String },
}

impl VitiError {
    /// Transport failures and upstream 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            VitiError::Reqwest(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            VitiError::Download { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    fn is_refresh_failure(&self) -> bool {
        matches!(
            self,
            VitiError::Reqwest(_)
                | VitiError::UrlParse(_)
                | VitiError::Csv(_)
                | VitiError::Download { .. }
                | VitiError::MissingColumn { .. }
                | VitiError::InvalidNumber { .. }
        )
    }
}

impl IntoResponse for VitiError {
    fn into_response(self) -> axum::response::Response {
        let (status, detail) = match &self {
            VitiError::Unauthorized => {
                let mut resp = (
                    StatusCode::UNAUTHORIZED,
                    Json(ApiErrorResponse {
                        detail: CONFIG.error_401.clone(),
                    }),
                )
                    .into_response();
                resp.headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                return resp;
            }
            VitiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            VitiError::NotFound => (StatusCode::NOT_FOUND, CONFIG.error_404.clone()),
            VitiError::UsernameTaken => (StatusCode::CONFLICT, self.to_string()),
            VitiError::JsonBody(r) => (r.status(), r.body_text()),
            VitiError::FormBody(r) => (r.status(), r.body_text()),
            VitiError::PathParam(r) => (r.status(), r.body_text()),
            e if e.is_refresh_failure() => {
                error!(error = %e, "dataset refresh failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to refresh datasets: {e}"),
                )
            }
            e => {
                error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ApiErrorResponse { detail })).into_response()
    }
}

/// Error body shared by every failing route.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub detail: String,
}
