use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use tracing::warn;

use crate::error::VitiError;
use crate::router::AppState;

/// The caller identified by a valid bearer token.
///
/// Extraction fails with `401` and `WWW-Authenticate: Bearer` when the header
/// is missing, malformed, expired or signed with another key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = VitiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    warn!(
                        path = %parts.uri.path(),
                        reason = %e,
                        "rejecting request without bearer token"
                    );
                    VitiError::Unauthorized
                })?;
        let claims = state.tokens.verify(bearer.token()).inspect_err(|_| {
            warn!(path = %parts.uri.path(), "rejecting invalid or expired bearer token");
        })?;
        Ok(Self {
            id: claims.id,
            username: claims.sub,
        })
    }
}
