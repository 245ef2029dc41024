use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::error::VitiError;
use crate::middleware::CurrentUser;
use crate::router::AppState;
use crate::service::{RefreshReport, refresh_all};

/// Reload every dataset from the portal. Existing rows survive any failure.
pub async fn refresh_handler(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<RefreshReport>), VitiError> {
    info!(username = %user.username, "dataset refresh requested");
    let report = refresh_all(&state.portal, &state.storage).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
