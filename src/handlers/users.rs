use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password};
use crate::db::DbUser;
use crate::error::VitiError;
use crate::handlers::datasets::Created;
use crate::middleware::{ApiForm, ApiJson, ApiPath, CurrentUser};
use crate::router::AppState;

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CallerEnvelope {
    #[serde(rename = "User")]
    pub user: CallerInfo,
}

#[derive(Debug, Serialize)]
pub struct CallerInfo {
    pub username: String,
    pub id: i64,
}

/// OAuth2 password grant form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UserPayload>,
) -> Result<(StatusCode, Json<Created>), VitiError> {
    let hashed = hash_password(payload.password, state.bcrypt_cost).await?;
    let id = state.storage.create_user(&payload.username, &hashed).await?;
    info!(user_id = id, username = %payload.username, "user registered");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn current_user(user: CurrentUser) -> Json<CallerEnvelope> {
    Json(CallerEnvelope {
        user: CallerInfo {
            username: user.username,
            id: user.id,
        },
    })
}

pub async fn get_user(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DbUser>, VitiError> {
    Ok(Json(state.storage.get_user(id).await?))
}

pub async fn update_user(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UserPayload>,
) -> Result<StatusCode, VitiError> {
    let hashed = hash_password(payload.password, state.bcrypt_cost).await?;
    state
        .storage
        .update_user(id, &payload.username, &hashed)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_user(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, VitiError> {
    state.storage.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn issue_token(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<AccessToken>, VitiError> {
    if let Some(grant) = form.grant_type.as_deref()
        && grant != "password"
    {
        warn!(username = %form.username, grant, "unsupported grant type");
        return Err(VitiError::InvalidCredentials);
    }

    let Some(user) = state.storage.find_user_by_username(&form.username).await? else {
        warn!(username = %form.username, "login for unknown user");
        return Err(VitiError::InvalidCredentials);
    };
    if !verify_password(form.password, user.hashed_password).await? {
        warn!(username = %form.username, "login with wrong password");
        return Err(VitiError::InvalidCredentials);
    }

    let access_token = state.tokens.issue(&user.username, user.id)?;
    info!(user_id = user.id, scope = ?form.scope, "access token issued");
    Ok(Json(AccessToken {
        access_token,
        token_type: "bearer",
    }))
}
