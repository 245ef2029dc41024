use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Serialize;

use crate::db::Dataset;
use crate::error::VitiError;
use crate::middleware::{ApiJson, ApiPath, CurrentUser};
use crate::router::AppState;

/// Body of a `201 Created` reply.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

pub async fn get_one<D: Dataset>(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<D>, VitiError> {
    Ok(Json(state.storage.get::<D>(id).await?))
}

pub async fn list<D: Dataset>(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<D>>, VitiError> {
    Ok(Json(state.storage.list::<D>().await?))
}

/// Rows matching every field present in the body.
pub async fn filter<D: Dataset>(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiJson(fields): ApiJson<D::Fields>,
) -> Result<Json<Vec<D>>, VitiError> {
    Ok(Json(state.storage.filter::<D>(&fields).await?))
}

pub async fn create<D: Dataset>(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiJson(fields): ApiJson<D::Fields>,
) -> Result<(StatusCode, Json<Created>), VitiError> {
    let id = state.storage.insert::<D>(&fields).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update<D: Dataset>(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(fields): ApiJson<D::Fields>,
) -> Result<StatusCode, VitiError> {
    state.storage.update::<D>(id, &fields).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete<D: Dataset>(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, VitiError> {
    state.storage.delete::<D>(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
