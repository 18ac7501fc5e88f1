use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use models::application::{Application, ApplicationInput, Status, StatusUpdate};
use serde::Deserialize;
use service::services::applications::ApplicationStats;

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub status: Option<String>,
}

/// 创建投递记录；重复记录按 400 返回
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ApplicationInput>,
) -> Result<Json<Application>, JsonApiError> {
    state
        .applications
        .create(input)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from(e).remap(StatusCode::CONFLICT, StatusCode::BAD_REQUEST))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Application>>, JsonApiError> {
    Ok(Json(state.applications.list().await?))
}

pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Application>>, JsonApiError> {
    let status = match q.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<Status>().map_err(service::errors::ServiceError::from)?),
    };
    Ok(Json(state.applications.search(status).await?))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<ApplicationStats>, JsonApiError> {
    Ok(Json(state.applications.stats().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Application>, JsonApiError> {
    Ok(Json(state.applications.get(&id).await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<Application>, JsonApiError> {
    Ok(Json(state.applications.update_status(&id, body.status).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Application>, JsonApiError> {
    Ok(Json(state.applications.delete(&id).await?))
}
