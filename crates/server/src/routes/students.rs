use axum::{extract::{Path, State}, Json};
use models::student::{ScoresPatch, StudentInput, StudentView};
use service::services::students::StudentStats;

use crate::errors::JsonApiError;
use crate::routes::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<StudentInput>,
) -> Result<Json<StudentView>, JsonApiError> {
    Ok(Json(state.students.create(input).await?))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StudentView>>, JsonApiError> {
    Ok(Json(state.students.list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StudentView>, JsonApiError> {
    Ok(Json(state.students.get(&name).await?))
}

pub async fn update_scores(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(patch): Json<ScoresPatch>,
) -> Result<Json<StudentView>, JsonApiError> {
    Ok(Json(state.students.update_scores(&name, patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StudentView>, JsonApiError> {
    Ok(Json(state.students.delete(&name).await?))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StudentStats>, JsonApiError> {
    Ok(Json(state.students.stats().await?))
}
