use axum::{extract::{Path, State}, http::StatusCode, Json};
use common::types::Message;
use models::note::{NoteContent, NoteInput, NoteView};

use crate::errors::JsonApiError;
use crate::routes::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NoteInput>,
) -> Result<(StatusCode, Json<NoteView>), JsonApiError> {
    let note = state.notes.create(input).await?;
    Ok((StatusCode::CREATED, Json(note.into())))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<String>>, JsonApiError> {
    Ok(Json(state.notes.list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<NoteView>, JsonApiError> {
    Ok(Json(state.notes.get(&title).await?.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Json(body): Json<NoteContent>,
) -> Result<Json<NoteView>, JsonApiError> {
    Ok(Json(state.notes.update(&title, body).await?.into()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    let note = state.notes.delete(&title).await?;
    Ok(Json(Message::new(format!("Note {} deleted", note.title))))
}
