use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Message;
use models::contact::{Contact, ContactInput, ContactPatch};
use serde::Deserialize;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
}

/// Field validation failures on replace are 422; a path/body name mismatch stays 400.
fn unprocessable(e: ServiceError) -> JsonApiError {
    let field_error = matches!(e, ServiceError::Model(_));
    let err = JsonApiError::from(e);
    if field_error {
        err.remap(StatusCode::BAD_REQUEST, StatusCode::UNPROCESSABLE_ENTITY)
    } else {
        err
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> Result<(StatusCode, Json<Contact>), JsonApiError> {
    let contact = state.contacts.create(input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Contact>>, JsonApiError> {
    Ok(Json(state.contacts.list(q.name.as_deref()).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Contact>, JsonApiError> {
    Ok(Json(state.contacts.get(&name).await?))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<ContactInput>,
) -> Result<Json<Contact>, JsonApiError> {
    state.contacts.replace(&name, input).await.map(Json).map_err(unprocessable)
}

pub async fn patch(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(patch): Json<ContactPatch>,
) -> Result<Json<Contact>, JsonApiError> {
    state
        .contacts
        .patch(&name, patch)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from(e).remap(StatusCode::BAD_REQUEST, StatusCode::UNPROCESSABLE_ENTITY))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    let removed = state.contacts.delete(&name).await?;
    Ok(Json(Message::new(format!("Contact {} deleted", removed.name))))
}
