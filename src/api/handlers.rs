use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::domain::{CreateNoteRequest, Note, UpdateNoteRequest};
use crate::errors::Error;

use super::error::ApiError;
use super::routes::ApiState;

const DEFAULT_LIST_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    pub limit: Option<u32>,
}

pub async fn list_notes_handler(
    State(state): State<ApiState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let notes = state.repository.list(limit).await?;
    Ok(Json(notes))
}

pub async fn create_note_handler(
    State(state): State<ApiState>,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    payload.validate().map_err(|err| ApiError::from(Error::from(err)))?;

    let note = state.repository.create(payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note_handler(
    State(state): State<ApiState>,
    Path(note_id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let note = state
        .repository
        .get(&note_id)
        .await?
        .ok_or_else(|| ApiError::from(Error::not_found("note", note_id.as_str())))?;
    Ok(Json(note))
}

pub async fn update_note_handler(
    State(state): State<ApiState>,
    Path(note_id): Path<String>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    payload.validate().map_err(|err| ApiError::from(Error::from(err)))?;

    let note = state
        .repository
        .update(&note_id, payload)
        .await?
        .ok_or_else(|| ApiError::from(Error::not_found("note", note_id.as_str())))?;
    Ok(Json(note))
}

pub async fn delete_note_handler(
    State(state): State<ApiState>,
    Path(note_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.repository.delete(&note_id).await?;
    if !deleted {
        return Err(ApiError::from(Error::not_found("note", note_id.as_str())));
    }
    Ok(Json(json!({ "message": format!("Note '{}' deleted successfully", note_id) })))
}

pub async fn notes_by_tag_handler(
    State(state): State<ApiState>,
    Path(tag): Path<String>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.repository.find_by_tag(&tag).await?;
    Ok(Json(notes))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub notes_count: usize,
}

/// Health probe that exercises store connectivity with a one-item scan.
pub async fn health_handler(
    State(state): State<ApiState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let notes = state
        .repository
        .list(1)
        .await
        .map_err(|e| ApiError::ServiceUnavailable(e.to_string()))?;
    Ok(Json(HealthResponse { status: "healthy", notes_count: notes.len() }))
}
