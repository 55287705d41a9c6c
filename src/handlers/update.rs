use crate::error::{ApiError, ErrorResponse};
use crate::models::{NoteInput, UpdateResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use uuid::Uuid;

/// PUT /notes/{id} handler - Replace a note's title and description
#[utoipa::path(
    put,
    path = routes::NOTE_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the note")
    ),
    request_body = NoteInput,
    responses(
        (status = 200, description = "Note updated", body = UpdateResponse),
        (status = 400, description = "Invalid id, or title or description missing", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<UpdateResponse>), ApiError> {
    let id = Uuid::parse_str(&id_str).map_err(|_| ApiError::InvalidId(id_str.clone()))?;

    let Json(input) = payload
        .map_err(|_| ApiError::InvalidInput(NoteInput::REQUIRED_MESSAGE.to_string()))?;
    let fields = input.validate()?;

    match state.store.update(id, fields).await? {
        Some(updated_note) => {
            tracing::info!("Updated note with id: {}", id);
            Ok((
                StatusCode::OK,
                Json(UpdateResponse {
                    message: "Note updated successfully".to_string(),
                    updated_note,
                }),
            ))
        }
        None => {
            tracing::info!("Note not found for update with id: {}", id);
            Err(ApiError::NotFound("Note not found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{app_with, expect_json};
    use crate::models::{ListResponse, Note, NoteFields};
    use crate::store::{MemoryNoteStore, NoteStore};
    use axum::Router;
    use serde_json::json;

    async fn app_with_note() -> (Router, Note) {
        let store = MemoryNoteStore::new();
        let note = store
            .insert(NoteFields {
                title: "Grocery List".to_string(),
                description: "milk".to_string(),
            })
            .await
            .unwrap();
        (app_with(store), note)
    }

    async fn stored_notes(app: &Router) -> Vec<Note> {
        let listed: ListResponse = expect_json(app, "GET", "/notes", None, StatusCode::OK).await;
        listed.data
    }

    #[tokio::test]
    async fn test_update_endpoint_success() {
        let (app, note) = app_with_note().await;

        let response: UpdateResponse = expect_json(
            &app,
            "PUT",
            &format!("/notes/{}", note.id),
            Some(json!({"title": "Shopping", "description": "milk, bread"})),
            StatusCode::OK,
        )
        .await;

        assert_eq!(response.message, "Note updated successfully");
        assert_eq!(response.updated_note.id, note.id);
        assert_eq!(response.updated_note.title, "Shopping");
        assert_eq!(response.updated_note.description, "milk, bread");
        assert_eq!(stored_notes(&app).await, vec![response.updated_note]);
    }

    #[tokio::test]
    async fn test_update_endpoint_not_found() {
        let (app, note) = app_with_note().await;

        let error: ErrorResponse = expect_json(
            &app,
            "PUT",
            &format!("/notes/{}", Uuid::new_v4()),
            Some(json!({"title": "t", "description": "d"})),
            StatusCode::NOT_FOUND,
        )
        .await;

        assert_eq!(error.error, "Note not found");
        assert_eq!(stored_notes(&app).await, vec![note]);
    }

    #[tokio::test]
    async fn test_update_endpoint_empty_description() {
        let (app, note) = app_with_note().await;

        let error: ErrorResponse = expect_json(
            &app,
            "PUT",
            &format!("/notes/{}", note.id),
            Some(json!({"title": "changed", "description": ""})),
            StatusCode::BAD_REQUEST,
        )
        .await;

        assert_eq!(error.error, "Title and description are required");
        assert_eq!(stored_notes(&app).await, vec![note]);
    }

    #[tokio::test]
    async fn test_update_endpoint_invalid_id() {
        let (app, _note) = app_with_note().await;

        let error: ErrorResponse = expect_json(
            &app,
            "PUT",
            "/notes/not-a-uuid",
            Some(json!({"title": "t", "description": "d"})),
            StatusCode::BAD_REQUEST,
        )
        .await;

        assert_eq!(error.error, "Invalid note ID: not-a-uuid");
    }

    #[tokio::test]
    async fn test_update_endpoint_store_failure() {
        let app = app_with(MemoryNoteStore::unavailable());

        let error: ErrorResponse = expect_json(
            &app,
            "PUT",
            &format!("/notes/{}", Uuid::new_v4()),
            Some(json!({"title": "t", "description": "d"})),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .await;

        assert_eq!(error.error, "Internal server error");
    }
}
