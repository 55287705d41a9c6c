use crate::error::{ApiError, ErrorResponse};
use crate::models::{Note, NoteInput};
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

/// POST /notes handler - Create a note
///
/// Both `title` and `description` must be present and non-empty. A body that
/// is not JSON, or whose fields are not strings, is treated the same way.
#[utoipa::path(
    post,
    path = routes::NOTES,
    request_body = NoteInput,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 400, description = "Title or description missing", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(input) = payload
        .map_err(|_| ApiError::InvalidInput(NoteInput::REQUIRED_MESSAGE.to_string()))?;
    let fields = input.validate()?;

    let note = state.store.insert(fields).await?;

    tracing::info!("Created note with id: {}", note.id);
    Ok((StatusCode::CREATED, Json(note)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{app_with, expect_json, send};
    use crate::models::ListResponse;
    use crate::store::MemoryNoteStore;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_create_endpoint_success() {
        let app = app_with(MemoryNoteStore::new());

        let note: Note = expect_json(
            &app,
            "POST",
            "/notes",
            Some(json!({"title": "Grocery List", "description": "milk, eggs"})),
            StatusCode::CREATED,
        )
        .await;

        assert_eq!(note.title, "Grocery List");
        assert_eq!(note.description, "milk, eggs");

        let listed: ListResponse = expect_json(&app, "GET", "/notes", None, StatusCode::OK).await;
        assert_eq!(listed.data, vec![note]);
    }

    #[tokio::test]
    async fn test_create_endpoint_distinct_ids() {
        let app = app_with(MemoryNoteStore::new());
        let body = json!({"title": "same", "description": "same"});

        let first: Note =
            expect_json(&app, "POST", "/notes", Some(body.clone()), StatusCode::CREATED).await;
        let second: Note =
            expect_json(&app, "POST", "/notes", Some(body), StatusCode::CREATED).await;

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_create_endpoint_missing_fields() {
        let app = app_with(MemoryNoteStore::new());

        for body in [
            json!({"description": "no title"}),
            json!({"title": "no description"}),
            json!({"title": "", "description": "empty title"}),
            json!({"title": "empty description", "description": ""}),
            json!({"title": 5, "description": "numeric title"}),
            json!({}),
        ] {
            let error: ErrorResponse =
                expect_json(&app, "POST", "/notes", Some(body), StatusCode::BAD_REQUEST).await;
            assert_eq!(error.error, "Title and description are required");
        }

        let listed: ListResponse = expect_json(&app, "GET", "/notes", None, StatusCode::OK).await;
        assert_eq!(listed.metadata.total_notes, 0);
    }

    #[tokio::test]
    async fn test_create_endpoint_invalid_json() {
        let app = app_with(MemoryNoteStore::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/notes")
                    .header("content-type", "application/json")
                    .body(Body::from("{invalid json}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_endpoint_store_failure() {
        let app = app_with(MemoryNoteStore::unavailable());

        let response = send(
            &app,
            "POST",
            "/notes",
            Some(json!({"title": "t", "description": "d"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorResponse = crate::handlers::test_support::read_json(response).await;
        assert_eq!(error.error, "Internal server error");
    }
}
