use crate::error::{ApiError, ErrorResponse};
use crate::models::DeleteResponse;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::Path, extract::State, http::StatusCode};
use uuid::Uuid;

/// DELETE /notes/{id} handler - Remove a note and return it
#[utoipa::path(
    delete,
    path = routes::NOTE_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the note")
    ),
    responses(
        (status = 200, description = "Note deleted", body = DeleteResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let id = Uuid::parse_str(&id_str).map_err(|_| ApiError::InvalidId(id_str.clone()))?;

    match state.store.delete(id).await? {
        Some(deleted_note) => {
            tracing::info!("Deleted note with id: {}", id);
            Ok((
                StatusCode::OK,
                Json(DeleteResponse {
                    message: "Note deleted successfully".to_string(),
                    deleted_note,
                }),
            ))
        }
        None => {
            tracing::info!("Note not found for delete with id: {}", id);
            Err(ApiError::NotFound("Note not found"))
        }
    }
}
