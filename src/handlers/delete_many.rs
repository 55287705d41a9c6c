use crate::error::{ApiError, ErrorResponse};
use crate::models::{BulkDeleteRequest, BulkDeleteResponse};
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

/// POST /notes/delete-many handler - Remove every note whose id is listed
///
/// Ids that match nothing are ignored; the request only fails with 404 when
/// none of them matched.
#[utoipa::path(
    post,
    path = routes::NOTES_DELETE_MANY,
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "Notes deleted", body = BulkDeleteResponse),
        (status = 400, description = "ids missing, empty or malformed", body = ErrorResponse),
        (status = 404, description = "None of the ids matched a note", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn delete_many_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BulkDeleteResponse>), ApiError> {
    let Json(request) = payload
        .map_err(|_| ApiError::InvalidInput(BulkDeleteRequest::INVALID_MESSAGE.to_string()))?;
    let ids = request.validate()?;

    let deleted_count = state.store.delete_many(&ids).await?;
    if deleted_count == 0 {
        tracing::info!("None of {} ids matched a note", ids.len());
        return Err(ApiError::NotFound("No notes found to delete"));
    }

    tracing::info!("Deleted {} of {} requested notes", deleted_count, ids.len());
    Ok((
        StatusCode::OK,
        Json(BulkDeleteResponse {
            message: "Notes deleted successfully".to_string(),
            deleted_count,
        }),
    ))
}

const DELETE_MANY_SEGMENT: &str = "delete-many";

/// PUT and DELETE on /notes/delete-many
///
/// The static route shadows `/notes/{id}` for these methods, so they answer the
/// way an update or delete with the id `delete-many` would.
pub async fn delete_many_as_item_handler() -> ApiError {
    ApiError::InvalidId(DELETE_MANY_SEGMENT.to_string())
}
