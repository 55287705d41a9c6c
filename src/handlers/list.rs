use crate::error::{ApiError, ErrorResponse};
use crate::models::{ListQuery, ListResponse};
use crate::pagination::PageRequest;
use crate::routes;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};

/// GET /notes handler - List notes
///
/// Query parameters:
/// - page: 1-based page number (optional, default: 1, values below 1 become 1)
/// - limit: page size (optional, default: 10, values below 1 become 1)
/// - title: case-insensitive substring filter on the title (optional)
///
/// `metadata.currentPage` is clamped to the last page, so a page past the end
/// reports the last page while returning no data.
#[utoipa::path(
    get,
    path = routes::NOTES,
    params(
        ("page" = Option<i64>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<i64>, Query, description = "Maximum number of notes per page"),
        ("title" = Option<String>, Query, description = "Only notes whose title contains this text, ignoring case")
    ),
    responses(
        (status = 200, description = "A page of notes", body = ListResponse),
        (status = 400, description = "page or limit is not an integer", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ListResponse>), ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::InvalidInput(format!("Invalid query parameter: {}", rejection.body_text()))
    })?;

    let page = PageRequest::from_query(&query);
    let title = query.title.as_deref().filter(|title| !title.is_empty());

    let result = state.store.list(title, page.limit, page.offset()).await?;

    let response = ListResponse {
        metadata: page.metadata(result.total_count),
        data: result.notes,
    };

    tracing::info!(
        "Listed {} notes (total: {}, title: {:?}, page: {}, limit: {})",
        response.data.len(),
        response.metadata.total_notes,
        title,
        page.page,
        page.limit
    );

    Ok((StatusCode::OK, Json(response)))
}
