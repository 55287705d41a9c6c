use crate::error::{HealthResponse, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// GET /health handler - Health check endpoint
///
/// Asks the store for a trivial round trip to verify connectivity.
/// Returns 200 OK if the store is reachable, 503 Service Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.store.health_check().await {
        Ok(()) => {
            tracing::debug!("Health check passed");
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Health check failed: {:#}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: format!("Cannot connect to database: {}", e),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{app_with, expect_json};
    use crate::store::MemoryNoteStore;

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let app = app_with(MemoryNoteStore::new());

        let response: HealthResponse =
            expect_json(&app, "GET", "/health", None, StatusCode::OK).await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        let app = app_with(MemoryNoteStore::unavailable());

        let response: UnhealthyResponse =
            expect_json(&app, "GET", "/health", None, StatusCode::SERVICE_UNAVAILABLE).await;
        assert_eq!(response.status, "unhealthy");
        assert!(response.error.starts_with("Cannot connect to database"));
    }
}
