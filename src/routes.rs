use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

// Route path constants - single source of truth for all API paths

pub const ROOT: &str = "/";
pub const HEALTH: &str = "/health";
pub const NOTES: &str = "/notes";
pub const NOTE_ITEM: &str = "/notes/{id}";
pub const NOTES_DELETE_MANY: &str = "/notes/delete-many";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the full application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(ROOT, get(handlers::root_handler))
        .route(HEALTH, get(handlers::health_handler))
        .route(
            NOTES,
            post(handlers::create_handler).get(handlers::list_handler),
        )
        .route(
            NOTES_DELETE_MANY,
            post(handlers::delete_many_handler)
                .put(handlers::delete_many_as_item_handler)
                .delete(handlers::delete_many_as_item_handler),
        )
        .route(
            NOTE_ITEM,
            put(handlers::update_handler).delete(handlers::delete_handler),
        )
        .with_state(state)
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
