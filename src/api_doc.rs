use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    BulkDeleteRequest, BulkDeleteResponse, DeleteResponse, ListMetadata, ListResponse, Note,
    NoteInput, UpdateResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "notes-api",
        version = "1.0.0",
        description = "CRUD service for notes backed by Google Cloud Spanner"
    ),
    paths(
        handlers::root::root_handler,
        handlers::health::health_handler,
        handlers::create::create_handler,
        handlers::list::list_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler,
        handlers::delete_many::delete_many_handler
    ),
    components(
        schemas(
            Note,
            NoteInput,
            ListResponse,
            ListMetadata,
            UpdateResponse,
            DeleteResponse,
            BulkDeleteRequest,
            BulkDeleteResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Liveness probes"),
        (name = "notes", description = "Note operations")
    )
)]
pub struct ApiDoc;
