use crate::routes;

pub const GREETING: &str = "Hello World!";

/// GET / handler - fixed greeting, touches no state
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn root_handler() -> &'static str {
    GREETING
}
