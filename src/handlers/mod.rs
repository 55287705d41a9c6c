pub mod create;
pub mod delete;
pub mod delete_many;
pub mod health;
pub mod list;
pub mod root;
pub mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use delete_many::{delete_many_as_item_handler, delete_many_handler};
pub use health::health_handler;
pub use list::list_handler;
pub use root::root_handler;
pub use update::update_handler;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::routes::create_router;
    use crate::state::AppState;
    use crate::store::{MemoryNoteStore, NoteStore};
    use axum::{
        Router,
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub fn app_with(store: MemoryNoteStore) -> Router {
        let store: Arc<dyn NoteStore> = Arc::new(store);
        create_router(AppState { store })
    }

    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// Send a request and decode the JSON body, asserting the status first.
    pub async fn expect_json<T: DeserializeOwned>(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
        status: StatusCode,
    ) -> T {
        let response = send(app, method, uri, body).await;
        assert_eq!(response.status(), status, "{} {}", method, uri);
        read_json(response).await
    }
}
