use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::storage::NoteRepository;

use super::handlers::{
    create_note_handler, delete_note_handler, get_note_handler, health_handler,
    list_notes_handler, notes_by_tag_handler, update_note_handler,
};
use super::security::apply_security_headers;

#[derive(Clone)]
pub struct ApiState {
    pub repository: Arc<NoteRepository>,
}

pub fn build_router(repository: Arc<NoteRepository>, cors_origins: &[String]) -> Router {
    let state = ApiState { repository };

    let mut router = Router::new()
        .route("/api/v1/notes", get(list_notes_handler))
        .route("/api/v1/notes", post(create_note_handler))
        .route("/api/v1/notes/{id}", get(get_note_handler))
        .route("/api/v1/notes/{id}", put(update_note_handler))
        .route("/api/v1/notes/{id}", delete(delete_note_handler))
        .route("/api/v1/notes/tags/{tag}", get(notes_by_tag_handler))
        .route("/api/v1/health", get(health_handler))
        .with_state(state)
        .layer(middleware::from_fn(apply_security_headers));

    if let Some(cors) = cors_layer(cors_origins) {
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}
