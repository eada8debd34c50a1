use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;

use common::types::Health;
use service::message::{MessageRepository, MessageService};

use crate::openapi::ApiDoc;

pub mod messages;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub messages: Arc<MessageService<dyn MessageRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { messages: Arc::new(MessageService::new(repo)) }
    }

    pub fn from_service(messages: MessageService<dyn MessageRepository>) -> Self {
        Self { messages: Arc::new(messages) }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses(
        (status = 200, description = "Store reachable", body = crate::openapi::HealthResponse),
        (status = 503, description = "Store unreachable", body = crate::openapi::HealthResponse)
    )
)]
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<Health>) {
    match state.messages.count().await {
        Ok(_) => (StatusCode::OK, Json(Health::ok())),
        Err(e) => {
            warn!(err = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Health::unavailable()))
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/messages", get(messages::list).post(messages::create))
        .route(
            "/messages/:id",
            get(messages::get).put(messages::update).delete(messages::delete),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
