use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, OriginalUri, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};
use uuid::Uuid;

use models::message::Model as Message;
use service::{
    message::{NewMessage, UpdateMessage},
    pagination::{Page, PageRequest},
};

use crate::{errors::JsonApiError, routes::ServerState};

/// Lenient id parsing: anything that is not a UUID cannot name a message,
/// so it is reported as not found rather than as a bad request.
fn parse_id(raw: &str, path: &str) -> Result<Uuid, JsonApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        debug!(%raw, "unparsable message id");
        JsonApiError::status(StatusCode::NOT_FOUND, "invalid id").with_path(path)
    })
}

#[utoipa::path(
    post, path = "/messages", tag = "messages",
    request_body = crate::openapi::NewMessageDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MessageDoc),
        (status = 400, description = "Bad Request"),
        (status = 415, description = "Unsupported Media Type")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<NewMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    let path = uri.path();
    let Json(input) = payload.map_err(|r| JsonApiError::from(r).with_path(path))?;
    let created = state
        .messages
        .register(input)
        .await
        .map_err(|e| JsonApiError::from(e).with_path(path))?;
    info!(id = %created.id, "created message");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/messages/{id}", tag = "messages",
    params(("id" = String, Path, description = "Message ID (UUID)")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Path(raw_id): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    let path = uri.path();
    let id = parse_id(&raw_id, path)?;
    let found = state
        .messages
        .find(id)
        .await
        .map_err(|e| JsonApiError::from(e).with_path(path))?;
    Ok(Json(found))
}

#[utoipa::path(
    put, path = "/messages/{id}", tag = "messages",
    params(("id" = String, Path, description = "Message ID (UUID)")),
    request_body = crate::openapi::UpdateMessageDoc,
    responses(
        (status = 202, description = "Accepted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found or id mismatch")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    let path = uri.path();
    let id = parse_id(&raw_id, path)?;
    let Json(input) = payload.map_err(|r| JsonApiError::from(r).with_path(path))?;
    let updated = state
        .messages
        .update(id, input)
        .await
        .map_err(|e| JsonApiError::from(e).with_path(path))?;
    info!(id = %updated.id, "updated message");
    Ok((StatusCode::ACCEPTED, Json(updated)))
}

#[utoipa::path(
    delete, path = "/messages/{id}", tag = "messages",
    params(("id" = String, Path, description = "Message ID (UUID)")),
    responses(
        (status = 200, description = "Removed", body = String),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, &'static str), JsonApiError> {
    let path = uri.path();
    let id = parse_id(&raw_id, path)?;
    state
        .messages
        .remove(id)
        .await
        .map_err(|e| JsonApiError::from(e).with_path(path))?;
    Ok((StatusCode::OK, "message removed"))
}

#[utoipa::path(
    get, path = "/messages", tag = "messages",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page number, default 0"),
        ("size" = Option<u64>, Query, description = "Page size, default 10, max 100")
    ),
    responses(
        (status = 200, description = "Page of messages", body = crate::openapi::MessagePageDoc),
        (status = 400, description = "Bad Request")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Page<Message>>, JsonApiError> {
    let path = uri.path();
    let Query(request) = query.map_err(|r| JsonApiError::from(r).with_path(path))?;
    let page = state
        .messages
        .list(request)
        .await
        .map_err(|e| JsonApiError::from(e).with_path(path))?;
    info!(page = page.number, size = page.size, count = page.number_of_elements, "list messages");
    Ok(Json(page))
}
