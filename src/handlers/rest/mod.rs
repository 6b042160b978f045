
use axum::{
    Json,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, DeleteNoteRequest, NoteResponse},
    service::{NoteError, NoteService},
};

/// Header carrying the caller's opaque user id.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(OpenApi)]
#[openapi(
    paths(list_notes, create_note, delete_note),
    components(schemas(NoteResponse, CreateNoteRequest, DeleteNoteRequest)),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

/// The caller-supplied owner id. Opaque and unauthenticated: the random
/// value generated by the browser is the whole ownership boundary.
#[derive(Debug, Clone)]
pub struct UserId(pub String);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_owned()))
            .ok_or((StatusCode::BAD_REQUEST, "Missing user id"))
    }
}

#[utoipa::path(
    get,
    path = "/notes",
    params(
        ("x-user-id" = String, Header, description = "Owner id")
    ),
    responses(
        (status = 200, description = "All notes owned by the caller, newest first", body = Vec<NoteResponse>),
        (status = 400, description = "Missing user id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn list_notes(
    State(service): State<Arc<NoteService>>,
    UserId(user_id): UserId,
) -> Response {
    match service.list_notes(&user_id).await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to list note entries: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list notes").into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    params(
        ("x-user-id" = String, Header, description = "Owner id")
    ),
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Missing user id, or missing or empty content"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    UserId(user_id): UserId,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing note content").into_response();
    };

    match service.create_note(&user_id, payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(NoteError::EmptyContent) => {
            (StatusCode::BAD_REQUEST, "Missing note content").into_response()
        }
        Err(e) => {
            tracing::error!("failed to create note entry: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create note").into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/notes",
    params(
        ("x-user-id" = String, Header, description = "Owner id")
    ),
    request_body = DeleteNoteRequest,
    responses(
        (status = 204, description = "Note deleted, or no note matched the caller's id"),
        (status = 400, description = "Missing user id or note id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    UserId(user_id): UserId,
    payload: Result<Json<DeleteNoteRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing note id").into_response();
    };

    // Zero matched rows still answers 204: the API never reveals whether a
    // note exists outside the caller's ownership scope.
    match service.delete_note(&user_id, payload.id).await {
        Ok(removed) => {
            if !removed {
                tracing::debug!("delete matched no rows");
            }
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            tracing::error!("failed to delete note entry: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete note").into_response()
        }
    }
}

#[debug_handler]
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
