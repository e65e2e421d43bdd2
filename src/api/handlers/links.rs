//! Handlers for link management endpoints (create, list, read, delete).

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, ListLinksQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "code": "abc123",     // optional, generated when absent
///   "email": "a@b.com"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the new link:
///
/// ```json
/// {
///   "code": "abc123",
///   "url": "https://example.com",
///   "email": "a@b.com",
///   "totalClicks": 0,
///   "lastClicked": null,
///   "createdAt": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request on an unreadable body or a malformed URL, email or code
/// - 409 Conflict if the requested code is taken
/// - 503 Service Unavailable if no free code could be generated
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .allocation_service
        .allocate(payload.code, payload.url, payload.email)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists links owned by an email address, newest first.
///
/// # Endpoint
///
/// `GET /api/links?email=a@b.com`
pub async fn list_links_handler(
    State(state): State<AppState>,
    query: Result<Query<ListLinksQuery>, QueryRejection>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let Query(query) = query?;
    let links = state.link_service.list_links(&query.email).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a single link with its counters. Does not count as a visit.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Deletes a short link permanently.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if nothing was removed.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let deleted = state.link_service.delete_link(&code).await?;

    if !deleted {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}
