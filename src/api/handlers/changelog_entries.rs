//! Changelog entry handlers: list, list by tool, get, create, update,
//! delete.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    ChangelogEntryResponse, CreateChangelogEntryRequest, UpdateChangelogEntryRequest,
};
use crate::app_state::AppState;
use crate::domain::{EntryId, NewChangelogEntry, ToolId};
use crate::error::{ErrorResponse, ServiceError};

/// `GET /changelogentries` — List all entries.
///
/// # Errors
///
/// Returns [`ServiceError`] on storage failures.
#[utoipa::path(
    get,
    path = "/api/changelogentries",
    tag = "Changelog",
    summary = "List changelog entries",
    description = "Returns every changelog entry with its tool embedded.",
    responses(
        (status = 200, description = "All entries", body = Vec<ChangelogEntryResponse>),
    )
)]
pub async fn list_entries(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let entries = state.changelog_service.list_entries().await?;
    Ok(Json(
        entries
            .into_iter()
            .map(ChangelogEntryResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// `GET /changelogentries/{id}` — Get one entry.
///
/// # Errors
///
/// Returns [`ServiceError::EntryNotFound`] if the entry does not exist.
#[utoipa::path(
    get,
    path = "/api/changelogentries/{id}",
    tag = "Changelog",
    summary = "Get a changelog entry",
    description = "Returns one changelog entry with its tool embedded.",
    params(
        ("id" = uuid::Uuid, Path, description = "Entry UUID"),
    ),
    responses(
        (status = 200, description = "The entry", body = ChangelogEntryResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
    )
)]
pub async fn get_entry(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path(id) = id?;
    let entry = state
        .changelog_service
        .get_entry(EntryId::from_uuid(id))
        .await?;
    Ok(Json(ChangelogEntryResponse::from(entry)))
}

/// `GET /changelogentries/tool/{toolId}` — Entries of one tool.
///
/// # Errors
///
/// Returns [`ServiceError`] on storage failures.
#[utoipa::path(
    get,
    path = "/api/changelogentries/tool/{toolId}",
    tag = "Changelog",
    summary = "List entries of a tool",
    description = "Returns the entries of one tool ordered by datum, newest first. An unknown tool yields an empty list.",
    params(
        ("toolId" = uuid::Uuid, Path, description = "Tool UUID"),
    ),
    responses(
        (status = 200, description = "Entries, newest first", body = Vec<ChangelogEntryResponse>),
    )
)]
pub async fn list_entries_for_tool(
    State(state): State<AppState>,
    tool_id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path(tool_id) = tool_id?;
    let entries = state
        .changelog_service
        .list_entries_for_tool(ToolId::from_uuid(tool_id))
        .await?;
    Ok(Json(
        entries
            .into_iter()
            .map(ChangelogEntryResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// `POST /changelogentries` — Create an entry.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] on missing fields and
/// [`ServiceError::Reference`] if the tool does not exist.
#[utoipa::path(
    post,
    path = "/api/changelogentries",
    tag = "Changelog",
    summary = "Create a changelog entry",
    description = "Creates an entry with a server-assigned id. `datum` defaults to the current time.",
    request_body = CreateChangelogEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = ChangelogEntryResponse,
            headers(("Location" = String, description = "URL of the created entry"))),
        (status = 400, description = "Invalid payload or unknown tool", body = ErrorResponse),
    )
)]
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateChangelogEntryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(req) = payload?;
    let tool_id = req
        .tool_id
        .ok_or_else(|| ServiceError::Validation("toolId is required".to_string()))?;
    let input = NewChangelogEntry {
        tool_id,
        version: req.version,
        beschreibung: req.beschreibung,
        datum: req.datum,
    };

    let created = state.changelog_service.create_entry(input).await?;
    let location = format!("/api/changelogentries/{}", created.entry.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ChangelogEntryResponse::from(created)),
    ))
}

/// `PUT /changelogentries/{id}` — Replace an entry.
///
/// # Errors
///
/// Returns [`ServiceError`] on id mismatch, invalid fields, an unknown
/// tool, or a missing entry.
#[utoipa::path(
    put,
    path = "/api/changelogentries/{id}",
    tag = "Changelog",
    summary = "Replace a changelog entry",
    description = "Overwrites the full entry record. The body id must match the path id and the tool must exist.",
    params(
        ("id" = uuid::Uuid, Path, description = "Entry UUID"),
    ),
    request_body = UpdateChangelogEntryRequest,
    responses(
        (status = 204, description = "Entry updated"),
        (status = 400, description = "Id mismatch, invalid payload, or unknown tool", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
    )
)]
pub async fn update_entry(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
    payload: Result<Json<UpdateChangelogEntryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    state
        .changelog_service
        .update_entry(EntryId::from_uuid(id), req.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /changelogentries/{id}` — Delete an entry.
///
/// # Errors
///
/// Returns [`ServiceError::EntryNotFound`] if the entry does not exist.
#[utoipa::path(
    delete,
    path = "/api/changelogentries/{id}",
    tag = "Changelog",
    summary = "Delete a changelog entry",
    description = "Removes a single entry. The tool is not affected.",
    params(
        ("id" = uuid::Uuid, Path, description = "Entry UUID"),
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Entry not found", body = ErrorResponse),
    )
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path(id) = id?;
    state
        .changelog_service
        .delete_entry(EntryId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Changelog entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/changelogentries",
            get(list_entries).post(create_entry),
        )
        .route(
            "/changelogentries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/changelogentries/tool/{tool_id}", get(list_entries_for_tool))
}
