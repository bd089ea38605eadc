//! Tool CRUD handlers: list, get, create, update, delete.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{CreateToolRequest, ToolDetailResponse, ToolDto, UpdateToolRequest};
use crate::app_state::AppState;
use crate::domain::ToolId;
use crate::error::{ErrorResponse, ServiceError};

/// `GET /tools` — List all tools.
///
/// # Errors
///
/// Returns [`ServiceError`] on storage failures.
#[utoipa::path(
    get,
    path = "/api/tools",
    tag = "Tools",
    summary = "List tools",
    description = "Returns every tool without its changelog entries.",
    responses(
        (status = 200, description = "All tools", body = Vec<ToolDto>),
    )
)]
pub async fn list_tools(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let tools = state.tool_service.list_tools().await?;
    Ok(Json(tools.into_iter().map(ToolDto::from).collect::<Vec<_>>()))
}

/// `GET /tools/{id}` — Get a tool with its changelog entries.
///
/// # Errors
///
/// Returns [`ServiceError::ToolNotFound`] if the tool does not exist.
#[utoipa::path(
    get,
    path = "/api/tools/{id}",
    tag = "Tools",
    summary = "Get tool details",
    description = "Returns one tool with its changelog entries, newest first.",
    params(
        ("id" = uuid::Uuid, Path, description = "Tool UUID"),
    ),
    responses(
        (status = 200, description = "Tool with entries", body = ToolDetailResponse),
        (status = 404, description = "Tool not found", body = ErrorResponse),
    )
)]
pub async fn get_tool(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path(id) = id?;
    let detail = state.tool_service.get_tool(ToolId::from_uuid(id)).await?;
    Ok(Json(ToolDetailResponse::from(detail)))
}

/// `POST /tools` — Create a tool.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] if a name is blank or too long.
#[utoipa::path(
    post,
    path = "/api/tools",
    tag = "Tools",
    summary = "Create a tool",
    description = "Creates a tool with a server-assigned id. The `Location` header points to the new resource.",
    request_body = CreateToolRequest,
    responses(
        (status = 201, description = "Tool created", body = ToolDto,
            headers(("Location" = String, description = "URL of the created tool"))),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
    )
)]
pub async fn create_tool(
    State(state): State<AppState>,
    payload: Result<Json<CreateToolRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(req) = payload?;
    let tool = state.tool_service.create_tool(req.into()).await?;
    let location = format!("/api/tools/{}", tool.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ToolDto::from(tool)),
    ))
}

/// `PUT /tools/{id}` — Replace a tool.
///
/// # Errors
///
/// Returns [`ServiceError`] on id mismatch, invalid fields, or a missing
/// tool.
#[utoipa::path(
    put,
    path = "/api/tools/{id}",
    tag = "Tools",
    summary = "Replace a tool",
    description = "Overwrites the full tool record. The body id must match the path id.",
    params(
        ("id" = uuid::Uuid, Path, description = "Tool UUID"),
    ),
    request_body = UpdateToolRequest,
    responses(
        (status = 204, description = "Tool updated"),
        (status = 400, description = "Id mismatch or invalid payload", body = ErrorResponse),
        (status = 404, description = "Tool not found", body = ErrorResponse),
    )
)]
pub async fn update_tool(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
    payload: Result<Json<UpdateToolRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    state
        .tool_service
        .update_tool(ToolId::from_uuid(id), req.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /tools/{id}` — Delete a tool and its entries.
///
/// # Errors
///
/// Returns [`ServiceError::ToolNotFound`] if the tool does not exist.
#[utoipa::path(
    delete,
    path = "/api/tools/{id}",
    tag = "Tools",
    summary = "Delete a tool",
    description = "Removes the tool and, atomically, all of its changelog entries.",
    params(
        ("id" = uuid::Uuid, Path, description = "Tool UUID"),
    ),
    responses(
        (status = 204, description = "Tool deleted"),
        (status = 404, description = "Tool not found", body = ErrorResponse),
    )
)]
pub async fn delete_tool(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path(id) = id?;
    state.tool_service.delete_tool(ToolId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Tool routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tools", get(list_tools).post(create_tool))
        .route(
            "/tools/{id}",
            get(get_tool).put(update_tool).delete(delete_tool),
        )
}
