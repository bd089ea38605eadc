//! OpenAPI document assembled from the handler annotations.

use axum::Json;
use axum::response::IntoResponse;
use utoipa::OpenApi;

use crate::api::dto::{
    ChangelogEntryDto, ChangelogEntryResponse, CreateChangelogEntryRequest, CreateToolRequest,
    ToolDetailResponse, ToolDto, UpdateChangelogEntryRequest, UpdateToolRequest,
};
use crate::api::handlers::{changelog_entries, system, tools};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of the service.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Tool Changelog API",
        description = "Manage tools and the dated changelog entries recorded for them."
    ),
    paths(
        tools::list_tools,
        tools::get_tool,
        tools::create_tool,
        tools::update_tool,
        tools::delete_tool,
        changelog_entries::list_entries,
        changelog_entries::get_entry,
        changelog_entries::list_entries_for_tool,
        changelog_entries::create_entry,
        changelog_entries::update_entry,
        changelog_entries::delete_entry,
        system::health_handler,
    ),
    components(schemas(
        ToolDto,
        ToolDetailResponse,
        CreateToolRequest,
        UpdateToolRequest,
        ChangelogEntryDto,
        ChangelogEntryResponse,
        CreateChangelogEntryRequest,
        UpdateChangelogEntryRequest,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    )),
    tags(
        (name = "Tools", description = "Tracked tools"),
        (name = "Changelog", description = "Changelog entries of tools"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// `GET /api-docs/openapi.json` — The OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
