//! Tool DTOs for create, update, get, and list operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::changelog_dto::ChangelogEntryDto;
use crate::domain::{NewTool, Tool, ToolId, ToolWithEntries};

/// Request body for `POST /tools`.
///
/// Missing names deserialize as empty strings so that the service reports
/// them as validation errors with the field name.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateToolRequest {
    /// Short name (max 50 characters).
    #[serde(default)]
    pub name_kurz: String,
    /// Long display name (max 255 characters).
    #[serde(default)]
    pub name_lang: String,
}

impl From<CreateToolRequest> for NewTool {
    fn from(req: CreateToolRequest) -> Self {
        Self {
            name_kurz: req.name_kurz,
            name_lang: req.name_lang,
        }
    }
}

/// Request body for `PUT /tools/{id}`: the full record.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateToolRequest {
    /// Must equal the id in the path.
    pub id: ToolId,
    /// Short name (max 50 characters).
    #[serde(default)]
    pub name_kurz: String,
    /// Long display name (max 255 characters).
    #[serde(default)]
    pub name_lang: String,
}

impl From<UpdateToolRequest> for Tool {
    fn from(req: UpdateToolRequest) -> Self {
        Self {
            id: req.id,
            name_kurz: req.name_kurz,
            name_lang: req.name_lang,
        }
    }
}

/// A tool as returned by list and create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolDto {
    /// Server-assigned id.
    pub id: ToolId,
    /// Short name.
    pub name_kurz: String,
    /// Long display name.
    pub name_lang: String,
}

impl From<Tool> for ToolDto {
    fn from(tool: Tool) -> Self {
        Self {
            id: tool.id,
            name_kurz: tool.name_kurz,
            name_lang: tool.name_lang,
        }
    }
}

/// Response body for `GET /tools/{id}`: the tool and its entries, newest
/// first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolDetailResponse {
    /// Server-assigned id.
    pub id: ToolId,
    /// Short name.
    pub name_kurz: String,
    /// Long display name.
    pub name_lang: String,
    /// Entries of this tool, ordered by `datum` descending.
    pub changelog_entries: Vec<ChangelogEntryDto>,
}

impl From<ToolWithEntries> for ToolDetailResponse {
    fn from(detail: ToolWithEntries) -> Self {
        Self {
            id: detail.tool.id,
            name_kurz: detail.tool.name_kurz,
            name_lang: detail.tool.name_lang,
            changelog_entries: detail
                .entries
                .into_iter()
                .map(ChangelogEntryDto::from)
                .collect(),
        }
    }
}
