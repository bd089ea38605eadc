//! Changelog entry DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::tool_dto::ToolDto;
use crate::domain::{ChangelogEntry, EntryId, EntryWithTool, ToolId};

/// Request body for `POST /changelogentries`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChangelogEntryRequest {
    /// Tool the entry belongs to. Required.
    #[serde(default)]
    pub tool_id: Option<ToolId>,
    /// Version label (max 50 characters).
    #[serde(default)]
    pub version: String,
    /// Free-text description.
    #[serde(default)]
    pub beschreibung: String,
    /// Timestamp of the change. Defaults to the time of creation.
    #[serde(default)]
    pub datum: Option<DateTime<Utc>>,
}

/// Request body for `PUT /changelogentries/{id}`: the full record.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChangelogEntryRequest {
    /// Must equal the id in the path.
    pub id: EntryId,
    /// Tool the entry belongs to; may move the entry to another tool.
    pub tool_id: ToolId,
    /// Timestamp of the change.
    pub datum: DateTime<Utc>,
    /// Version label (max 50 characters).
    #[serde(default)]
    pub version: String,
    /// Free-text description.
    #[serde(default)]
    pub beschreibung: String,
}

impl From<UpdateChangelogEntryRequest> for ChangelogEntry {
    fn from(req: UpdateChangelogEntryRequest) -> Self {
        Self {
            id: req.id,
            tool_id: req.tool_id,
            datum: req.datum,
            version: req.version,
            beschreibung: req.beschreibung,
        }
    }
}

/// An entry without its tool, as nested in a tool detail response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntryDto {
    /// Server-assigned id.
    pub id: EntryId,
    /// Owning tool.
    pub tool_id: ToolId,
    /// Timestamp of the change.
    pub datum: DateTime<Utc>,
    /// Version label.
    pub version: String,
    /// Free-text description.
    pub beschreibung: String,
}

impl From<ChangelogEntry> for ChangelogEntryDto {
    fn from(entry: ChangelogEntry) -> Self {
        Self {
            id: entry.id,
            tool_id: entry.tool_id,
            datum: entry.datum,
            version: entry.version,
            beschreibung: entry.beschreibung,
        }
    }
}

/// An entry with its tool embedded, as returned by the entry endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntryResponse {
    /// Server-assigned id.
    pub id: EntryId,
    /// Owning tool.
    pub tool_id: ToolId,
    /// Timestamp of the change.
    pub datum: DateTime<Utc>,
    /// Version label.
    pub version: String,
    /// Free-text description.
    pub beschreibung: String,
    /// The owning tool.
    pub tool: ToolDto,
}

impl From<EntryWithTool> for ChangelogEntryResponse {
    fn from(item: EntryWithTool) -> Self {
        Self {
            id: item.entry.id,
            tool_id: item.entry.tool_id,
            datum: item.entry.datum,
            version: item.entry.version,
            beschreibung: item.entry.beschreibung,
            tool: ToolDto::from(item.tool),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_missing_datum() {
        let tool_id = ToolId::new();
        let body = format!(r#"{{"toolId":"{tool_id}","version":"1.0","beschreibung":"x"}}"#);
        let Ok(req) = serde_json::from_str::<CreateChangelogEntryRequest>(&body) else {
            panic!("request should parse");
        };
        assert_eq!(req.tool_id, Some(tool_id));
        assert!(req.datum.is_none());
    }

    #[test]
    fn create_request_ignores_client_supplied_id() {
        let body = r#"{"id":"00000000-0000-0000-0000-000000000001","version":"1"}"#;
        let Ok(req) = serde_json::from_str::<CreateChangelogEntryRequest>(body) else {
            panic!("request should parse");
        };
        assert!(req.tool_id.is_none());
        assert!(req.beschreibung.is_empty());
    }

    #[test]
    fn response_uses_camel_case_and_rfc3339() {
        let Some(datum) = DateTime::from_timestamp(1_704_067_200, 0) else {
            panic!("valid timestamp");
        };
        let tool = ToolDto {
            id: ToolId::new(),
            name_kurz: "git".to_string(),
            name_lang: "Git".to_string(),
        };
        let response = ChangelogEntryResponse {
            id: EntryId::new(),
            tool_id: tool.id,
            datum,
            version: "1.0".to_string(),
            beschreibung: "x".to_string(),
            tool,
        };
        let Ok(json) = serde_json::to_value(&response) else {
            panic!("serialization failed");
        };
        assert!(json.get("toolId").is_some());
        assert_eq!(json["datum"], "2024-01-01T00:00:00Z");
        assert_eq!(json["tool"]["nameKurz"], "git");
    }
}
