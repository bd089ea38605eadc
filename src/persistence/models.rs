//! Database row types for the `tools` and `changelog_entries` tables.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ChangelogEntry, EntryId, Tool, ToolId};

/// A row of the `tools` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ToolRow {
    /// Primary key.
    pub id: Uuid,
    /// `varchar(50)`.
    pub name_kurz: String,
    /// `varchar(255)`.
    pub name_lang: String,
}

/// A row of the `changelog_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EntryRow {
    /// Primary key.
    pub id: Uuid,
    /// References `tools.id`, cascading on delete.
    pub tool_id: Uuid,
    /// `timestamptz`.
    pub datum: DateTime<Utc>,
    /// `varchar(50)`.
    pub version: String,
    /// `text`.
    pub beschreibung: String,
}

impl From<ToolRow> for Tool {
    fn from(row: ToolRow) -> Self {
        Self {
            id: ToolId::from_uuid(row.id),
            name_kurz: row.name_kurz,
            name_lang: row.name_lang,
        }
    }
}

impl From<EntryRow> for ChangelogEntry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: EntryId::from_uuid(row.id),
            tool_id: ToolId::from_uuid(row.tool_id),
            datum: row.datum,
            version: row.version,
            beschreibung: row.beschreibung,
        }
    }
}
