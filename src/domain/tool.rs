//! Tool aggregate: a tracked component whose changes are recorded.

use super::ChangelogEntry;
use super::ToolId;
use super::validation::{NAME_KURZ_MAX_LEN, NAME_LANG_MAX_LEN, require_text};
use crate::error::ServiceError;

/// A stored tool record.
///
/// The entries of a tool are not held here; they are looked up by
/// foreign key when needed (see [`ToolWithEntries`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Unique tool identifier (immutable after creation).
    pub id: ToolId,
    /// Short name, at most 50 characters.
    pub name_kurz: String,
    /// Long display name, at most 255 characters.
    pub name_lang: String,
}

impl Tool {
    /// Validates the required name fields.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if a name is blank or too long.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_names(&self.name_kurz, &self.name_lang)
    }
}

/// Input for creating a tool. The id is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTool {
    /// Short name.
    pub name_kurz: String,
    /// Long display name.
    pub name_lang: String,
}

impl NewTool {
    /// Validates the required name fields.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if a name is blank or too long.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_names(&self.name_kurz, &self.name_lang)
    }

    /// Turns the input into a record with a freshly generated id.
    #[must_use]
    pub fn into_tool(self) -> Tool {
        Tool {
            id: ToolId::new(),
            name_kurz: self.name_kurz,
            name_lang: self.name_lang,
        }
    }
}

/// A tool together with its changelog entries, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolWithEntries {
    /// The tool record.
    pub tool: Tool,
    /// Entries referencing the tool, ordered by `datum` descending.
    pub entries: Vec<ChangelogEntry>,
}

fn validate_names(name_kurz: &str, name_lang: &str) -> Result<(), ServiceError> {
    require_text("nameKurz", name_kurz, Some(NAME_KURZ_MAX_LEN))?;
    require_text("nameLang", name_lang, Some(NAME_LANG_MAX_LEN))
}
