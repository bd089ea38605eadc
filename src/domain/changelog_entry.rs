//! Changelog entry: one dated, versioned description of a change to a tool.

use chrono::{DateTime, Utc};

use super::validation::{
    VERSION_MAX_LEN, now_micros, require_storable_timestamp, require_text,
};
use super::{EntryId, Tool, ToolId};
use crate::error::ServiceError;

/// A stored changelog entry.
///
/// Only the foreign key of the owning tool is kept; the tool itself is
/// joined in by the service layer when a response needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Unique entry identifier (immutable after creation).
    pub id: EntryId,
    /// The tool this entry belongs to.
    pub tool_id: ToolId,
    /// When the change happened.
    pub datum: DateTime<Utc>,
    /// Version label, at most 50 characters.
    pub version: String,
    /// Free-text description of the change.
    pub beschreibung: String,
}

impl ChangelogEntry {
    /// Validates the required fields and the timestamp precision.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] on a blank or oversized field,
    /// or a `datum` finer than microseconds.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_content(&self.version, &self.beschreibung)?;
        require_storable_timestamp("datum", &self.datum)
    }
}

/// Input for creating an entry. The id is assigned by the server and
/// `datum` defaults to the time of creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChangelogEntry {
    /// Tool the entry belongs to.
    pub tool_id: ToolId,
    /// Version label.
    pub version: String,
    /// Free-text description.
    pub beschreibung: String,
    /// Optional timestamp of the change.
    pub datum: Option<DateTime<Utc>>,
}

impl NewChangelogEntry {
    /// Validates the required fields and, if present, the timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] on a blank or oversized field,
    /// or a `datum` finer than microseconds.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_content(&self.version, &self.beschreibung)?;
        if let Some(datum) = &self.datum {
            require_storable_timestamp("datum", datum)?;
        }
        Ok(())
    }

    /// Turns the input into a record with a fresh id, stamping `datum`
    /// with the current time when it was omitted.
    #[must_use]
    pub fn into_entry(self) -> ChangelogEntry {
        ChangelogEntry {
            id: EntryId::new(),
            tool_id: self.tool_id,
            datum: self.datum.unwrap_or_else(now_micros),
            version: self.version,
            beschreibung: self.beschreibung,
        }
    }
}

/// A changelog entry with its owning tool embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWithTool {
    /// The entry record.
    pub entry: ChangelogEntry,
    /// The tool referenced by `entry.tool_id`.
    pub tool: Tool,
}

fn validate_content(version: &str, beschreibung: &str) -> Result<(), ServiceError> {
    require_text("version", version, Some(VERSION_MAX_LEN))?;
    require_text("beschreibung", beschreibung, None)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn new_entry(datum: Option<DateTime<Utc>>) -> NewChangelogEntry {
        NewChangelogEntry {
            tool_id: ToolId::new(),
            version: "1.0.0".to_string(),
            beschreibung: "Initial release".to_string(),
            datum,
        }
    }

    #[test]
    fn omitted_datum_defaults_to_now() {
        let before = now_micros();
        let entry = new_entry(None).into_entry();
        let after = Utc::now();
        assert!(entry.datum >= before);
        assert!(entry.datum <= after);
    }

    #[test]
    fn given_datum_is_kept() {
        let Some(datum) = DateTime::from_timestamp(1_704_067_200, 0) else {
            panic!("valid timestamp");
        };
        let entry = new_entry(Some(datum)).into_entry();
        assert_eq!(entry.datum, datum);
    }

    #[test]
    fn version_and_description_are_required() {
        let mut input = new_entry(None);
        input.version = String::new();
        assert!(input.validate().is_err());

        let mut input = new_entry(None);
        input.beschreibung = "  ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn stored_entry_rejects_oversized_version() {
        let mut entry = new_entry(None).into_entry();
        entry.version = "v".repeat(VERSION_MAX_LEN + 1);
        assert!(entry.validate().is_err());
    }
}
