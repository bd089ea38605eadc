//! Domain layer: records, identifiers, and field validation.
//!
//! A [`Tool`] owns any number of [`ChangelogEntry`] records. Ownership is
//! one-directional: an entry stores only the [`ToolId`] of its tool, and the
//! reverse direction is a query against the store.

pub mod changelog_entry;
pub mod ids;
pub mod tool;
pub mod validation;

pub use changelog_entry::{ChangelogEntry, EntryWithTool, NewChangelogEntry};
pub use ids::{EntryId, ToolId};
pub use tool::{NewTool, Tool, ToolWithEntries};
