//! In-memory store backing both repository traits.
//!
//! [`MemoryStore`] keeps tools and entries in two vectors behind a single
//! [`tokio::sync::RwLock`], which makes a cascading tool delete atomic with
//! respect to every other operation. It enforces the same foreign-key rule
//! the relational schema does.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repository::{ChangelogRepository, RepositoryError, ToolRepository};
use crate::domain::{ChangelogEntry, EntryId, Tool, ToolId};

#[derive(Debug, Default)]
struct Tables {
    tools: Vec<Tool>,
    entries: Vec<ChangelogEntry>,
}

impl Tables {
    fn has_tool(&self, id: ToolId) -> bool {
        self.tools.iter().any(|t| t.id == id)
    }
}

/// Process-local store used for tests and for running without a database.
///
/// # Concurrency
///
/// - Reads run concurrently.
/// - Writes are serialized, and a write never observes a half-applied
///   cascade.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tools.
    pub async fn tool_count(&self) -> usize {
        self.tables.read().await.tools.len()
    }

    /// Returns the number of stored entries.
    pub async fn entry_count(&self) -> usize {
        self.tables.read().await.entries.len()
    }
}

#[async_trait]
impl ToolRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Tool>, RepositoryError> {
        Ok(self.tables.read().await.tools.clone())
    }

    async fn find(&self, id: ToolId) -> Result<Option<Tool>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.tools.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, tool: &Tool) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.has_tool(tool.id) {
            return Err(RepositoryError::Conflict(format!(
                "tool {} already exists",
                tool.id
            )));
        }
        tables.tools.push(tool.clone());
        Ok(())
    }

    async fn replace(&self, tool: &Tool) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        match tables.tools.iter_mut().find(|t| t.id == tool.id) {
            Some(slot) => {
                *slot = tool.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: ToolId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.tools.len();
        tables.tools.retain(|t| t.id != id);
        if tables.tools.len() == before {
            return Ok(false);
        }
        tables.entries.retain(|e| e.tool_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ChangelogRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<ChangelogEntry>, RepositoryError> {
        Ok(self.tables.read().await.entries.clone())
    }

    async fn find(&self, id: EntryId) -> Result<Option<ChangelogEntry>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.entries.iter().find(|e| e.id == id).cloned())
    }

    async fn list_by_tool(&self, tool_id: ToolId) -> Result<Vec<ChangelogEntry>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut entries: Vec<ChangelogEntry> = tables
            .entries
            .iter()
            .filter(|e| e.tool_id == tool_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.datum.cmp(&a.datum));
        Ok(entries)
    }

    async fn insert(&self, entry: &ChangelogEntry) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.has_tool(entry.tool_id) {
            return Err(RepositoryError::ForeignKey(format!(
                "tool {} does not exist",
                entry.tool_id
            )));
        }
        if tables.entries.iter().any(|e| e.id == entry.id) {
            return Err(RepositoryError::Conflict(format!(
                "changelog entry {} already exists",
                entry.id
            )));
        }
        tables.entries.push(entry.clone());
        Ok(())
    }

    async fn replace(&self, entry: &ChangelogEntry) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.has_tool(entry.tool_id) {
            return Err(RepositoryError::ForeignKey(format!(
                "tool {} does not exist",
                entry.tool_id
            )));
        }
        match tables.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => {
                *slot = entry.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: EntryId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.entries.len();
        tables.entries.retain(|e| e.id != id);
        Ok(tables.entries.len() != before)
    }
}
