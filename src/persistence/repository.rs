//! Abstract repository traits (ports) for tool and entry storage.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ChangelogEntry, EntryId, Tool, ToolId};

/// Errors returned by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store rejected a write because a referenced tool is missing.
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
    /// The store detected a concurrent modification or duplicate key.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A database or I/O error occurred.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistence port for tools.
///
/// `replace` and `remove` report whether a row matched, so callers can
/// tell a vanished record from a successful write.
#[async_trait]
pub trait ToolRepository: Send + Sync + std::fmt::Debug {
    /// Returns every tool in storage order.
    async fn list(&self) -> Result<Vec<Tool>, RepositoryError>;

    /// Finds a tool by id.
    async fn find(&self, id: ToolId) -> Result<Option<Tool>, RepositoryError>;

    /// Inserts a new tool.
    async fn insert(&self, tool: &Tool) -> Result<(), RepositoryError>;

    /// Overwrites the stored tool with the same id. Returns `false` if no
    /// such row exists.
    async fn replace(&self, tool: &Tool) -> Result<bool, RepositoryError>;

    /// Deletes a tool and all of its entries in one atomic step. Returns
    /// `false` if no such row exists.
    async fn remove(&self, id: ToolId) -> Result<bool, RepositoryError>;
}

/// Persistence port for changelog entries.
#[async_trait]
pub trait ChangelogRepository: Send + Sync + std::fmt::Debug {
    /// Returns every entry in storage order.
    async fn list(&self) -> Result<Vec<ChangelogEntry>, RepositoryError>;

    /// Finds an entry by id.
    async fn find(&self, id: EntryId) -> Result<Option<ChangelogEntry>, RepositoryError>;

    /// Returns the entries of one tool, newest `datum` first.
    async fn list_by_tool(&self, tool_id: ToolId) -> Result<Vec<ChangelogEntry>, RepositoryError>;

    /// Inserts a new entry. Fails with [`RepositoryError::ForeignKey`] if
    /// the tool does not exist.
    async fn insert(&self, entry: &ChangelogEntry) -> Result<(), RepositoryError>;

    /// Overwrites the stored entry with the same id. Returns `false` if no
    /// such row exists.
    async fn replace(&self, entry: &ChangelogEntry) -> Result<bool, RepositoryError>;

    /// Deletes an entry. Returns `false` if no such row exists.
    async fn remove(&self, id: EntryId) -> Result<bool, RepositoryError>;
}
