//! Changelog service: CRUD over entries with foreign-key checks.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{
    ChangelogEntry, EntryId, EntryWithTool, NewChangelogEntry, Tool, ToolId,
};
use crate::error::ServiceError;
use crate::persistence::{ChangelogRepository, RepositoryError, ToolRepository};

/// Orchestration layer for changelog entry operations.
///
/// Every mutation runs its checks in the same order: id mismatch,
/// field validation, tool reference, entry existence, then the write.
#[derive(Debug, Clone)]
pub struct ChangelogService {
    tools: Arc<dyn ToolRepository>,
    entries: Arc<dyn ChangelogRepository>,
}

impl ChangelogService {
    /// Creates a new `ChangelogService`.
    #[must_use]
    pub fn new(tools: Arc<dyn ToolRepository>, entries: Arc<dyn ChangelogRepository>) -> Self {
        Self { tools, entries }
    }

    /// Returns every entry with its tool embedded.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Persistence`] on store failure.
    pub async fn list_entries(&self) -> Result<Vec<EntryWithTool>, ServiceError> {
        let entries = self.entries.list().await?;
        let tools: HashMap<ToolId, Tool> = self
            .tools
            .list()
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        // An entry whose tool is gone was removed by a concurrent cascade.
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let tool = tools.get(&entry.tool_id)?.clone();
                Some(EntryWithTool { entry, tool })
            })
            .collect())
    }

    /// Returns one entry with its tool embedded.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::EntryNotFound`] if the entry does not exist.
    pub async fn get_entry(&self, id: EntryId) -> Result<EntryWithTool, ServiceError> {
        let entry = self
            .entries
            .find(id)
            .await?
            .ok_or(ServiceError::EntryNotFound(id))?;
        let tool = self
            .tools
            .find(entry.tool_id)
            .await?
            .ok_or(ServiceError::EntryNotFound(id))?;
        Ok(EntryWithTool { entry, tool })
    }

    /// Returns the entries of one tool, newest `datum` first. An unknown
    /// tool has no entries.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Persistence`] on store failure.
    pub async fn list_entries_for_tool(
        &self,
        tool_id: ToolId,
    ) -> Result<Vec<EntryWithTool>, ServiceError> {
        let Some(tool) = self.tools.find(tool_id).await? else {
            return Ok(Vec::new());
        };
        let entries = self.entries.list_by_tool(tool_id).await?;
        Ok(entries
            .into_iter()
            .map(|entry| EntryWithTool {
                entry,
                tool: tool.clone(),
            })
            .collect())
    }

    /// Creates an entry with a server-assigned id. `datum` defaults to the
    /// current time.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`] if `version` or `beschreibung` is blank
    ///   or too long.
    /// - [`ServiceError::Reference`] if the tool does not exist.
    pub async fn create_entry(
        &self,
        input: NewChangelogEntry,
    ) -> Result<EntryWithTool, ServiceError> {
        input.validate()?;
        let tool = self.require_tool(input.tool_id).await?;

        let entry = input.into_entry();
        self.entries
            .insert(&entry)
            .await
            .map_err(|e| reference_or(e, entry.tool_id))?;

        tracing::info!(
            entry_id = %entry.id,
            tool_id = %entry.tool_id,
            version = %entry.version,
            "changelog entry created"
        );
        Ok(EntryWithTool { entry, tool })
    }

    /// Replaces the entry stored under `path_id` with `entry`.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Mismatch`] if `path_id` differs from `entry.id`.
    /// - [`ServiceError::Validation`] on a blank or oversized field.
    /// - [`ServiceError::Reference`] if `entry.tool_id` does not exist.
    /// - [`ServiceError::EntryNotFound`] if the entry does not exist,
    ///   including when it disappears before the write.
    /// - [`ServiceError::ConflictFatal`] if the write conflicts and the
    ///   entry still exists.
    pub async fn update_entry(
        &self,
        path_id: EntryId,
        entry: ChangelogEntry,
    ) -> Result<(), ServiceError> {
        if path_id != entry.id {
            return Err(ServiceError::Mismatch {
                path: path_id.into(),
                body: entry.id.into(),
            });
        }
        entry.validate()?;
        self.require_tool(entry.tool_id).await?;

        if self.entries.find(entry.id).await?.is_none() {
            return Err(ServiceError::EntryNotFound(entry.id));
        }

        match self.entries.replace(&entry).await {
            Ok(true) => {
                tracing::info!(entry_id = %entry.id, tool_id = %entry.tool_id, "changelog entry updated");
                Ok(())
            }
            Ok(false) => self.resolve_conflict(entry.id, "no row matched").await,
            Err(RepositoryError::Conflict(reason)) => {
                self.resolve_conflict(entry.id, &reason).await
            }
            Err(e) => Err(reference_or(e, entry.tool_id)),
        }
    }

    /// Deletes one entry.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::EntryNotFound`] if the entry does not exist.
    pub async fn delete_entry(&self, id: EntryId) -> Result<(), ServiceError> {
        if !self.entries.remove(id).await? {
            return Err(ServiceError::EntryNotFound(id));
        }
        tracing::info!(entry_id = %id, "changelog entry deleted");
        Ok(())
    }

    async fn require_tool(&self, tool_id: ToolId) -> Result<Tool, ServiceError> {
        match self.tools.find(tool_id).await? {
            Some(tool) => Ok(tool),
            None => {
                tracing::warn!(%tool_id, "changelog entry references unknown tool");
                Err(ServiceError::Reference(tool_id))
            }
        }
    }

    async fn resolve_conflict(&self, id: EntryId, reason: &str) -> Result<(), ServiceError> {
        if self.entries.find(id).await?.is_none() {
            tracing::warn!(entry_id = %id, "changelog entry vanished during update");
            return Err(ServiceError::EntryNotFound(id));
        }
        Err(ServiceError::ConflictFatal(format!(
            "update of changelog entry {id} failed: {reason}"
        )))
    }
}

/// A foreign-key violation means the tool was deleted after the reference
/// check passed.
fn reference_or(err: RepositoryError, tool_id: ToolId) -> ServiceError {
    match err {
        RepositoryError::ForeignKey(_) => ServiceError::Reference(tool_id),
        other => other.into(),
    }
}
