//! Tool service: CRUD over tools, including the cascading delete.

use std::sync::Arc;

use crate::domain::{NewTool, Tool, ToolId, ToolWithEntries};
use crate::error::ServiceError;
use crate::persistence::{ChangelogRepository, RepositoryError, ToolRepository};

/// Orchestration layer for tool operations.
///
/// Stateless: every call goes straight to the repositories. Mutations
/// validate first and only then touch the store.
#[derive(Debug, Clone)]
pub struct ToolService {
    tools: Arc<dyn ToolRepository>,
    entries: Arc<dyn ChangelogRepository>,
}

impl ToolService {
    /// Creates a new `ToolService`.
    #[must_use]
    pub fn new(tools: Arc<dyn ToolRepository>, entries: Arc<dyn ChangelogRepository>) -> Self {
        Self { tools, entries }
    }

    /// Returns all tools in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Persistence`] on store failure.
    pub async fn list_tools(&self) -> Result<Vec<Tool>, ServiceError> {
        Ok(self.tools.list().await?)
    }

    /// Returns a tool together with its entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ToolNotFound`] if the tool does not exist.
    pub async fn get_tool(&self, id: ToolId) -> Result<ToolWithEntries, ServiceError> {
        let tool = self
            .tools
            .find(id)
            .await?
            .ok_or(ServiceError::ToolNotFound(id))?;
        let entries = self.entries.list_by_tool(id).await?;
        Ok(ToolWithEntries { tool, entries })
    }

    /// Creates a tool with a server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if a name is blank or too long.
    pub async fn create_tool(&self, input: NewTool) -> Result<Tool, ServiceError> {
        input.validate()?;
        let tool = input.into_tool();
        self.tools.insert(&tool).await?;
        tracing::info!(tool_id = %tool.id, name_kurz = %tool.name_kurz, "tool created");
        Ok(tool)
    }

    /// Replaces the tool stored under `path_id` with `tool`.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Mismatch`] if `path_id` differs from `tool.id`.
    /// - [`ServiceError::Validation`] if a name is blank or too long.
    /// - [`ServiceError::ToolNotFound`] if the tool does not exist, including
    ///   when it disappears between the existence check and the write.
    /// - [`ServiceError::ConflictFatal`] if the write conflicts and the tool
    ///   still exists.
    pub async fn update_tool(&self, path_id: ToolId, tool: Tool) -> Result<(), ServiceError> {
        if path_id != tool.id {
            return Err(ServiceError::Mismatch {
                path: path_id.into(),
                body: tool.id.into(),
            });
        }
        tool.validate()?;

        if self.tools.find(tool.id).await?.is_none() {
            return Err(ServiceError::ToolNotFound(tool.id));
        }

        match self.tools.replace(&tool).await {
            Ok(true) => {
                tracing::info!(tool_id = %tool.id, "tool updated");
                Ok(())
            }
            Ok(false) => self.resolve_conflict(tool.id, "no row matched").await,
            Err(RepositoryError::Conflict(reason)) => self.resolve_conflict(tool.id, &reason).await,
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a tool and every entry that references it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ToolNotFound`] if the tool does not exist.
    pub async fn delete_tool(&self, id: ToolId) -> Result<(), ServiceError> {
        if !self.tools.remove(id).await? {
            return Err(ServiceError::ToolNotFound(id));
        }
        tracing::info!(tool_id = %id, "tool deleted with its changelog entries");
        Ok(())
    }

    /// Decides the outcome of a write that did not go through: a vanished
    /// tool is reported as not found, anything else is fatal.
    async fn resolve_conflict(&self, id: ToolId, reason: &str) -> Result<(), ServiceError> {
        if self.tools.find(id).await?.is_none() {
            tracing::warn!(tool_id = %id, "tool vanished during update");
            return Err(ServiceError::ToolNotFound(id));
        }
        Err(ServiceError::ConflictFatal(format!(
            "update of tool {id} failed: {reason}"
        )))
    }
}
