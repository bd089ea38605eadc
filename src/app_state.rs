//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::{ChangelogRepository, MemoryStore, ToolRepository};
use crate::service::{ChangelogService, ToolService};

/// Which store backs the running service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local [`MemoryStore`].
    Memory,
    /// PostgreSQL via `sqlx`.
    Postgres,
}

impl StorageBackend {
    /// Short name used in logs and the health response.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Tool operations.
    pub tool_service: Arc<ToolService>,
    /// Changelog entry operations.
    pub changelog_service: Arc<ChangelogService>,
    /// Store in use.
    pub storage: StorageBackend,
}

impl AppState {
    /// Wires both services to the given repositories.
    #[must_use]
    pub fn new(
        tools: Arc<dyn ToolRepository>,
        entries: Arc<dyn ChangelogRepository>,
        storage: StorageBackend,
    ) -> Self {
        Self {
            tool_service: Arc::new(ToolService::new(Arc::clone(&tools), Arc::clone(&entries))),
            changelog_service: Arc::new(ChangelogService::new(tools, entries)),
            storage,
        }
    }

    /// State backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        let tools: Arc<dyn ToolRepository> = Arc::clone(&store) as Arc<dyn ToolRepository>;
        let entries: Arc<dyn ChangelogRepository> = store;
        Self::new(tools, entries, StorageBackend::Memory)
    }
}
