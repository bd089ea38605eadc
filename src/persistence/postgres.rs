//! PostgreSQL implementation of the repository traits.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{EntryRow, ToolRow};
use super::repository::{ChangelogRepository, RepositoryError, ToolRepository};
use crate::config::ServiceConfig;
use crate::domain::{ChangelogEntry, EntryId, Tool, ToolId};

const TOOL_COLUMNS: &str = "id, name_kurz, name_lang";
const ENTRY_COLUMNS: &str = "id, tool_id, datum, version, beschreibung";

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Referential integrity and the cascading delete are enforced by the
/// schema in `migrations/`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized by the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the database is unreachable.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(map_db_error)?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }
}

/// Maps Postgres constraint violations onto repository error kinds.
fn map_db_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        match db.code().as_deref() {
            // foreign_key_violation
            Some("23503") => return RepositoryError::ForeignKey(db.message().to_string()),
            // unique_violation, serialization_failure
            Some("23505" | "40001") => return RepositoryError::Conflict(db.message().to_string()),
            _ => {}
        }
    }
    RepositoryError::Storage(err.to_string())
}

#[async_trait]
impl ToolRepository for PostgresStore {
    async fn list(&self) -> Result<Vec<Tool>, RepositoryError> {
        let query = format!("SELECT {TOOL_COLUMNS} FROM tools");
        let rows = sqlx::query_as::<_, ToolRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Tool::from).collect())
    }

    async fn find(&self, id: ToolId) -> Result<Option<Tool>, RepositoryError> {
        let query = format!("SELECT {TOOL_COLUMNS} FROM tools WHERE id = $1");
        let row = sqlx::query_as::<_, ToolRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(Tool::from))
    }

    async fn insert(&self, tool: &Tool) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO tools (id, name_kurz, name_lang) VALUES ($1, $2, $3)")
            .bind(tool.id.as_uuid())
            .bind(&tool.name_kurz)
            .bind(&tool.name_lang)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn replace(&self, tool: &Tool) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE tools SET name_kurz = $2, name_lang = $3 WHERE id = $1")
            .bind(tool.id.as_uuid())
            .bind(&tool.name_kurz)
            .bind(&tool.name_lang)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: ToolId) -> Result<bool, RepositoryError> {
        // Entries go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ChangelogRepository for PostgresStore {
    async fn list(&self) -> Result<Vec<ChangelogEntry>, RepositoryError> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM changelog_entries");
        let rows = sqlx::query_as::<_, EntryRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(ChangelogEntry::from).collect())
    }

    async fn find(&self, id: EntryId) -> Result<Option<ChangelogEntry>, RepositoryError> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM changelog_entries WHERE id = $1");
        let row = sqlx::query_as::<_, EntryRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(ChangelogEntry::from))
    }

    async fn list_by_tool(&self, tool_id: ToolId) -> Result<Vec<ChangelogEntry>, RepositoryError> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM changelog_entries \
             WHERE tool_id = $1 ORDER BY datum DESC"
        );
        let rows = sqlx::query_as::<_, EntryRow>(&query)
            .bind(tool_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(ChangelogEntry::from).collect())
    }

    async fn insert(&self, entry: &ChangelogEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO changelog_entries (id, tool_id, datum, version, beschreibung) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(entry.id.as_uuid())
        .bind(entry.tool_id.as_uuid())
        .bind(entry.datum)
        .bind(&entry.version)
        .bind(&entry.beschreibung)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn replace(&self, entry: &ChangelogEntry) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE changelog_entries \
             SET tool_id = $2, datum = $3, version = $4, beschreibung = $5 \
             WHERE id = $1",
        )
        .bind(entry.id.as_uuid())
        .bind(entry.tool_id.as_uuid())
        .bind(entry.datum)
        .bind(&entry.version)
        .bind(&entry.beschreibung)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: EntryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM changelog_entries WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }
}
