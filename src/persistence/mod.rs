//! Persistence layer: repository traits and their two stores.
//!
//! [`ToolRepository`] and [`ChangelogRepository`] are the ports the service
//! layer depends on. [`PostgresStore`] implements them over `sqlx::PgPool`;
//! [`MemoryStore`] implements them in process for tests and database-less
//! runs.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use repository::{ChangelogRepository, RepositoryError, ToolRepository};
