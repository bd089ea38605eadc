//! Service layer: business logic orchestration.
//!
//! [`ToolService`] and [`ChangelogService`] implement the CRUD contract on
//! top of the repository traits in [`crate::persistence`].

pub mod changelog_service;
pub mod tool_service;

pub use changelog_service::ChangelogService;
pub use tool_service::ToolService;
