//! # toolchangelog
//!
//! REST API for tracking tools and the dated changelog entries recorded
//! for each of them.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP/JSON)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ToolService, ChangelogService (service/)
//!     │
//!     ├── ToolRepository, ChangelogRepository (persistence/)
//!     │
//!     └── PostgreSQL  |  in-memory store
//! ```
//!
//! Deleting a tool removes its entries in the same store operation.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod server;
pub mod service;
