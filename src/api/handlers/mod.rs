//! REST endpoint handlers organized by resource.

pub mod changelog_entries;
pub mod system;
pub mod tools;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(tools::routes())
        .merge(changelog_entries::routes())
}
