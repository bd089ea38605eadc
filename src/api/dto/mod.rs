//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire. Create requests carry no id;
//! update requests carry the full record including its id.

pub mod changelog_dto;
pub mod tool_dto;

pub use changelog_dto::*;
pub use tool_dto::*;
