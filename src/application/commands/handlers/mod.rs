//! Command Handlers

mod credential_handlers;
mod scene_handlers;

pub use credential_handlers::CredentialHandler;
pub use scene_handlers::{GenerateScenesHandler, WorkspaceSnapshot};
