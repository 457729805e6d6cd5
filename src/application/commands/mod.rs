//! Commands - 命令定义
//!
//! 命令及其处理器

mod credential_commands;
mod scene_commands;

pub mod handlers;

pub use credential_commands::UpdateCredential;
pub use scene_commands::{GenerateScenes, SubmitOutcome};
