//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现和命令行前端

pub mod adapters;
pub mod cli;
pub mod memory;

pub use adapters::{FakeGenerationClient, FileCredentialStore, FileTextSource, HttpGeminiClient};
pub use memory::InMemoryCredentialStore;
