//! In-Memory Implementations
//!
//! 内存实现（测试与 `--ephemeral` 模式使用）

mod credential_store;

pub use credential_store::InMemoryCredentialStore;
