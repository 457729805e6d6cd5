//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（GenerationEngine、CredentialStore）
//! - commands: 命令及处理器（分镜提交流程、凭证更新）
//! - failure: 调用失败消息归一化
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod failure;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{CredentialHandler, GenerateScenesHandler, WorkspaceSnapshot},
    GenerateScenes, SubmitOutcome, UpdateCredential,
};

pub use error::ApplicationError;

pub use failure::{describe_failure, extract_embedded_message, FALLBACK_FAILURE_MESSAGE};

pub use ports::{
    CredentialStoreError, CredentialStorePort, GenerationEnginePort, GenerationError,
    GenerationRequest, CREDENTIAL_KEY,
};
