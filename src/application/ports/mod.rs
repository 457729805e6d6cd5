//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod credential_store;
mod generation_engine;

pub use credential_store::{CredentialStoreError, CredentialStorePort, CREDENTIAL_KEY};
pub use generation_engine::{GenerationEnginePort, GenerationError, GenerationRequest};
