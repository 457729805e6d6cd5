//! Credential Store Port - 凭证本地存储
//!
//! 以固定键名保存在客户端本地的键值存储

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::scene::Credential;

/// 存储中使用的固定键名
pub const CREDENTIAL_KEY: &str = "novelSceneGeminiKey";

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CredentialStorePort: Send + Sync {
    async fn load(&self) -> Result<Option<Credential>, CredentialStoreError>;

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError>;

    async fn remove(&self) -> Result<(), CredentialStoreError>;
}
