//! In-Memory Credential Store Implementation

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{CredentialStoreError, CredentialStorePort, CREDENTIAL_KEY};
use crate::domain::scene::Credential;

/// 内存键值存储（不落盘）
pub struct InMemoryCredentialStore {
    entries: DashMap<String, String>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStorePort for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, CredentialStoreError> {
        Ok(self
            .entries
            .get(CREDENTIAL_KEY)
            .and_then(|value| Credential::new(value.as_str())))
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        self.entries
            .insert(CREDENTIAL_KEY.to_string(), credential.expose().to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<(), CredentialStoreError> {
        self.entries.remove(CREDENTIAL_KEY);
        Ok(())
    }
}
