//! Credential Handlers - 凭证读写
//!
//! 存储可能不可用，所有存储错误只记 debug 日志并被吞掉，不影响其他功能

use std::sync::Arc;

use crate::application::commands::UpdateCredential;
use crate::application::ports::CredentialStorePort;
use crate::domain::scene::Credential;

pub struct CredentialHandler {
    store: Arc<dyn CredentialStorePort>,
}

impl CredentialHandler {
    pub fn new(store: Arc<dyn CredentialStorePort>) -> Self {
        Self { store }
    }

    /// 启动时读取一次
    pub async fn load(&self) -> Option<Credential> {
        match self.store.load().await {
            Ok(credential) => credential,
            Err(e) => {
                tracing::debug!(error = %e, "Credential store read failed, ignored");
                None
            }
        }
    }

    /// 非空白时写入，空白时删除；返回当前生效的凭证
    pub async fn handle(&self, command: UpdateCredential) -> Option<Credential> {
        match Credential::new(&command.raw) {
            Some(credential) => {
                if let Err(e) = self.store.save(&credential).await {
                    tracing::debug!(error = %e, "Credential store write failed, ignored");
                }
                Some(credential)
            }
            None => {
                if let Err(e) = self.store.remove().await {
                    tracing::debug!(error = %e, "Credential store remove failed, ignored");
                }
                None
            }
        }
    }
}
