//! Credential Adapter - 凭证存储实现

mod file_credential_store;

pub use file_credential_store::FileCredentialStore;
