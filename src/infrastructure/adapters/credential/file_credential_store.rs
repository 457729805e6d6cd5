//! File Credential Store - 本地 JSON 键值文件
//!
//! 实现 CredentialStorePort trait，文件内容为 `{"<key>": "<value>", ...}`，
//! 写入时保留其他键

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{CredentialStoreError, CredentialStorePort, CREDENTIAL_KEY};
use crate::domain::scene::Credential;

/// 文件凭证存储
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<Map<String, Value>, CredentialStoreError> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(CredentialStoreError::IoError(e.to_string())),
        };

        match serde_json::from_slice::<Value>(&data)
            .map_err(|e| CredentialStoreError::SerializationError(e.to_string()))?
        {
            Value::Object(map) => Ok(map),
            _ => Err(CredentialStoreError::SerializationError(
                "credential file is not a JSON object".to_string(),
            )),
        }
    }

    async fn write_map(&self, map: Map<String, Value>) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CredentialStoreError::IoError(e.to_string()))?;
        }

        let data = serde_json::to_vec_pretty(&Value::Object(map))
            .map_err(|e| CredentialStoreError::SerializationError(e.to_string()))?;
        fs::write(&self.path, data)
            .await
            .map_err(|e| CredentialStoreError::IoError(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| CredentialStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}

#[async_trait]
impl CredentialStorePort for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, CredentialStoreError> {
        let map = self.read_map().await?;
        Ok(map
            .get(CREDENTIAL_KEY)
            .and_then(Value::as_str)
            .and_then(Credential::new))
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        // 内容损坏时覆盖，读取失败则不写入，避免丢失其他键
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(CredentialStoreError::SerializationError(e)) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Credential file unreadable, overwriting");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(
            CREDENTIAL_KEY.to_string(),
            Value::String(credential.expose().to_string()),
        );
        self.write_map(map).await?;

        tracing::debug!(path = %self.path.display(), "Credential saved");
        Ok(())
    }

    async fn remove(&self) -> Result<(), CredentialStoreError> {
        let mut map = self.read_map().await?;
        if map.remove(CREDENTIAL_KEY).is_some() {
            self.write_map(map).await?;
            tracing::debug!(path = %self.path.display(), "Credential removed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_load_remove() {
        let temp_dir = tempdir().unwrap();
        let store = FileCredentialStore::new(temp_dir.path().join("nested/credentials.json"));

        // 文件不存在
        assert!(store.load().await.unwrap().is_none());

        let credential = Credential::new("AIza-test").unwrap();
        store.save(&credential).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(credential));

        store.remove().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_other_keys_are_preserved() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("credentials.json");
        tokio::fs::write(&path, r#"{"theme":"dark"}"#).await.unwrap();

        let store = FileCredentialStore::new(&path);
        store.save(&Credential::new("k").unwrap()).await.unwrap();
        store.remove().await.unwrap();

        let content: Value = serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(content["theme"], "dark");
        assert!(content.get(CREDENTIAL_KEY).is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("credentials.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(
            store.load().await,
            Err(CredentialStoreError::SerializationError(_))
        ));

        // 写入会覆盖损坏的文件
        store.save(&Credential::new("k").unwrap()).await.unwrap();
        assert!(store.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_read_failure_does_not_overwrite() {
        let temp_dir = tempdir().unwrap();
        // 路径是目录，读取返回 IO 错误而不是解析错误
        let path = temp_dir.path().join("credentials.json");
        tokio::fs::create_dir(&path).await.unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(
            store.save(&Credential::new("k").unwrap()).await,
            Err(CredentialStoreError::IoError(_))
        ));
        assert!(tokio::fs::metadata(&path).await.unwrap().is_dir());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let store = FileCredentialStore::new(temp_dir.path().join("credentials.json"));
        store.save(&Credential::new("k").unwrap()).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
