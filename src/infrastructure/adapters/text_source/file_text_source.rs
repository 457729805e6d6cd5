//! File Text Source - 读取本地纯文本文件
//!
//! 整体读入并按 UTF-8 解码，不限制大小

use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum TextSourceError {
    #[error("파일을 읽을 수 없습니다: {0}")]
    ReadError(String),

    #[error("파일은 UTF-8 텍스트여야 합니다.")]
    InvalidEncoding,
}

pub struct FileTextSource;

impl FileTextSource {
    pub async fn read(path: impl AsRef<Path>) -> Result<String, TextSourceError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .await
            .map_err(|e| TextSourceError::ReadError(format!("{}: {}", path.display(), e)))?;

        let text = String::from_utf8(bytes).map_err(|_| TextSourceError::InvalidEncoding)?;

        tracing::debug!(
            path = %path.display(),
            chars = text.chars().count(),
            "Text file loaded"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_reads_utf8_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("novel.txt");
        tokio::fs::write(&path, "첫 문장.\n둘째 문장.").await.unwrap();

        let text = FileTextSource::read(&path).await.unwrap();
        assert_eq!(text, "첫 문장.\n둘째 문장.");
    }

    #[tokio::test]
    async fn test_rejects_invalid_utf8() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("novel.txt");
        tokio::fs::write(&path, b"\xff\xfe\x00").await.unwrap();

        assert!(matches!(
            FileTextSource::read(&path).await,
            Err(TextSourceError::InvalidEncoding)
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        assert!(matches!(
            FileTextSource::read("/nonexistent/novel.txt").await,
            Err(TextSourceError::ReadError(_))
        ));
    }
}
