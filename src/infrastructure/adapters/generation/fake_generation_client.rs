//! Fake Generation Client - 离线使用的生成客户端
//!
//! 始终返回固定的响应文件内容，不实际调用生成服务

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::application::ports::{GenerationEnginePort, GenerationError, GenerationRequest};

/// Fake Generation Client 配置
#[derive(Debug, Clone)]
pub struct FakeGenerationClientConfig {
    /// 固定返回的响应文件路径
    pub response_path: PathBuf,
}

/// Fake Generation Client
///
/// 构建时读入响应文件，每次调用原样返回
pub struct FakeGenerationClient {
    response: String,
}

impl FakeGenerationClient {
    pub fn new(config: FakeGenerationClientConfig) -> Result<Self, std::io::Error> {
        let response = std::fs::read_to_string(&config.response_path)?;
        tracing::info!(
            path = %config.response_path.display(),
            "FakeGenerationClient initialized"
        );
        Ok(Self { response })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        Self::new(FakeGenerationClientConfig {
            response_path: path.as_ref().to_path_buf(),
        })
    }

    /// 直接使用给定的响应文本
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl GenerationEnginePort for FakeGenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        tracing::debug!(
            prompt_len = request.prompt.len(),
            "FakeGenerationClient: returning fixed response"
        );
        Ok(self.response.clone())
    }

    fn model(&self) -> &str {
        "fake"
    }
}
