//! Generation Engine Port - 生成服务抽象
//!
//! 定义结构化输出生成调用的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::scene::{Credential, SceneRequest};

/// 生成服务错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    /// 服务返回非成功状态，body 原样保留（通常内嵌 {"error":{"message":...}}）
    #[error("HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

/// 生成请求
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 嵌入了原文和各段镜头数的提示词
    pub prompt: String,
    /// 严格输出 schema
    pub schema: Value,
    /// 调用凭证
    pub credential: Credential,
}

impl GenerationRequest {
    pub fn new(request: SceneRequest, credential: Credential) -> Self {
        Self {
            prompt: request.prompt,
            schema: request.schema,
            credential,
        }
    }
}

/// Generation Engine Port
///
/// 每次提交恰好调用一次 `generate`，返回模型输出的原始 JSON 文本
#[async_trait]
pub trait GenerationEnginePort: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// 使用的模型名称（用于日志和报告）
    fn model(&self) -> &str;
}
