//! HTTP Gemini Client - 调用 Gemini generateContent 接口
//!
//! 实现 GenerationEnginePort trait
//!
//! 外部 API:
//! POST {base_url}/v1beta/models/{model}:generateContent
//! Header: x-goog-api-key
//! Request: {"contents": [...], "generationConfig": {"responseMimeType": "application/json", "responseSchema": {...}}}
//! Response: {"candidates": [{"content": {"parts": [{"text": "..."}]}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{GenerationEnginePort, GenerationError, GenerationRequest};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct HttpGeminiClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// 模型名称
    pub model: String,
    /// 请求超时时间（秒），None 表示使用传输层默认值
    pub timeout_secs: Option<u64>,
}

impl Default for HttpGeminiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: None,
        }
    }
}

impl HttpGeminiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Gemini HTTP 客户端
pub struct HttpGeminiClient {
    client: Client,
    config: HttpGeminiClientConfig,
}

impl HttpGeminiClient {
    pub fn new(config: HttpGeminiClientConfig) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 生成接口 URL
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// 拼接首个候选的所有文本片段
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("Prompt blocked: {}", r))
            .unwrap_or_else(|| "No candidates returned".to_string());
        return Err(GenerationError::InvalidResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(GenerationError::InvalidResponse(
            "Candidate contained no text".to_string(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl GenerationEnginePort for HttpGeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
            },
        };

        tracing::debug!(
            url = %self.generate_url(),
            prompt_len = request.prompt.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, request.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else if e.is_connect() {
                    GenerationError::NetworkError(format!("Cannot connect to Gemini API: {}", e))
                } else {
                    GenerationError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        let text = extract_text(parsed)?;

        tracing::info!(
            model = %self.config.model,
            response_len = text.len(),
            "generateContent completed"
        );

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::describe_failure;
    use crate::domain::scene::{Credential, CutAllocation, SceneRequest};
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    const MODEL_OUTPUT: &str = r#"{"기":[],"승":[],"전":[],"결":[]}"#;

    async fn generate_ok(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some("good-key") {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}})),
            );
        }
        if body["generationConfig"]["responseMimeType"] != "application/json"
            || body["generationConfig"]["responseSchema"]["required"][0] != "기"
        {
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({})));
        }
        (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": MODEL_OUTPUT}]},
                    "finishReason": "STOP"
                }]
            })),
        )
    }

    async fn generate_blocked() -> Json<Value> {
        Json(json!({"promptFeedback": {"blockReason": "SAFETY"}}))
    }

    async fn generate_quota() -> (StatusCode, Json<Value>) {
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": {"code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}})),
        )
    }

    /// 启动本地模拟服务，返回 base_url
    async fn spawn_mock(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request(key: &str) -> GenerationRequest {
        GenerationRequest::new(
            SceneRequest::build("본문", &CutAllocation::default()),
            Credential::new(key).unwrap(),
        )
    }

    #[test]
    fn test_config_default() {
        let config = HttpGeminiClientConfig::default();
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = HttpGeminiClientConfig::new("http://example.com:9000/")
            .with_model("gemini-2.0-flash")
            .with_timeout(60);
        let client = HttpGeminiClient::new(config).unwrap();
        assert_eq!(
            client.generate_url(),
            "http://example.com:9000/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn test_generate_returns_model_text() {
        let base_url = spawn_mock(Router::new().route("/v1beta/models/:action", post(generate_ok))).await;
        let client = HttpGeminiClient::new(HttpGeminiClientConfig::new(base_url)).unwrap();

        let text = client.generate(&request("good-key")).await.unwrap();
        assert_eq!(text, MODEL_OUTPUT);
    }

    #[tokio::test]
    async fn test_rejected_key_keeps_error_body() {
        let base_url = spawn_mock(Router::new().route("/v1beta/models/:action", post(generate_ok))).await;
        let client = HttpGeminiClient::new(HttpGeminiClientConfig::new(base_url)).unwrap();

        let err = client.generate(&request("bad-key")).await.unwrap_err();
        assert!(matches!(err, GenerationError::ServiceError { status: 400, .. }));
        assert_eq!(describe_failure(&err), "API key not valid.");
    }

    #[tokio::test]
    async fn test_quota_error_is_surfaced() {
        let base_url = spawn_mock(Router::new().route("/v1beta/models/:action", post(generate_quota))).await;
        let client = HttpGeminiClient::new(HttpGeminiClientConfig::new(base_url)).unwrap();

        let err = client.generate(&request("good-key")).await.unwrap_err();
        assert_eq!(describe_failure(&err), "quota exceeded");
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_invalid_response() {
        let base_url = spawn_mock(Router::new().route("/v1beta/models/:action", post(generate_blocked))).await;
        let client = HttpGeminiClient::new(HttpGeminiClientConfig::new(base_url)).unwrap();

        let err = client.generate(&request("good-key")).await.unwrap_err();
        match err {
            GenerationError::InvalidResponse(msg) => assert!(msg.contains("SAFETY")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpGeminiClient::new(HttpGeminiClientConfig::new(format!("http://{}", addr))).unwrap();
        let err = client.generate(&request("good-key")).await.unwrap_err();
        assert!(matches!(err, GenerationError::NetworkError(_)));
    }
}
