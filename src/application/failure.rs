//! 调用失败的消息归一化
//!
//! 规则（依次尝试，任何一步解析失败都静默进入下一步）:
//! 1. 消息中内嵌 JSON 对象且包含字符串字段 `error.message` 时，取该字段
//! 2. 否则使用错误本身的消息
//! 3. 否则使用固定的通用消息

use serde_json::Value;

/// 通用失败消息
pub const FALLBACK_FAILURE_MESSAGE: &str =
    "Gemini API 호출에 실패했습니다. API 키를 확인한 뒤 다시 시도해주세요.";

/// 提取消息中内嵌的 `{"error":{"message": ...}}`
///
/// 取第一个 `{` 到最后一个 `}` 之间的片段解析
pub fn extract_embedded_message(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    let value: Value = serde_json::from_str(&text[start..=end]).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// 将任意错误归一化为一条面向用户的消息，不会失败
pub fn describe_failure<E: std::fmt::Display + ?Sized>(err: &E) -> String {
    let message = err.to_string();

    if let Some(embedded) = extract_embedded_message(&message) {
        return embedded;
    }
    if !message.trim().is_empty() {
        return message;
    }
    FALLBACK_FAILURE_MESSAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationError;
    use crate::domain::scene::SceneError;

    #[test]
    fn test_embedded_error_message_wins() {
        let err = GenerationError::Other(
            r#"got status 429 {"error":{"message":"quota exceeded"}}"#.to_string(),
        );
        assert_eq!(describe_failure(&err), "quota exceeded");
    }

    #[test]
    fn test_service_error_body_is_unwrapped() {
        let err = GenerationError::ServiceError {
            status: 400,
            body: r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#.to_string(),
        };
        assert_eq!(
            describe_failure(&err),
            "API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn test_plain_message_is_used() {
        let err = GenerationError::NetworkError("connection refused".to_string());
        assert_eq!(describe_failure(&err), "Network error: connection refused");
    }

    #[test]
    fn test_broken_embedded_json_falls_through() {
        let err = GenerationError::Other("oops {not json}".to_string());
        assert_eq!(describe_failure(&err), "oops {not json}");

        let err = GenerationError::Other(r#"{"error":{"message":42}}"#.to_string());
        assert_eq!(describe_failure(&err), r#"{"error":{"message":42}}"#);
    }

    #[test]
    fn test_empty_message_uses_fallback() {
        let err = GenerationError::Other("  ".to_string());
        assert_eq!(describe_failure(&err), FALLBACK_FAILURE_MESSAGE);
    }

    #[test]
    fn test_shape_errors_surface_their_message() {
        assert_eq!(
            describe_failure(&SceneError::NotAnObject),
            "API did not return a valid object."
        );
    }

    #[test]
    fn test_reversed_braces() {
        assert_eq!(extract_embedded_message("} then {"), None);
    }
}
