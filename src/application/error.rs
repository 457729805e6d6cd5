//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::GenerationError;
use crate::domain::scene::SceneError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("{0}")]
    ValidationError(String),

    /// 外部服务错误
    #[error("{0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建外部服务错误
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalServiceError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<SceneError> for ApplicationError {
    fn from(err: SceneError) -> Self {
        if err.is_input_error() {
            Self::ValidationError(err.to_string())
        } else {
            Self::ExternalServiceError(crate::application::describe_failure(&err))
        }
    }
}

impl From<GenerationError> for ApplicationError {
    fn from(err: GenerationError) -> Self {
        Self::ExternalServiceError(crate::application::describe_failure(&err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_stay_validation_errors() {
        let err: ApplicationError = SceneError::EmptyText.into();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(err.to_string(), "소설 텍스트를 입력해주세요.");
    }

    #[test]
    fn test_service_errors_are_external() {
        let err: ApplicationError = GenerationError::ServiceError {
            status: 400,
            body: r#"{"error":{"message":"API key not valid."}}"#.to_string(),
        }
        .into();
        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
        assert_eq!(err.to_string(), "API key not valid.");

        let err: ApplicationError = SceneError::NotAnObject.into();
        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
    }
}
