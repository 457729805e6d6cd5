//! Scene Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("소설 텍스트를 입력해주세요.")]
    EmptyText,

    #[error("Gemini API 키를 입력해주세요.")]
    EmptyCredential,

    #[error("기/승/전/결의 컷 수 합계가 총 컷 수와 일치해야 합니다.")]
    AllocationMismatch { sum: u64, total: u32 },

    #[error("{0}")]
    MalformedResponse(String),

    #[error("API did not return a valid object.")]
    NotAnObject,
}

impl SceneError {
    /// 提交前的输入校验错误（不会发出请求）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SceneError::EmptyText | SceneError::EmptyCredential | SceneError::AllocationMismatch { .. }
        )
    }
}
