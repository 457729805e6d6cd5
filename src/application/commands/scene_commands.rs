//! Scene Commands - 分镜生成命令

use crate::domain::scene::{AnalysisResult, SceneError, SceneForm};

/// 提交分镜生成命令
#[derive(Debug, Clone)]
pub struct GenerateScenes {
    pub form: SceneForm,
}

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 已有请求在进行中，本次提交被忽略
    Skipped,
    /// 输入校验失败，未发出请求
    Rejected(SceneError),
    /// 调用失败，消息已归一化
    Failed(String),
    /// 成功
    Completed(AnalysisResult),
}

impl SubmitOutcome {
    /// 面向用户的错误消息
    pub fn error_message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Rejected(e) => Some(e.to_string()),
            SubmitOutcome::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }
}
