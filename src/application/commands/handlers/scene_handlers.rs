//! Scene Command Handlers - 分镜生成提交流程
//!
//! 同一时间只允许一个请求在途：
//! - loading 标志在发出请求前置位，由 guard 在所有退出路径上释放
//! - loading 期间再次提交是空操作（不发请求，不重置状态）
//! - 结果与错误只由提交流程写入，整体替换

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::application::commands::{GenerateScenes, SubmitOutcome};
use crate::application::failure::describe_failure;
use crate::application::ports::{GenerationEnginePort, GenerationRequest};
use crate::domain::scene::{AnalysisResult, SceneRequest};

/// 当前状态的只读视图
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceSnapshot {
    pub result: AnalysisResult,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct WorkspaceState {
    result: AnalysisResult,
    error: Option<String>,
}

/// loading 标志的作用域 guard
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    /// 已在 loading 时返回 None
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// GenerateScenes Handler
///
/// 持有 AnalysisResult / error / loading 三元组
pub struct GenerateScenesHandler {
    engine: Arc<dyn GenerationEnginePort>,
    state: RwLock<WorkspaceState>,
    loading: AtomicBool,
}

impl GenerateScenesHandler {
    pub fn new(engine: Arc<dyn GenerationEnginePort>) -> Self {
        Self {
            engine,
            state: RwLock::new(WorkspaceState::default()),
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        WorkspaceSnapshot {
            result: state.result.clone(),
            error: state.error.clone(),
            loading: self.is_loading(),
        }
    }

    fn update_state(&self, f: impl FnOnce(&mut WorkspaceState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    pub async fn handle(&self, command: GenerateScenes) -> SubmitOutcome {
        let Some(_guard) = LoadingGuard::acquire(&self.loading) else {
            tracing::debug!("Submission already in flight, ignored");
            return SubmitOutcome::Skipped;
        };

        let form = command.form;
        let credential = match form.validate() {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!(error = %e, "Submission rejected");
                self.update_state(|state| state.error = Some(e.to_string()));
                return SubmitOutcome::Rejected(e);
            }
        };

        self.update_state(|state| {
            state.error = None;
            state.result = AnalysisResult::new();
        });

        let request_id = Uuid::new_v4();
        let request = GenerationRequest::new(SceneRequest::build(&form.text, &form.allocation), credential);

        tracing::info!(
            request_id = %request_id,
            model = %self.engine.model(),
            text_chars = form.char_count(),
            total_cuts = form.allocation.total(),
            "Requesting scene breakdown"
        );

        let outcome = match self.engine.generate(&request).await {
            Ok(raw) => AnalysisResult::from_response(&raw).map_err(|e| describe_failure(&e)),
            Err(e) => Err(describe_failure(&e)),
        };

        match outcome {
            Ok(result) => {
                tracing::info!(
                    request_id = %request_id,
                    cuts = result.total_cuts(),
                    "Scene breakdown completed"
                );
                self.update_state(|state| state.result = result.clone());
                SubmitOutcome::Completed(result)
            }
            Err(message) => {
                tracing::error!(request_id = %request_id, error = %message, "Scene breakdown failed");
                self.update_state(|state| state.error = Some(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }
}
