//! Scene Context - 分镜限界上下文
//!
//! 职责:
//! - 기/승/전/결 四段固定顺序
//! - 镜头数分配规则
//! - 请求构建（提示词 + 输出 schema）
//! - 响应校验与结果编号

mod aggregate;
mod entities;
mod errors;
mod request;
mod value_objects;

pub use aggregate::{AnalysisResult, SectionBlock};
pub use entities::{Cut, MAX_NAMED_CHARACTERS};
pub use errors::SceneError;
pub use request::{response_schema, SceneForm, SceneRequest, NO_DIALOGUE_PLACEHOLDER};
pub use value_objects::{Credential, CutAllocation, Section, DEFAULT_TOTAL_CUTS, SECTIONS};
