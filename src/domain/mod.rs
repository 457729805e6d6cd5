//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Scene Context: 分镜分配、请求构建、响应校验

pub mod scene;
