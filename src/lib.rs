//! Scenecut - 小说分镜生成工具
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Scene Context: 기/승/전/결 分配规则、请求构建、响应校验与编号
//!
//! 应用层 (application/):
//! - Ports: 端口定义（GenerationEngine, CredentialStore）
//! - Commands: 分镜提交流程、凭证更新
//! - Failure: 失败消息归一化
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Gemini HTTP Client, Fake Client, 凭证文件, 文本文件
//! - Memory: 内存凭证存储
//! - CLI: 命令行前端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
