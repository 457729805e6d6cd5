//! CLI Layer - 命令行前端
//!
//! - args: 子命令与参数定义
//! - render: 结果表和分配摘要输出
//! - runner: 组装适配器并执行命令

pub mod args;
pub mod render;
pub mod runner;

pub use args::{AllocationArgs, Cli, Command, GenerateArgs, KeyAction};
pub use render::{render_allocation, render_result, AnalysisReport};
pub use runner::{build_credential_store, build_generation_engine, run};
