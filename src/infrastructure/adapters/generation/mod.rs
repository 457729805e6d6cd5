//! Generation Adapter - 生成服务客户端实现

mod fake_generation_client;
mod gemini_client;

pub use fake_generation_client::{FakeGenerationClient, FakeGenerationClientConfig};
pub use gemini_client::*;
