//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::scene::DEFAULT_TOTAL_CUTS;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 生成服务配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 分镜默认值
    #[serde(default)]
    pub scene: SceneConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API 基础 URL
    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    /// 模型名称
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// 请求超时时间（秒），不设置则使用传输层默认值
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// 固定响应文件；设置后不访问网络
    #[serde(default)]
    pub fake_response: Option<PathBuf>,
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_url(),
            model: default_gemini_model(),
            timeout_secs: None,
            fake_response: None,
        }
    }
}

/// 分镜默认值
#[derive(Debug, Clone, Deserialize)]
pub struct SceneConfig {
    /// 默认总镜头数
    #[serde(default = "default_total_cuts")]
    pub total_cuts: u32,
}

fn default_total_cuts() -> u32 {
    DEFAULT_TOTAL_CUTS
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            total_cuts: default_total_cuts(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// 凭证文件路径，未设置时使用用户配置目录
    #[serde(default)]
    pub credential_path: Option<PathBuf>,
}

impl StorageConfig {
    /// 实际使用的凭证文件路径
    pub fn resolved_credential_path(&self) -> PathBuf {
        if let Some(path) = &self.credential_path {
            return path.clone();
        }
        dirs::config_dir()
            .map(|dir| dir.join("scenecut").join("credentials.json"))
            .unwrap_or_else(|| PathBuf::from("data/credentials.json"))
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
