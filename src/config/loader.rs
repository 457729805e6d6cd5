//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（scenecut.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["scenecut", "scenecut.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SCENECUT_`，层级分隔符 `__`）
/// 2. 配置文件（scenecut.toml 或 scenecut.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SCENECUT_GEMINI__MODEL=gemini-2.5-pro`
/// - `SCENECUT_GEMINI__TIMEOUT_SECS=300`
/// - `SCENECUT_SCENE__TOTAL_CUTS=40`
/// - `SCENECUT_STORAGE__CREDENTIAL_PATH=/secure/keys.json`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("gemini.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("gemini.model", "gemini-2.5-flash")?
        .set_default("scene.total_cuts", 80)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: SCENECUT_GEMINI__MODEL=gemini-2.5-pro
    builder = builder.add_source(
        Environment::with_prefix("SCENECUT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.gemini.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini base URL cannot be empty".to_string(),
        ));
    }

    if config.gemini.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini model cannot be empty".to_string(),
        ));
    }

    if config.scene.total_cuts == 0 {
        return Err(ConfigError::ValidationError(
            "Total cuts must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Application Configuration ===");
    tracing::debug!("Gemini URL: {}", config.gemini.base_url);
    tracing::debug!("Gemini Model: {}", config.gemini.model);
    match config.gemini.timeout_secs {
        Some(secs) => tracing::debug!("Gemini Timeout: {}s", secs),
        None => tracing::debug!("Gemini Timeout: transport default"),
    }
    if let Some(path) = &config.gemini.fake_response {
        tracing::debug!("Fake Response: {:?}", path);
    }
    tracing::debug!("Default Total Cuts: {}", config.scene.total_cuts);
    tracing::debug!(
        "Credential File: {:?}",
        config.storage.resolved_credential_path()
    );
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("=================================");
}
