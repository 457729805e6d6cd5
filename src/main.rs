//! Scenecut - 小说分镜生成工具
//!
//! 命令行入口:
//! - 加载配置
//! - 初始化日志（输出到 stderr，stdout 只留给结果）
//! - 执行子命令

use std::process::ExitCode;

use clap::Parser;
use scenecut::config::{load_config, load_config_from_path, print_config, AppConfig};
use scenecut::infrastructure::cli::{run, Cli};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},scenecut={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match cli.config.as_deref() {
        Some(path) => load_config_from_path(Some(path)),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    match run(cli, config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("오류가 발생했어요: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
