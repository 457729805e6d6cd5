//! Command Runner
//!
//! 组装端口实现并执行子命令

use std::path::Path;
use std::sync::Arc;

use tokio::io::AsyncReadExt;

use crate::application::ports::{CredentialStorePort, GenerationEnginePort};
use crate::application::{
    ApplicationError, CredentialHandler, GenerateScenes, GenerateScenesHandler, SubmitOutcome,
    UpdateCredential,
};
use crate::config::AppConfig;
use crate::domain::scene::{response_schema, SceneError, SceneForm, SceneRequest};
use crate::infrastructure::adapters::{
    FakeGenerationClient, FileCredentialStore, FileTextSource, HttpGeminiClient,
    HttpGeminiClientConfig, TextSourceError,
};
use crate::infrastructure::memory::InMemoryCredentialStore;

use super::args::{Cli, Command, GenerateArgs, KeyAction};
use super::render::{render_allocation, render_result, AnalysisReport};

/// 按配置创建凭证存储
pub fn build_credential_store(config: &AppConfig, ephemeral: bool) -> Arc<dyn CredentialStorePort> {
    if ephemeral {
        return Arc::new(InMemoryCredentialStore::new());
    }
    Arc::new(FileCredentialStore::new(
        config.storage.resolved_credential_path(),
    ))
}

/// 按配置创建生成引擎；配置了固定响应文件时不访问网络
pub fn build_generation_engine(config: &AppConfig) -> Result<Arc<dyn GenerationEnginePort>, ApplicationError> {
    if let Some(path) = &config.gemini.fake_response {
        let client = FakeGenerationClient::from_path(path).map_err(|e| {
            ApplicationError::internal(format!("Failed to read {}: {}", path.display(), e))
        })?;
        return Ok(Arc::new(client));
    }

    let mut client_config = HttpGeminiClientConfig::new(&config.gemini.base_url)
        .with_model(&config.gemini.model);
    if let Some(secs) = config.gemini.timeout_secs {
        client_config = client_config.with_timeout(secs);
    }
    let client = HttpGeminiClient::new(client_config)
        .map_err(|e| ApplicationError::internal(e.to_string()))?;
    Ok(Arc::new(client))
}

/// 执行一条命令
pub async fn run(cli: Cli, config: AppConfig) -> Result<(), ApplicationError> {
    let store = build_credential_store(&config, cli.ephemeral);
    let credentials = CredentialHandler::new(store);

    match cli.command {
        Command::Generate(args) => generate(args, &config, &credentials).await,
        Command::Allocate { allocation } => {
            let allocation = allocation.build(config.scene.total_cuts);
            print!("{}", render_allocation(&allocation));
            if allocation.is_mismatch() {
                return Err(SceneError::AllocationMismatch {
                    sum: allocation.sum(),
                    total: allocation.total(),
                }
                .into());
            }
            Ok(())
        }
        Command::Key { action } => key(action, &credentials).await,
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&response_schema())
                .map_err(|e| ApplicationError::internal(e.to_string()))?;
            println!("{}", schema);
            Ok(())
        }
    }
}

async fn key(action: KeyAction, credentials: &CredentialHandler) -> Result<(), ApplicationError> {
    match action {
        KeyAction::Set { key } => {
            credentials
                .handle(UpdateCredential { raw: key })
                .await
                .ok_or(SceneError::EmptyCredential)?;
            eprintln!("API 키가 저장되었습니다.");
        }
        KeyAction::Clear => {
            credentials
                .handle(UpdateCredential { raw: String::new() })
                .await;
            eprintln!("API 키가 삭제되었습니다.");
        }
        KeyAction::Show { reveal } => match credentials.load().await {
            Some(credential) if reveal => println!("{}", credential.expose()),
            Some(credential) => println!("{}", credential.masked()),
            None => eprintln!("저장된 API 키가 없습니다."),
        },
    }
    Ok(())
}

/// 读取原文：`--text`、`--file <path>` 或 `--file -`（stdin）
async fn read_input_text(args: &GenerateArgs) -> Result<String, ApplicationError> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    match args.file.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .map_err(stdin_read_error)?;
            Ok(text)
        }
        Some(path) => FileTextSource::read(path)
            .await
            .map_err(|e| ApplicationError::validation(e.to_string())),
        None => Ok(String::new()),
    }
}

/// stdin 读取失败：只有非法 UTF-8 报编码错误，其余按读取错误
fn stdin_read_error(err: std::io::Error) -> ApplicationError {
    let source_error = if err.kind() == std::io::ErrorKind::InvalidData {
        TextSourceError::InvalidEncoding
    } else {
        TextSourceError::ReadError(format!("stdin: {}", err))
    };
    ApplicationError::validation(source_error.to_string())
}

async fn generate(
    args: GenerateArgs,
    config: &AppConfig,
    credentials: &CredentialHandler,
) -> Result<(), ApplicationError> {
    let text = read_input_text(&args).await?;
    let allocation = args.allocation.build(config.scene.total_cuts);

    if args.dry_run {
        let request = SceneRequest::build(&text, &allocation);
        let payload = serde_json::to_string_pretty(&request)
            .map_err(|e| ApplicationError::internal(e.to_string()))?;
        println!("{}", payload);
        return Ok(());
    }

    // 与密钥面板一致：显式给出的密钥会被保存
    let credential = match &args.api_key {
        Some(raw) => {
            credentials
                .handle(UpdateCredential { raw: raw.clone() })
                .await
        }
        None => credentials.load().await,
    };
    let raw_credential = credential
        .map(|c| c.expose().to_string())
        .unwrap_or_default();

    let form = SceneForm::new(text, raw_credential, allocation);
    eprintln!("글자수 공백포함 {}자", form.char_count());

    let engine = build_generation_engine(config)?;
    let model = engine.model().to_string();
    let handler = GenerateScenesHandler::new(engine);

    if !form.allocation.is_mismatch() && !form.text.trim().is_empty() {
        eprintln!("AI가 소설 전체를 분석하고 있습니다... 잠시만 기다려주세요.");
    }

    match handler.handle(GenerateScenes { form }).await {
        SubmitOutcome::Completed(result) => {
            if args.json {
                let report = AnalysisReport::new(&model, &allocation, &result);
                let json = serde_json::to_string_pretty(&report)
                    .map_err(|e| ApplicationError::internal(e.to_string()))?;
                println!("{}", json);
            } else {
                print!("{}", render_result(&result));
            }
            Ok(())
        }
        SubmitOutcome::Rejected(e) => Err(e.into()),
        SubmitOutcome::Failed(message) => Err(ApplicationError::external(message)),
        SubmitOutcome::Skipped => Err(ApplicationError::internal(
            "a submission is already in progress",
        )),
    }
}
