//! 请求构建
//!
//! 提交前校验 + 生成提示词和严格输出 schema

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{Credential, CutAllocation, SceneError, SECTIONS};

/// 无台词时要求模型填写的占位文本
pub const NO_DIALOGUE_PLACEHOLDER: &str = "대사 없음";

/// 用户填写的表单
#[derive(Debug, Clone)]
pub struct SceneForm {
    pub text: String,
    pub credential: String,
    pub allocation: CutAllocation,
}

impl SceneForm {
    pub fn new(text: impl Into<String>, credential: impl Into<String>, allocation: CutAllocation) -> Self {
        Self {
            text: text.into(),
            credential: credential.into(),
            allocation,
        }
    }

    /// 按顺序检查前置条件，遇到第一个失败即返回
    ///
    /// 1. 文本为空或全是空白
    /// 2. 凭证为空或全是空白
    /// 3. 四段之和不等于总数
    pub fn validate(&self) -> Result<Credential, SceneError> {
        if self.text.trim().is_empty() {
            return Err(SceneError::EmptyText);
        }
        let credential = Credential::new(&self.credential).ok_or(SceneError::EmptyCredential)?;
        if self.allocation.is_mismatch() {
            return Err(SceneError::AllocationMismatch {
                sum: self.allocation.sum(),
                total: self.allocation.total(),
            });
        }
        Ok(credential)
    }

    /// 字数（含空白）
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// 发往生成服务的请求内容
#[derive(Debug, Clone, Serialize)]
pub struct SceneRequest {
    pub prompt: String,
    pub schema: Value,
}

impl SceneRequest {
    pub fn build(text: &str, allocation: &CutAllocation) -> Self {
        Self {
            prompt: build_prompt(text, allocation),
            schema: response_schema(),
        }
    }
}

/// 单个镜头对象的 schema
fn cut_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "place": {
                "type": "STRING",
                "description": "The location where the scene takes place. (장소)"
            },
            "characterCount": {
                "type": "INTEGER",
                "description": "The count of characters present in the scene. (인물 수)"
            },
            "characters": {
                "type": "ARRAY",
                "description": "The names of the characters in the scene. IMPORTANT: Only list names if 4 or fewer characters. If 5 or more, return an empty array []. (등장인물)",
                "items": { "type": "STRING" }
            },
            "dialogue": {
                "type": "STRING",
                "description": format!(
                    "A key line of dialogue or a summary of the conversation. If no dialogue, state \"{}\". (대사)",
                    NO_DIALOGUE_PLACEHOLDER
                )
            },
            "situation": {
                "type": "STRING",
                "description": "A brief description of what is happening in the scene. (상황)"
            },
            "shot": {
                "type": "STRING",
                "description": "Suggest the most fitting camera shot for the scene (e.g., 클로즈업, 롱 샷, 오버 더 숄더 샷). (영화 컷)"
            }
        },
        "required": ["place", "characterCount", "characters", "dialogue", "situation", "shot"]
    })
}

/// 严格输出 schema：以四个段标识为键，每个值为镜头数组
pub fn response_schema() -> Value {
    let cut = cut_schema();
    let mut properties = Map::new();
    for section in SECTIONS {
        properties.insert(
            section.as_str().to_string(),
            json!({
                "type": "ARRAY",
                "description": section.schema_description(),
                "items": cut.clone()
            }),
        );
    }
    let required: Vec<&str> = SECTIONS.iter().map(|s| s.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required
    })
}

fn build_prompt(text: &str, allocation: &CutAllocation) -> String {
    let counts: String = allocation
        .iter()
        .map(|(section, count)| {
            format!(
                "- '{}' Section ({}): {} cuts.\n",
                section,
                section.description(),
                count
            )
        })
        .collect();

    format!(
        r#"You are an expert film script analyst. Your task is to analyze the provided novel text and break it down into a 4-act structure (기-승-전-결).

Generate sequential cuts for EACH of the four parts based on the counts I provide:
{counts}
Based on the full novel text provided below, create the scenes for each section.

For each cut, you must extract the following information in Korean:
1.  **place (장소):** The location where the scene takes place.
2.  **characterCount (인물 수):** The total number of characters present in the scene.
3.  **characters (등장인물):** The names of the characters. IMPORTANT: Only list names if there are 4 or fewer characters. If there are 5 or more, return an empty array [].
4.  **dialogue (대사):** A key line of dialogue or a concise summary of the conversation. If there is no dialogue, you must write "{placeholder}".
5.  **situation (상황):** A brief description of the events and atmosphere of the scene.
6.  **shot (영화 컷):** Suggest the most fitting camera shot for the scene (e.g., 클로즈업, 롱 샷, 오버 더 숄더 샷, 트래킹 샷).

Provide the final output as a single, valid JSON object with four keys: "기", "승", "전", "결". Each key must contain an array of cut objects for that section, strictly adhering to the defined schema. Do not include any explanations or text outside of the JSON object.

Novel Text:
---
{text}
---
"#,
        counts = counts,
        placeholder = NO_DIALOGUE_PLACEHOLDER,
        text = text,
    )
}
