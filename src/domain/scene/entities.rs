//! Scene Context - Entities

use serde::{Deserialize, Deserializer, Serialize};

/// 显示人物姓名的人数上限
pub const MAX_NAMED_CHARACTERS: u32 = 4;

/// 一个镜头（分析结果中的一行）
///
/// 只由生成服务的响应产生，接收后不可变；在所属段内的位置决定显示编号。
/// 字段缺失或为 null 时取空值，单个镜头不完整不影响整个结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cut {
    /// 场景地点
    #[serde(default, deserialize_with = "null_as_default")]
    pub place: String,
    /// 登场人数
    #[serde(default, deserialize_with = "lenient_count")]
    pub character_count: u32,
    /// 登场人物姓名（人数 >= 5 时应为空）
    #[serde(default, deserialize_with = "null_as_default")]
    pub characters: Vec<String>,
    /// 关键台词或对话摘要
    #[serde(default, deserialize_with = "null_as_default")]
    pub dialogue: String,
    /// 情境描述
    #[serde(default, deserialize_with = "null_as_default")]
    pub situation: String,
    /// 建议的镜头类型
    #[serde(default, deserialize_with = "null_as_default")]
    pub shot: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Integer(u64),
    Float(f64),
}

/// 人数接受整数或整数值的浮点数（如 `2.0`），null 视为 0
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let count = match Option::<RawCount>::deserialize(deserializer)? {
        None => return Ok(0),
        Some(RawCount::Integer(n)) => n,
        Some(RawCount::Float(f)) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => f as u64,
        Some(RawCount::Float(f)) => {
            return Err(D::Error::custom(format!("invalid characterCount {}", f)))
        }
    };
    u32::try_from(count).map_err(|_| D::Error::custom(format!("invalid characterCount {}", count)))
}

impl Cut {
    /// 渲染时显示的人物姓名
    ///
    /// 接收阶段不校验人数与姓名是否一致，由显示阶段决定是否展示
    pub fn displayed_characters(&self) -> Option<&[String]> {
        if self.character_count == 0 || self.character_count > MAX_NAMED_CHARACTERS {
            return None;
        }
        if self.characters.is_empty() {
            return None;
        }
        Some(&self.characters)
    }
}
