//! Scene Context - Aggregate Root

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{Cut, SceneError, Section, SECTIONS};

/// 分析结果聚合根
///
/// 不变量:
/// - 每段的镜头顺序即响应中的顺序，不可变
/// - 每次调用整体替换，不与旧结果合并
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    sections: [Vec<Cut>; 4],
}

/// 渲染用的段落块：起始编号连续，空段不出现
#[derive(Debug, Clone, Copy)]
pub struct SectionBlock<'a> {
    pub section: Section,
    /// 1-based，跨段连续
    pub start_number: usize,
    pub cuts: &'a [Cut],
}

impl SectionBlock<'_> {
    pub fn end_number(&self) -> usize {
        self.start_number + self.cuts.len() - 1
    }

    /// 段标题，例如 "승 (Cuts 21-40)"
    pub fn title(&self) -> String {
        format!(
            "{} (Cuts {}-{})",
            self.section,
            self.start_number,
            self.end_number()
        )
    }

    /// (编号, 镜头)
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Cut)> + '_ {
        self.cuts
            .iter()
            .enumerate()
            .map(move |(offset, cut)| (self.start_number + offset, cut))
    }
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: Section, cuts: Vec<Cut>) -> Self {
        self.sections[section.index()] = cuts;
        self
    }

    /// 解析生成服务返回的 JSON 文本
    ///
    /// 缺失的段键（或值为 null）按空列表处理；段值不是数组时报错，镜头内缺失字段取空值
    pub fn from_response(raw: &str) -> Result<Self, SceneError> {
        let value: Value = serde_json::from_str(raw.trim())
            .map_err(|e| SceneError::MalformedResponse(e.to_string()))?;

        let object = match value {
            Value::Object(map) => map,
            _ => return Err(SceneError::NotAnObject),
        };

        let mut result = Self::new();
        for section in SECTIONS {
            match object.get(section.as_str()) {
                None | Some(Value::Null) => {
                    tracing::debug!(section = %section, "Section missing from response, treated as empty");
                }
                Some(cuts) => {
                    let cuts: Vec<Cut> = serde_json::from_value(cuts.clone()).map_err(|e| {
                        SceneError::MalformedResponse(format!("section {}: {}", section, e))
                    })?;
                    result.sections[section.index()] = cuts;
                }
            }
        }

        Ok(result)
    }

    pub fn cuts(&self, section: Section) -> &[Cut] {
        &self.sections[section.index()]
    }

    pub fn total_cuts(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_cuts() == 0
    }

    /// 按固定顺序生成渲染块，编号跨段连续
    pub fn blocks(&self) -> Vec<SectionBlock<'_>> {
        let mut next_number = 1;
        let mut blocks = Vec::new();

        for section in SECTIONS {
            let cuts = self.cuts(section);
            if cuts.is_empty() {
                continue;
            }
            blocks.push(SectionBlock {
                section,
                start_number: next_number,
                cuts,
            });
            next_number += cuts.len();
        }

        blocks
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SECTIONS.len()))?;
        for section in SECTIONS {
            map.serialize_entry(section.as_str(), self.cuts(section))?;
        }
        map.end()
    }
}
