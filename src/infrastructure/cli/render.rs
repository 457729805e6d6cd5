//! 终端输出
//!
//! 结果表按固定段顺序输出，编号跨段连续，空段不输出标题

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::scene::{AnalysisResult, Cut, CutAllocation, Section};

const TABLE_HEADER: &str = "| 컷 # | 장소 | 인물 수 | 대사 | 영화 컷 | 상황 |";
const TABLE_RULE: &str = "|---:|---|---|---|---|---|";

/// `--json` 输出
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub model: &'a str,
    pub total_cuts: u32,
    pub allocation: Vec<SectionCount>,
    pub result: &'a AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct SectionCount {
    pub section: Section,
    pub cuts: u32,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(model: &'a str, allocation: &CutAllocation, result: &'a AnalysisResult) -> Self {
        Self {
            generated_at: Utc::now(),
            model,
            total_cuts: allocation.total(),
            allocation: allocation
                .iter()
                .map(|(section, cuts)| SectionCount { section, cuts })
                .collect(),
            result,
        }
    }
}

/// 表格单元格：竖线转义，换行折叠为空格
fn cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .split(|c: char| c == '\r' || c == '\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn character_cell(cut: &Cut) -> String {
    match cut.displayed_characters() {
        Some(names) => format!("{} ({})", cut.character_count, cell(&names.join(", "))),
        None => cut.character_count.to_string(),
    }
}

pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    for block in result.blocks() {
        out.push_str(&format!("## {}\n\n", block.title()));
        out.push_str(TABLE_HEADER);
        out.push('\n');
        out.push_str(TABLE_RULE);
        out.push('\n');
        for (number, cut) in block.numbered() {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                number,
                cell(&cut.place),
                character_cell(cut),
                cell(&cut.dialogue),
                cell(&cut.shot),
                cell(&cut.situation),
            ));
        }
        out.push('\n');
    }

    out.push_str("분석 완료! 소설의 모든 부분이 성공적으로 분석되었습니다.\n");
    out
}

pub fn render_allocation(allocation: &CutAllocation) -> String {
    let mut out = String::new();
    for (section, count) in allocation.iter() {
        out.push_str(&format!("{}: {}\n", section, count));
    }
    out.push_str(&format!("합계: {} / {}\n", allocation.sum(), allocation.total()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut(place: &str, count: u32, names: &[&str]) -> Cut {
        Cut {
            place: place.to_string(),
            character_count: count,
            characters: names.iter().map(|s| s.to_string()).collect(),
            dialogue: "대사 없음".to_string(),
            situation: "긴장감이\n흐른다".to_string(),
            shot: "클로즈업".to_string(),
        }
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let result = AnalysisResult::new()
            .with_section(Section::Seung, vec![cut("X", 1, &["A"])]);
        let out = render_result(&result);

        assert!(out.contains("## 승 (Cuts 1-1)"));
        assert!(!out.contains("## 기"));
        assert!(out.contains("| 1 | X | 1 (A) |"));
    }

    #[test]
    fn test_numbering_continues_between_tables() {
        let result = AnalysisResult::new()
            .with_section(Section::Gi, vec![cut("a", 0, &[]), cut("b", 0, &[])])
            .with_section(Section::Gyeol, vec![cut("c", 0, &[])]);
        let out = render_result(&result);

        assert!(out.contains("## 결 (Cuts 3-3)"));
        assert!(out.contains("| 3 | c |"));
    }

    #[test]
    fn test_large_cast_names_hidden() {
        let result = AnalysisResult::new().with_section(
            Section::Jeon,
            vec![cut("광장", 6, &["A", "B", "C", "D", "E", "F"])],
        );
        let out = render_result(&result);
        assert!(out.contains("| 1 | 광장 | 6 | "));
        assert!(!out.contains("(A, B"));
    }

    #[test]
    fn test_cells_are_single_line() {
        let result = AnalysisResult::new()
            .with_section(Section::Gi, vec![cut("a|b", 0, &[])]);
        let out = render_result(&result);
        assert!(out.contains("a\\|b"));
        assert!(out.contains("긴장감이 흐른다"));
    }

    #[test]
    fn test_allocation_summary() {
        let mut allocation = CutAllocation::default();
        allocation.set_count(Section::Gi, 25);
        let out = render_allocation(&allocation);
        assert!(out.starts_with("기: 25\n"));
        assert!(out.ends_with("합계: 85 / 80\n"));
    }

    #[test]
    fn test_report_serializes() {
        let result = AnalysisResult::new().with_section(Section::Gi, vec![cut("a", 0, &[])]);
        let allocation = CutAllocation::from_total(4);
        let report = AnalysisReport::new("gemini-2.5-flash", &allocation, &result);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["model"], "gemini-2.5-flash");
        assert_eq!(json["allocation"][0]["section"], "기");
        assert_eq!(json["result"]["기"][0]["characterCount"], 0);
    }
}
