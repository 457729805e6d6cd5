//! Scene Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 默认总镜头数
pub const DEFAULT_TOTAL_CUTS: u32 = 80;

/// 四段式叙事结构中的一段（기/승/전/결）
///
/// 顺序固定，分配、编号、渲染均按 [`SECTIONS`] 迭代，不依赖 map 的遍历顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "기")]
    Gi,
    #[serde(rename = "승")]
    Seung,
    #[serde(rename = "전")]
    Jeon,
    #[serde(rename = "결")]
    Gyeol,
}

/// 固定顺序的段落列表
pub const SECTIONS: [Section; 4] = [Section::Gi, Section::Seung, Section::Jeon, Section::Gyeol];

impl Section {
    /// 响应 JSON 中使用的键
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Gi => "기",
            Section::Seung => "승",
            Section::Jeon => "전",
            Section::Gyeol => "결",
        }
    }

    /// 在 [`SECTIONS`] 中的位置
    pub fn index(&self) -> usize {
        match self {
            Section::Gi => 0,
            Section::Seung => 1,
            Section::Jeon => 2,
            Section::Gyeol => 3,
        }
    }

    /// 该段在叙事中的角色（写入提示词）
    pub fn description(&self) -> &'static str {
        match self {
            Section::Gi => "Introduction: Introduce characters, setting, and initial conflict.",
            Section::Seung => "Development: Escalate the conflict and develop the plot.",
            Section::Jeon => "Turn/Climax: The turning point or climax of the story.",
            Section::Gyeol => "Conclusion: Resolve the conflict and conclude the story.",
        }
    }

    /// 输出 schema 中的字段描述
    pub fn schema_description(&self) -> &'static str {
        match self {
            Section::Gi => "Cuts for the Introduction part.",
            Section::Seung => "Cuts for the Development part.",
            Section::Jeon => "Cuts for the Climax part.",
            Section::Gyeol => "Cuts for the Conclusion part.",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    /// 同时接受韩文标识和罗马字写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "기" | "gi" | "ki" => Ok(Section::Gi),
            "승" | "seung" => Ok(Section::Seung),
            "전" | "jeon" => Ok(Section::Jeon),
            "결" | "gyeol" | "kyeol" => Ok(Section::Gyeol),
            other => Err(format!("unknown section: {}", other)),
        }
    }
}

/// 镜头数分配
///
/// 不变量:
/// - 由总数重新计算后，四段之和恰好等于总数
/// - 直接编辑单段时不调整其他段，和与总数可以暂时不一致（见 [`CutAllocation::is_mismatch`]）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CutAllocation {
    total: u32,
    counts: [u32; 4],
}

impl CutAllocation {
    /// 按总数均分，余数依次分给靠前的段
    pub fn from_total(total: u32) -> Self {
        let total = total.max(1);
        let base = total / 4;
        let remainder = (total % 4) as usize;

        let mut counts = [base; 4];
        for count in counts.iter_mut().take(remainder) {
            *count += 1;
        }

        Self { total, counts }
    }

    /// 修改总数并整体重新分配
    pub fn set_total(&mut self, total: u32) {
        *self = Self::from_total(total);
    }

    /// 直接编辑单段镜头数，负数截断为 0
    pub fn set_count(&mut self, section: Section, count: i64) {
        let clamped = count.clamp(0, u32::MAX as i64) as u32;
        self.counts[section.index()] = clamped;
    }

    pub fn count(&self, section: Section) -> u32 {
        self.counts[section.index()]
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn sum(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// 四段之和与总数不一致时为 true，用于禁止提交
    pub fn is_mismatch(&self) -> bool {
        self.sum() != self.total as u64
    }

    /// 按固定顺序迭代 (段, 数量)
    pub fn iter(&self) -> impl Iterator<Item = (Section, u32)> + '_ {
        SECTIONS.iter().map(move |&s| (s, self.count(s)))
    }
}

impl Default for CutAllocation {
    fn default() -> Self {
        Self::from_total(DEFAULT_TOTAL_CUTS)
    }
}

/// 生成服务凭证
///
/// Debug 输出被遮蔽，避免出现在日志中
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// 去除首尾空白；空白凭证返回 None
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// 遮蔽显示，仅保留末尾四个字符
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allocation_is_even() {
        let allocation = CutAllocation::default();
        assert_eq!(allocation.total(), 80);
        for section in SECTIONS {
            assert_eq!(allocation.count(section), 20);
        }
        assert!(!allocation.is_mismatch());
    }

    #[test]
    fn test_remainder_goes_to_leading_sections() {
        let allocation = CutAllocation::from_total(83);
        let counts: Vec<u32> = allocation.iter().map(|(_, c)| c).collect();
        assert_eq!(counts, vec![21, 21, 21, 20]);

        let allocation = CutAllocation::from_total(2);
        let counts: Vec<u32> = allocation.iter().map(|(_, c)| c).collect();
        assert_eq!(counts, vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_recompute_always_sums_to_total() {
        for total in 1..=400 {
            let allocation = CutAllocation::from_total(total);
            assert_eq!(allocation.sum(), total as u64);
            let counts: Vec<u32> = allocation.iter().map(|(_, c)| c).collect();
            assert!(counts.windows(2).all(|w| w[0] >= w[1]), "total={}", total);
        }
    }

    #[test]
    fn test_zero_total_is_sanitized() {
        let allocation = CutAllocation::from_total(0);
        assert_eq!(allocation.total(), 1);
        assert_eq!(allocation.sum(), 1);
    }

    #[test]
    fn test_section_edit_does_not_touch_others() {
        let mut allocation = CutAllocation::default();
        allocation.set_count(Section::Jeon, 25);

        assert_eq!(allocation.count(Section::Gi), 20);
        assert_eq!(allocation.count(Section::Seung), 20);
        assert_eq!(allocation.count(Section::Jeon), 25);
        assert_eq!(allocation.count(Section::Gyeol), 20);
        assert_eq!(allocation.total(), 80);
        assert!(allocation.is_mismatch());
    }

    #[test]
    fn test_negative_edit_clamps_to_zero() {
        let mut allocation = CutAllocation::default();
        allocation.set_count(Section::Gi, -5);
        assert_eq!(allocation.count(Section::Gi), 0);
    }

    #[test]
    fn test_set_total_overrides_edits() {
        let mut allocation = CutAllocation::default();
        allocation.set_count(Section::Gi, 3);
        allocation.set_total(10);
        let counts: Vec<u32> = allocation.iter().map(|(_, c)| c).collect();
        assert_eq!(counts, vec![3, 3, 2, 2]);
        assert!(!allocation.is_mismatch());
    }

    #[test]
    fn test_section_parsing() {
        assert_eq!("승".parse::<Section>().unwrap(), Section::Seung);
        assert_eq!("GYEOL".parse::<Section>().unwrap(), Section::Gyeol);
        assert!("five".parse::<Section>().is_err());
    }

    #[test]
    fn test_credential_trims_and_redacts() {
        assert!(Credential::new("   ").is_none());
        let credential = Credential::new("  secret-key-1234 ").unwrap();
        assert_eq!(credential.expose(), "secret-key-1234");
        assert_eq!(format!("{:?}", credential), "Credential(<redacted>)");
        assert!(credential.masked().ends_with("1234"));
        assert!(!credential.masked().contains("secret"));
    }
}
