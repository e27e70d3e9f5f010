// ==========================================
// 供应商问卷系统 - 导入领域模型
// ==========================================
// 职责: 原始行 / 列映射 / 文件理解 / 诊断信息 / 导入结果
// 生命周期: 只在一次导入运行内存在，不落库
// ==========================================

use crate::domain::question::Question;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// CellValue - 原始单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// 单元格的文本表示；空单元格与空字符串均视为缺失
    pub fn text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Empty => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text().map(|s| s.trim().is_empty()).unwrap_or(true)
    }
}

// ==========================================
// RawRow - 原始行（表头 → 单元格，保持列顺序）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一列；表头重复时保留第一次出现的列
    pub fn push(&mut self, header: impl Into<String>, value: CellValue) {
        let header = header.into();
        if self.cells.iter().any(|(h, _)| *h == header) {
            return;
        }
        self.cells.push((header, value));
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 所有单元格均为空
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }
}

impl<H: Into<String>> FromIterator<(H, CellValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (H, CellValue)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (header, value) in iter {
            row.push(header, value);
        }
        row
    }
}

// ==========================================
// ColumnMapping - 语义字段 → 表头
// ==========================================
// question 必填，其余字段缺省表示"该语义不从文件读取"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub question: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            question: "Question".to_string(),
            question_type: Some("Type".to_string()),
            required: Some("Required".to_string()),
            options: Some("Options".to_string()),
            tags: Some("Tags".to_string()),
            section: Some("Section".to_string()),
        }
    }
}

// ==========================================
// FileUnderstanding - 外部给出的文件理解
// ==========================================
// 由对话步骤产生，导入核心只消费 column_mappings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUnderstanding {
    pub column_mappings: ColumnMapping,
    #[serde(default)]
    pub special_instructions: Vec<String>,
}

// ==========================================
// SuggestionSet - 新名称建议（去重，保持首次出现顺序）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl SuggestionSet {
    /// 按原样（区分大小写）记录；重复名称忽略
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ==========================================
// ImportDiagnostics - 导入诊断
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ImportDiagnostics {
    pub row_errors: Vec<String>,
    pub suggested_tags: SuggestionSet,
    pub suggested_sections: SuggestionSet,
}

impl ImportDiagnostics {
    /// 行错误 + 建议汇总说明，按固定顺序输出
    pub fn issues(&self) -> Vec<String> {
        let mut issues = self.row_errors.clone();

        if !self.suggested_tags.is_empty() {
            issues.push(format!(
                "Note: Found potential new tags: {}. Consider creating these tags first.",
                self.suggested_tags.names().join(", ")
            ));
        }

        if !self.suggested_sections.is_empty() {
            issues.push(format!(
                "Note: Found potential new sections: {}. Consider creating these sections first.",
                self.suggested_sections.names().join(", ")
            ));
        }

        issues
    }

    pub fn has_issues(&self) -> bool {
        !self.row_errors.is_empty()
            || !self.suggested_tags.is_empty()
            || !self.suggested_sections.is_empty()
    }
}

// ==========================================
// ImportSummary / ImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub file_name: String,
    pub sheet_name: Option<String>,
    pub total_rows: usize,
    pub accepted: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub questions: Vec<Question>,
    pub summary: ImportSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_keeps_first_duplicate_header() {
        let mut row = RawRow::new();
        row.push("Question", CellValue::Text("A".to_string()));
        row.push("Question", CellValue::Text("B".to_string()));

        assert_eq!(row.len(), 1);
        assert_eq!(row.get("Question"), Some(&CellValue::Text("A".to_string())));
    }

    #[test]
    fn test_cell_value_text() {
        assert_eq!(CellValue::Empty.text(), None);
        assert_eq!(CellValue::Text(String::new()).text(), None);
        assert_eq!(CellValue::Bool(false).text(), Some("false".to_string()));
        assert!(CellValue::Text("   ".to_string()).is_blank());
    }

    #[test]
    fn test_suggestion_set_dedup_case_sensitive() {
        let mut set = SuggestionSet::default();
        assert!(set.insert("BrandNew"));
        assert!(!set.insert("BrandNew"));
        assert!(set.insert("brandnew"));
        assert_eq!(set.names(), &["BrandNew".to_string(), "brandnew".to_string()]);
    }

    #[test]
    fn test_understanding_deserializes_partial_mapping() {
        let json = r#"{"columnMappings":{"question":"Prompt","type":"Kind"}}"#;
        let understanding: FileUnderstanding = serde_json::from_str(json).unwrap();

        assert_eq!(understanding.column_mappings.question, "Prompt");
        assert_eq!(understanding.column_mappings.question_type.as_deref(), Some("Kind"));
        assert_eq!(understanding.column_mappings.tags, None);
        assert!(understanding.special_instructions.is_empty());
    }

    #[test]
    fn test_diagnostics_issue_order() {
        let mut diagnostics = ImportDiagnostics::default();
        diagnostics.row_errors.push("Row 1: Empty question text".to_string());
        diagnostics.suggested_sections.insert("Intro");
        diagnostics.suggested_tags.insert("X");
        diagnostics.suggested_tags.insert("Y");

        let issues = diagnostics.issues();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0], "Row 1: Empty question text");
        assert_eq!(
            issues[1],
            "Note: Found potential new tags: X, Y. Consider creating these tags first."
        );
        assert!(issues[2].contains("potential new sections: Intro"));
    }
}
