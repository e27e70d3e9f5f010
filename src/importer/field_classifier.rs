// ==========================================
// 供应商问卷系统 - 字段分类器
// ==========================================
// 职责: 原始单元格值 → 规范化领域值
// 约束: 纯函数，无隐藏状态；缺失值走默认值
// ==========================================

use crate::domain::import::CellValue;
use crate::domain::types::QuestionType;

/// 列表字段分隔符（选项 / 标签）
const LIST_SEPARATORS: [char; 3] = [',', ';', '|'];

/// 视为"非必填"的取值（小写比较）
const NOT_REQUIRED_VALUES: [&str; 4] = ["no", "false", "0", "n"];

/// 问题类型分类，按规则顺序取第一个命中
///
/// - 含 "yes" / "no"，或恰为 "yn" → YesNo
/// - 含 "multi" / "choice" → MultipleChoice
/// - 含 "scale" → Scale
/// - 其余或缺失 → Text
pub fn classify_type(value: Option<&CellValue>) -> QuestionType {
    let Some(raw) = value.and_then(CellValue::text) else {
        return QuestionType::Text;
    };
    let lower = raw.trim().to_lowercase();

    if lower.contains("yes") || lower.contains("no") || lower == "yn" {
        QuestionType::YesNo
    } else if lower.contains("multi") || lower.contains("choice") {
        QuestionType::MultipleChoice
    } else if lower.contains("scale") {
        QuestionType::Scale
    } else {
        QuestionType::Text
    }
}

/// 是否必填；默认 true，只有明确的否定值才为 false
pub fn classify_required(value: Option<&CellValue>) -> bool {
    match value.and_then(CellValue::text) {
        Some(raw) => !NOT_REQUIRED_VALUES.contains(&raw.trim().to_lowercase().as_str()),
        None => true,
    }
}

/// 按 , ; | 拆分、去空白、丢弃空项
pub fn split_list(value: Option<&CellValue>) -> Vec<String> {
    value
        .and_then(CellValue::text)
        .map(|raw| {
            raw.split(LIST_SEPARATORS)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 分区名称；空白视为未指定
pub fn section_name(value: Option<&CellValue>) -> Option<String> {
    value
        .and_then(CellValue::text)
        .map(|raw| raw.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// 问题文本；空白返回 None
pub fn question_text(value: Option<&CellValue>) -> Option<String> {
    section_name(value)
}
