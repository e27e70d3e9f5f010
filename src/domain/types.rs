// ==========================================
// 供应商问卷系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 问题类型 (Question Type)
// ==========================================
// 序列化格式: camelCase (与前端/文档存储一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    #[default]
    Text,           // 文本
    YesNo,          // 是/否
    MultipleChoice, // 多选
    Scale,          // 量表
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::YesNo => "yesNo",
            QuestionType::MultipleChoice => "multipleChoice",
            QuestionType::Scale => "scale",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// 仅用于读取已落库的值，不做导入时的模糊分类
impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(QuestionType::Text),
            "yesNo" => Ok(QuestionType::YesNo),
            "multipleChoice" => Ok(QuestionType::MultipleChoice),
            "scale" => Ok(QuestionType::Scale),
            other => Err(format!("未知问题类型: {}", other)),
        }
    }
}
