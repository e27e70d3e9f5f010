// ==========================================
// 供应商问卷系统 - 问卷领域模型
// ==========================================
// 职责: 问题 / 标签 / 分区实体定义
// 用途: 导入层产出 Question，仓储层负责落库
// ==========================================

use crate::domain::types::QuestionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// NamedEntity - 按名称解析的实体
// ==========================================
// 导入时标签与分区都以 name 作为自然键匹配
pub trait NamedEntity {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

// ==========================================
// Tag - 问题标签
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String, // #RRGGBB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NamedEntity for Tag {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// 待创建的标签（id 由仓储层分配）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTag {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ==========================================
// Section - 问卷分区
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order: i64,
}

impl NamedEntity for Section {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// 待创建的分区
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSection {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: i64,
}

// ==========================================
// Question - 问卷问题
// ==========================================
// 不变量:
// - text 非空
// - question_type = MultipleChoice 时 options 非空
// - tags 只包含已解析的标签 id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String, // 导入阶段为占位 id，落库时替换
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// 多选题是否满足"必须有选项"约束
    pub fn has_valid_options(&self) -> bool {
        match self.question_type {
            QuestionType::MultipleChoice => self
                .options
                .as_ref()
                .map(|opts| !opts.is_empty())
                .unwrap_or(false),
            _ => true,
        }
    }
}
