// ==========================================
// 供应商问卷系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含导入逻辑
// ==========================================

pub mod import;
pub mod question;
pub mod types;

// 重导出核心类型
pub use import::{
    CellValue, ColumnMapping, FileUnderstanding, ImportDiagnostics, ImportOutcome, ImportSummary,
    RawRow, SuggestionSet,
};
pub use question::{NamedEntity, NewSection, NewTag, Question, Section, Tag};
pub use types::QuestionType;
