// ==========================================
// 供应商问卷系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + calamine/csv
// 系统定位: 问卷问题表格导入与规范化（全有或全无）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 表格文件 → 问题
pub mod importer;

// 配置层 - 导入配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::QuestionType;

// 领域实体
pub use domain::{ColumnMapping, FileUnderstanding, ImportOutcome, Question, Section, Tag};

// 导入器
pub use importer::{ImportError, QuestionImporter};

// API
pub use api::{CatalogApi, ImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "供应商问卷导入";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
