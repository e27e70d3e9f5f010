// ==========================================
// 供应商问卷系统 - API 层
// ==========================================
// 职责: 组合配置、仓储与导入器，供 CLI 调用
// ==========================================

pub mod catalog_api;
pub mod error;
pub mod import_api;

// 重导出核心类型
pub use catalog_api::{CatalogApi, DEFAULT_TAG_COLOR};
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse, ImportOptions};
