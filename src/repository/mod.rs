// ==========================================
// 供应商问卷系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑（行解析、名称匹配都在导入层）
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod question_repo;
pub mod section_repo;
pub mod tag_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use question_repo::QuestionRepository;
pub use section_repo::SectionRepository;
pub use tag_repo::TagRepository;
