// ==========================================
// 供应商问卷系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: SQLite 约束失败在此归类，上层不解析 SQLite 原始消息
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("{entity}不存在: {key}")]
    NotFound { entity: String, key: String },

    #[error("共享连接锁已失效: {0}")]
    LockError(String),

    #[error("批量写入事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error("SQL 执行失败: {0}")]
    DatabaseQueryError(String),

    /// 名称唯一索引冲突（标签/分区名称大小写不敏感）
    #[error("名称重复: {0}")]
    DuplicateName(String),

    /// 存储列无法还原为领域对象（如 tags_json 损坏）
    #[error("存储数据损坏 (column={column}): {message}")]
    CorruptColumn { column: usize, message: String },

    // ===== 写入前校验 =====
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("UNIQUE") => {
                RepositoryError::DuplicateName(msg)
            }
            rusqlite::Error::FromSqlConversionFailure(column, _, source) => {
                RepositoryError::CorruptColumn {
                    column,
                    message: source.to_string(),
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "记录".to_string(),
                key: "query_row".to_string(),
            },
            other => RepositoryError::DatabaseQueryError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
