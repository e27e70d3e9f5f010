// ==========================================
// 供应商问卷系统 - API层错误类型
// ==========================================
// 导入错误透传（英文原文直接展示给用户）
// 仓储错误转换为面向操作者的中文消息
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// 导入被拒绝（结构性错误 / 问题汇总 / 取消）
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    /// 标签或分区重名
    #[error("名称已存在: {0}")]
    DuplicateName(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    /// 打开数据库、锁、事务、SQL、存储数据损坏
    #[error("数据库错误: {0}")]
    Database(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 导入被拒绝时的问题列表（其余错误为空）
    pub fn issues(&self) -> &[String] {
        match self {
            ApiError::Import(err) => err.issues(),
            _ => &[],
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            RepositoryError::DuplicateName(msg) => ApiError::DuplicateName(msg),
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
            RepositoryError::LockError(_)
            | RepositoryError::DatabaseTransactionError(_)
            | RepositoryError::DatabaseQueryError(_)
            | RepositoryError::CorruptColumn { .. } => ApiError::Database(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Database(format!("无法打开数据库: {}", err))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_message_passes_through() {
        let api_err: ApiError = ImportError::NoValidQuestions.into();
        assert_eq!(api_err.to_string(), "No valid questions found in the file");

        let api_err: ApiError =
            ImportError::Issues(vec!["Row 1: Empty question text".to_string()]).into();
        assert_eq!(api_err.issues().len(), 1);
    }

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::NotFound {
            entity: "分区".to_string(),
            key: "S001".to_string(),
        }
        .into();
        assert!(matches!(&api_err, ApiError::NotFound(msg) if msg.contains("S001")));

        let api_err: ApiError = RepositoryError::FieldValueError {
            field: "color".to_string(),
            message: "格式错误".to_string(),
        }
        .into();
        assert!(matches!(api_err, ApiError::InvalidInput(msg) if msg.contains("color")));

        let api_err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(api_err, ApiError::Database(_)));
    }
}
