// ==========================================
// 供应商问卷系统 - 应用状态
// ==========================================
// 职责: 打开共享连接，组装仓储、配置与 API 实例
// ==========================================

use std::sync::Arc;

use crate::api::{ApiResult, CatalogApi, ImportApi};
use crate::config::config_manager::ConfigManager;
use crate::db::open_shared_connection;
use crate::repository::{QuestionRepository, SectionRepository, TagRepository};

/// 应用状态
///
/// 所有仓储共享同一个 SQLite 连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 问题导入API
    pub import_api: Arc<ImportApi>,

    /// 目录管理API
    pub catalog_api: Arc<CatalogApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// 表结构按需创建（CREATE TABLE IF NOT EXISTS）
    pub fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_shared_connection(&db_path)?;

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let tag_repo = Arc::new(TagRepository::from_connection(conn.clone())?);
        let section_repo = Arc::new(SectionRepository::from_connection(conn.clone())?);
        let question_repo = Arc::new(QuestionRepository::from_connection(conn.clone())?);
        let config_manager = Arc::new(ConfigManager::from_connection(conn)?);

        // ==========================================
        // 创建API实例
        // ==========================================
        let import_api = Arc::new(ImportApi::new(
            tag_repo.clone(),
            section_repo.clone(),
            question_repo.clone(),
            config_manager.clone(),
        ));
        let catalog_api = Arc::new(CatalogApi::new(tag_repo, section_repo, question_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            config_manager,
            import_api,
            catalog_api,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_on_fresh_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("questionnaire.db");

        let state = AppState::new(db_path.to_string_lossy().to_string()).unwrap();

        assert!(state.catalog_api.list_tags().unwrap().is_empty());
        assert!(state.catalog_api.list_questions().unwrap().is_empty());
    }
}
