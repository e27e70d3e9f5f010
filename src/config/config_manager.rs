// ==========================================
// 供应商问卷系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope，目前只用 global)
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::import::ColumnMapping;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 默认上传大小上限: 5 MiB
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 传入连接会重新应用统一 PRAGMA（幂等），并确保 config_kv 表存在
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&conn_guard)?;
            conn_guard.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS config_kv (
                  scope_id TEXT NOT NULL DEFAULT 'global',
                  key TEXT NOT NULL,
                  value TEXT NOT NULL,
                  updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                  PRIMARY KEY (scope_id, key)
                );
                "#,
            )?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global 配置（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

// ==========================================
// ImportConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_max_file_size_bytes(&self) -> RepositoryResult<u64> {
        let value = self.get_global_config_value(config_keys::MAX_FILE_SIZE_BYTES)?;
        Ok(value
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&limit| limit > 0)
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_BYTES))
    }

    async fn get_default_column_mapping(&self) -> RepositoryResult<ColumnMapping> {
        let Some(value) = self.get_global_config_value(config_keys::DEFAULT_COLUMN_MAPPING)? else {
            return Ok(ColumnMapping::default());
        };

        let mapping = serde_json::from_str::<ColumnMapping>(&value).unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::DEFAULT_COLUMN_MAPPING,
                raw_value = %value,
                "默认列映射配置格式错误，使用内置映射"
            );
            ColumnMapping::default()
        });
        Ok(mapping)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 上传
    pub const MAX_FILE_SIZE_BYTES: &str = "import.max_file_size_bytes";

    // 列映射 (JSON)
    pub const DEFAULT_COLUMN_MAPPING: &str = "import.default_column_mapping";
}
