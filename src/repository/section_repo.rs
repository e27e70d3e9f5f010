// ==========================================
// 供应商问卷系统 - 问卷分区仓储
// ==========================================
// 职责: 管理 questionnaire_section 表
// 排序: order 升序，同序按名称
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::question::{NewSection, Section};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub struct SectionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SectionRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS questionnaire_section (
              section_id TEXT PRIMARY KEY,
              name TEXT NOT NULL,
              description TEXT,
              sort_order INTEGER NOT NULL DEFAULT 0,
              created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE UNIQUE INDEX IF NOT EXISTS ux_questionnaire_section_name
              ON questionnaire_section(name COLLATE NOCASE);
            "#,
        )?;
        Ok(())
    }

    /// 创建分区（分配 UUID）
    pub fn insert(&self, section: &NewSection) -> RepositoryResult<Section> {
        let name = section.name.trim();
        if name.is_empty() {
            return Err(RepositoryError::ValidationError(
                "分区名称不能为空".to_string(),
            ));
        }
        if section.order < 0 {
            return Err(RepositoryError::FieldValueError {
                field: "order".to_string(),
                message: format!("排序值不能为负数: {}", section.order),
            });
        }

        let entity = Section {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: section
                .description
                .clone()
                .filter(|d| !d.trim().is_empty()),
            order: section.order,
        };

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO questionnaire_section (section_id, name, description, sort_order)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![entity.id, entity.name, entity.description, entity.order],
        )?;

        Ok(entity)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<Section>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT section_id, name, description, sort_order
            FROM questionnaire_section
            ORDER BY sort_order ASC, name COLLATE NOCASE
            "#,
        )?;

        let sections = stmt
            .query_map([], map_section_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sections)
    }

    pub fn find_by_id(&self, section_id: &str) -> RepositoryResult<Option<Section>> {
        let conn = self.get_conn()?;
        let section = conn
            .query_row(
                r#"
                SELECT section_id, name, description, sort_order
                FROM questionnaire_section
                WHERE section_id = ?1
                "#,
                params![section_id],
                map_section_row,
            )
            .optional()?;
        Ok(section)
    }
}

fn map_section_row(row: &Row<'_>) -> rusqlite::Result<Section> {
    Ok(Section {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        order: row.get(3)?,
    })
}
