// ==========================================
// 供应商问卷系统 - 问题标签仓储
// ==========================================
// 职责: 管理 question_tag 表
// 约束: 名称大小写不敏感唯一（导入按名称解析）
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::question::{NewTag, Tag};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub struct TagRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TagRepository {
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

    /// 确保表存在（如果不存在则创建）
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS question_tag (
              tag_id TEXT PRIMARY KEY,
              name TEXT NOT NULL,
              color TEXT NOT NULL,
              description TEXT,
              created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE UNIQUE INDEX IF NOT EXISTS ux_question_tag_name
              ON question_tag(name COLLATE NOCASE);
            "#,
        )?;
        Ok(())
    }

    /// 创建标签（分配 UUID）
    pub fn insert(&self, tag: &NewTag) -> RepositoryResult<Tag> {
        let name = tag.name.trim();
        if name.is_empty() {
            return Err(RepositoryError::ValidationError(
                "标签名称不能为空".to_string(),
            ));
        }
        if !is_hex_color(&tag.color) {
            return Err(RepositoryError::FieldValueError {
                field: "color".to_string(),
                message: format!("颜色格式错误，期望 #RRGGBB，实际 {}", tag.color),
            });
        }

        let entity = Tag {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            color: tag.color.clone(),
            description: tag.description.clone().filter(|d| !d.trim().is_empty()),
        };

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO question_tag (tag_id, name, color, description)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![entity.id, entity.name, entity.color, entity.description],
        )?;

        Ok(entity)
    }

    /// 查询全部标签（按名称排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Tag>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT tag_id, name, color, description
            FROM question_tag
            ORDER BY name COLLATE NOCASE
            "#,
        )?;

        let tags = stmt
            .query_map([], map_tag_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    /// 按名称查找（大小写不敏感）
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Tag>> {
        let conn = self.get_conn()?;
        let tag = conn
            .query_row(
                r#"
                SELECT tag_id, name, color, description
                FROM question_tag
                WHERE name = ?1 COLLATE NOCASE
                "#,
                params![name.trim()],
                map_tag_row,
            )
            .optional()?;
        Ok(tag)
    }
}

fn map_tag_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        description: row.get(3)?,
    })
}

/// #RRGGBB（大小写均可）
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> TagRepository {
        let conn = Connection::open_in_memory().unwrap();
        TagRepository::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    fn new_tag(name: &str) -> NewTag {
        NewTag {
            name: name.to_string(),
            color: "#2563EB".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_insert_and_list() {
        let repo = repo();
        repo.insert(&new_tag("Tier 2")).unwrap();
        repo.insert(&new_tag("tier 1")).unwrap();

        let tags = repo.list_all().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "tier 1");
    }

    #[test]
    fn test_duplicate_name_case_insensitive() {
        let repo = repo();
        repo.insert(&new_tag("Quality")).unwrap();

        let result = repo.insert(&new_tag("QUALITY"));
        assert!(matches!(
            result,
            Err(RepositoryError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_find_by_name() {
        let repo = repo();
        let created = repo.insert(&new_tag("Packaging Supplier Details")).unwrap();

        let found = repo.find_by_name("packaging supplier details").unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(repo.find_by_name("Missing").unwrap(), None);
    }

    #[test]
    fn test_validation() {
        let repo = repo();
        assert!(matches!(
            repo.insert(&new_tag("  ")),
            Err(RepositoryError::ValidationError(_))
        ));

        let bad_color = NewTag {
            name: "Tier 3".to_string(),
            color: "green".to_string(),
            description: None,
        };
        assert!(matches!(
            repo.insert(&bad_color),
            Err(RepositoryError::FieldValueError { .. })
        ));
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#7C3AED"));
        assert!(is_hex_color("#d97706"));
        assert!(!is_hex_color("7C3AED"));
        assert!(!is_hex_color("#7C3AE"));
        assert!(!is_hex_color("#GGGGGG"));
    }
}
