// ==========================================
// 供应商问卷系统 - 问题仓储
// ==========================================
// 职责: 管理 question 表（导入结果落库、查询）
// 红线: 批量写入单事务，全有或全无
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::question::Question;
use crate::domain::types::QuestionType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, Transaction};
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

pub struct QuestionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl QuestionRepository {
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

    /// 确保表存在
    ///
    /// tags / options 以 JSON 数组存储
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS question (
              question_id TEXT PRIMARY KEY,
              text TEXT NOT NULL,
              question_type TEXT NOT NULL,
              tags_json TEXT NOT NULL DEFAULT '[]',
              options_json TEXT,
              required INTEGER NOT NULL DEFAULT 1,
              section_id TEXT,
              sort_order INTEGER NOT NULL,
              created_at TEXT NOT NULL,
              updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_question_section
              ON question(section_id);
            "#,
        )?;
        Ok(())
    }

    /// 批量写入导入结果（单事务）
    ///
    /// - 占位 id 替换为 UUID
    /// - order 追加在已有问题之后，保持批内相对顺序
    ///
    /// # 返回
    /// 新分配的 id，顺序与入参一致
    pub fn insert_batch(&self, questions: &[Question]) -> RepositoryResult<Vec<String>> {
        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let ids = Self::insert_batch_tx(&tx, questions)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(count = ids.len(), "问题批量写入完成");
        Ok(ids)
    }

    fn insert_batch_tx(tx: &Transaction<'_>, questions: &[Question]) -> RepositoryResult<Vec<String>> {
        let base_order: i64 = tx.query_row(
            "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM question",
            [],
            |row| row.get(0),
        )?;

        let mut stmt = tx.prepare(
            r#"
            INSERT INTO question (
                question_id, text, question_type, tags_json, options_json,
                required, section_id, sort_order, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )?;

        let mut ids = Vec::with_capacity(questions.len());
        for question in questions {
            if question.text.trim().is_empty() {
                return Err(RepositoryError::ValidationError(
                    "问题文本不能为空".to_string(),
                ));
            }
            if !question.has_valid_options() {
                return Err(RepositoryError::FieldValueError {
                    field: "options".to_string(),
                    message: format!("多选题缺少选项: {}", question.text),
                });
            }

            let id = Uuid::new_v4().to_string();
            let tags_json = serde_json::to_string(&question.tags)
                .map_err(|e| RepositoryError::Other(e.into()))?;
            let options_json = question
                .options
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(|e| RepositoryError::Other(e.into()))?;

            stmt.execute(params![
                id,
                question.text,
                question.question_type.as_str(),
                tags_json,
                options_json,
                question.required,
                question.section_id,
                base_order + question.order,
                question.created_at,
                question.updated_at,
            ])?;
            ids.push(id);
        }

        Ok(ids)
    }

    /// 查询全部问题（按 order 升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Question>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT question_id, text, question_type, tags_json, options_json,
                   required, section_id, sort_order, created_at, updated_at
            FROM question
            ORDER BY sort_order ASC
            "#,
        )?;

        let questions = stmt
            .query_map([], map_question_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(questions)
    }

    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM question", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn map_question_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    let type_str: String = row.get(2)?;
    let question_type = type_str.parse::<QuestionType>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into())
    })?;

    let tags_json: String = row.get(3)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    let options_json: Option<String> = row.get(4)?;
    let options = options_json
        .map(|json| serde_json::from_str::<Vec<String>>(&json))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    let created_at: DateTime<Utc> = row.get(8)?;
    let updated_at: DateTime<Utc> = row.get(9)?;

    Ok(Question {
        id: row.get(0)?,
        text: row.get(1)?,
        question_type,
        tags,
        options,
        required: row.get(5)?,
        section_id: row.get(6)?,
        order: row.get(7)?,
        created_at,
        updated_at,
    })
}
