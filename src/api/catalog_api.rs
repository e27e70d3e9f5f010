// ==========================================
// 供应商问卷系统 - 目录管理 API
// ==========================================
// 职责: 标签 / 分区维护与问题查询
// 用途: 用户根据导入建议先创建标签/分区，再重新导入
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::question::{NewSection, NewTag, Question, Section, Tag};
use crate::repository::{QuestionRepository, SectionRepository, TagRepository};
use std::sync::Arc;
use tracing::info;

/// 新标签默认颜色
pub const DEFAULT_TAG_COLOR: &str = "#2563EB";

pub struct CatalogApi {
    tag_repo: Arc<TagRepository>,
    section_repo: Arc<SectionRepository>,
    question_repo: Arc<QuestionRepository>,
}

impl CatalogApi {
    pub fn new(
        tag_repo: Arc<TagRepository>,
        section_repo: Arc<SectionRepository>,
        question_repo: Arc<QuestionRepository>,
    ) -> Self {
        Self {
            tag_repo,
            section_repo,
            question_repo,
        }
    }

    /// 创建标签
    ///
    /// # 返回
    /// - Err(ApiError::DuplicateName): 同名标签已存在（大小写不敏感）
    pub fn create_tag(&self, tag: NewTag) -> ApiResult<Tag> {
        if self.tag_repo.find_by_name(&tag.name)?.is_some() {
            return Err(ApiError::DuplicateName(tag.name.trim().to_string()));
        }

        let created = self.tag_repo.insert(&tag)?;
        info!(tag_id = %created.id, name = %created.name, "标签已创建");
        Ok(created)
    }

    pub fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        Ok(self.tag_repo.list_all()?)
    }

    pub fn create_section(&self, section: NewSection) -> ApiResult<Section> {
        let created = self.section_repo.insert(&section)?;
        info!(section_id = %created.id, name = %created.name, "分区已创建");
        Ok(created)
    }

    pub fn list_sections(&self) -> ApiResult<Vec<Section>> {
        Ok(self.section_repo.list_all()?)
    }

    pub fn list_questions(&self) -> ApiResult<Vec<Question>> {
        Ok(self.question_repo.list_all()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn api() -> CatalogApi {
        let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        CatalogApi::new(
            Arc::new(TagRepository::from_connection(conn.clone()).unwrap()),
            Arc::new(SectionRepository::from_connection(conn.clone()).unwrap()),
            Arc::new(QuestionRepository::from_connection(conn).unwrap()),
        )
    }

    #[test]
    fn test_create_and_list_tags() {
        let api = api();
        api.create_tag(NewTag {
            name: "Quality".to_string(),
            color: DEFAULT_TAG_COLOR.to_string(),
            description: None,
        })
        .unwrap();

        let err = api
            .create_tag(NewTag {
                name: " quality ".to_string(),
                color: DEFAULT_TAG_COLOR.to_string(),
                description: None,
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::DuplicateName(_)));
        assert_eq!(api.list_tags().unwrap().len(), 1);
    }

    #[test]
    fn test_create_section_validation_maps_to_api_error() {
        let api = api();
        let err = api
            .create_section(NewSection {
                name: String::new(),
                description: None,
                order: 0,
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert!(api.list_sections().unwrap().is_empty());
        assert!(api.list_questions().unwrap().is_empty());
    }
}
