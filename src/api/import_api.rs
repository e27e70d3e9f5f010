// ==========================================
// 供应商问卷系统 - 问题导入 API
// ==========================================
// 职责: 读取文件 → 大小限制 → 加载标签/分区快照 → 调用导入器 → （可选）落库
// 红线: 导入器在阻塞线程执行，不占用异步运行时
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfigReader;
use crate::domain::import::{FileUnderstanding, ImportOutcome, ImportSummary};
use crate::importer::{
    CancellationToken, FileFormat, ImportError, ImportFile, NoopProgress, ProgressSink,
    QuestionImporter,
};
use crate::repository::{QuestionRepository, SectionRepository, TagRepository};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 导入选项
#[derive(Clone, Default)]
pub struct ImportOptions {
    /// 外部给出的文件理解（列映射）
    pub understanding: Option<FileUnderstanding>,
    /// 进度回调
    pub progress: Option<Arc<dyn ProgressSink>>,
    /// 取消标记
    pub cancellation: Option<CancellationToken>,
}

impl ImportOptions {
    pub fn with_understanding(mut self, understanding: FileUnderstanding) -> Self {
        self.understanding = Some(understanding);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// 导入落库响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportApiResponse {
    /// 新写入问题的 id（与文件行序一致）
    pub question_ids: Vec<String>,
    pub summary: ImportSummary,
}

/// 问题导入API
pub struct ImportApi {
    tag_repo: Arc<TagRepository>,
    section_repo: Arc<SectionRepository>,
    question_repo: Arc<QuestionRepository>,
    config: Arc<dyn ImportConfigReader>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(
        tag_repo: Arc<TagRepository>,
        section_repo: Arc<SectionRepository>,
        question_repo: Arc<QuestionRepository>,
        config: Arc<dyn ImportConfigReader>,
    ) -> Self {
        Self {
            tag_repo,
            section_repo,
            question_repo,
            config,
        }
    }

    /// 预览导入（只校验不落库）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 全部通过校验的问题 + 汇总
    /// - Err(ApiError::Import): 导入错误（消息原样展示）
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn preview<P: AsRef<Path>>(
        &self,
        path: P,
        options: ImportOptions,
    ) -> ApiResult<ImportOutcome> {
        let path = path.as_ref().to_path_buf();

        // === 步骤 1: 扩展名与大小限制（读取内容之前） ===
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        if FileFormat::from_file_name(&file_name).is_none() {
            return Err(ImportError::UnsupportedFormat { file_name }.into());
        }

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|_| ImportError::FileNotFound(path.display().to_string()))?;
        let limit = self.config.get_max_file_size_bytes().await?;
        if metadata.len() > limit {
            warn!(size = metadata.len(), limit, "文件超过大小上限");
            return Err(ImportError::FileTooLarge {
                size: metadata.len(),
                limit,
            }
            .into());
        }

        // === 步骤 2: 已有实体快照 + 默认映射 ===
        let tags = self.tag_repo.list_all()?;
        let sections = self.section_repo.list_all()?;
        let mapping = self.config.get_default_column_mapping().await?;
        info!(tags = tags.len(), sections = sections.len(), "已加载标签与分区");

        // === 步骤 3: 阻塞线程执行导入 ===
        let mut importer = QuestionImporter::new().with_default_mapping(mapping);
        if let Some(token) = options.cancellation.clone() {
            importer = importer.with_cancellation(token);
        }

        let outcome = tokio::task::spawn_blocking(move || -> Result<ImportOutcome, ImportError> {
            let file = ImportFile::from_path(&path)?;
            let progress: &dyn ProgressSink = match &options.progress {
                Some(sink) => sink.as_ref(),
                None => &NoopProgress,
            };
            importer.import(
                &file,
                &tags,
                &sections,
                progress,
                options.understanding.as_ref(),
            )
        })
        .await
        .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))??;

        Ok(outcome)
    }

    /// 导入并落库
    ///
    /// 预览通过后整批写入（单事务）；任何问题都不会写入部分数据
    pub async fn import<P: AsRef<Path>>(
        &self,
        path: P,
        options: ImportOptions,
    ) -> ApiResult<ImportApiResponse> {
        let outcome = self.preview(path, options).await?;

        let question_ids = self.question_repo.insert_batch(&outcome.questions)?;
        info!(
            file = %outcome.summary.file_name,
            count = question_ids.len(),
            "导入结果已落库"
        );

        Ok(ImportApiResponse {
            question_ids,
            summary: outcome.summary,
        })
    }
}
