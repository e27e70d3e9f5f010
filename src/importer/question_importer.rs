// ==========================================
// 供应商问卷系统 - 问题导入协调器
// ==========================================
// 流程: 文件校验 → 解析首个工作表 → 解析问题列 → 逐行管道 → 汇总 → 全有或全无判定
// 红线: 任何问题（含新标签/新分区建议）都会使整次导入失败，不返回部分结果
// ==========================================

use crate::domain::import::{ColumnMapping, FileUnderstanding, ImportOutcome, ImportSummary};
use crate::domain::question::{Section, Tag};
use crate::importer::column_resolver::find_column;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{ImportFile, UniversalFileParser};
use crate::importer::progress::{CancellationToken, ProgressSink};
use crate::importer::question_importer_trait::FileParser;
use crate::importer::row_pipeline::{RowOutcome, RowPipeline};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

// ==========================================
// QuestionImporter - 导入协调器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct QuestionImporter {
    // 未提供文件理解时使用的列映射
    default_mapping: ColumnMapping,

    cancellation: Option<CancellationToken>,
}

impl QuestionImporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.default_mapping = mapping;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// 导入问题文件
    ///
    /// # 参数
    /// - file: 文件名 + 内容
    /// - known_tags / known_sections: 已有实体快照（只读）
    /// - progress: 进度回调（每行一次，0–100）
    /// - understanding: 外部给出的列映射；提供时整体替换默认映射
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 全部行均有效且无任何建议
    /// - Err(ImportError): 结构性错误 / 汇总问题 / 无有效问题 / 已取消
    #[instrument(skip_all, fields(file = %file.name, size = file.len()))]
    pub fn import(
        &self,
        file: &ImportFile,
        known_tags: &[Tag],
        known_sections: &[Section],
        progress: &dyn ProgressSink,
        understanding: Option<&FileUnderstanding>,
    ) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();

        // === 步骤 1: 文件校验 ===
        let parser = UniversalFileParser::for_file_name(&file.name)?;
        if file.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        // === 步骤 2: 解析首个工作表 ===
        let sheet = parser.parse_first_sheet(&file.bytes)?;
        let total_rows = sheet.rows.len();
        info!(total_rows, sheet = ?sheet.sheet_name, "文件解析完成");

        // === 步骤 3: 解析问题列（以首行为准） ===
        let mapping = match understanding {
            Some(u) => {
                if !u.special_instructions.is_empty() {
                    debug!(instructions = ?u.special_instructions, "忽略附加说明");
                }
                &u.column_mappings
            }
            None => &self.default_mapping,
        };

        let first_row = sheet.rows.first().ok_or(ImportError::NoData)?;
        let question_column = find_column(first_row, &mapping.question)
            .ok_or_else(|| ImportError::MissingColumn(mapping.question.clone()))?
            .to_string();
        debug!(question_column = %question_column, "问题列已解析");

        // === 步骤 4: 逐行处理 ===
        let mut pipeline = RowPipeline::new(mapping, question_column, known_tags, known_sections);
        let mut questions = Vec::with_capacity(total_rows);

        for (idx, row) in sheet.rows.iter().enumerate() {
            if self.is_cancelled() {
                warn!(processed = idx, total_rows, "导入已取消");
                return Err(ImportError::Cancelled);
            }

            if let RowOutcome::Accepted(question) = pipeline.process(idx + 1, row) {
                questions.push(question);
            }

            progress.report((idx + 1) as f64 / total_rows as f64 * 100.0);
        }

        // === 步骤 5/6: 汇总并判定 ===
        let diagnostics = pipeline.into_diagnostics();
        info!(
            accepted = questions.len(),
            row_errors = diagnostics.row_errors.len(),
            new_tags = diagnostics.suggested_tags.len(),
            new_sections = diagnostics.suggested_sections.len(),
            "行处理完成"
        );

        if diagnostics.has_issues() {
            let issues = diagnostics.issues();
            warn!(issues = issues.len(), "导入存在问题，整体拒绝");
            return Err(ImportError::Issues(issues));
        }

        // === 步骤 7: 无有效问题 ===
        if questions.is_empty() {
            return Err(ImportError::NoValidQuestions);
        }

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(accepted = questions.len(), elapsed_ms, "问题导入校验通过");

        // === 步骤 8: 按原始行序返回 ===
        Ok(ImportOutcome {
            summary: ImportSummary {
                file_name: file.name.clone(),
                sheet_name: sheet.sheet_name,
                total_rows,
                accepted: questions.len(),
                elapsed_ms,
            },
            questions,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(CancellationToken::is_cancelled)
            .unwrap_or(false)
    }
}
