// ==========================================
// 供应商问卷系统 - 行处理管道
// ==========================================
// 流程(每行): 问题文本 → 标签 → 分区 → 类型/必填/选项 → 多选约束 → 组装
// 终态: Accepted / Rejected
// 状态: order 计数与当前分区在整个文件内累积（只对接受的行递增 order）
// ==========================================

use crate::domain::import::{ColumnMapping, ImportDiagnostics, RawRow};
use crate::domain::question::{Question, Section, Tag};
use crate::domain::types::QuestionType;
use crate::importer::column_resolver::mapped_value;
use crate::importer::field_classifier::{
    classify_required, classify_type, question_text, section_name, split_list,
};
use crate::importer::reference_resolver::{ReferenceResolver, SectionCursor};
use chrono::Utc;
use tracing::debug;

/// 单行处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(Question),
    Rejected(String),
}

impl RowOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RowOutcome::Accepted(_))
    }
}

pub struct RowPipeline<'a> {
    mapping: &'a ColumnMapping,
    question_column: String,
    tags: ReferenceResolver<'a, Tag>,
    sections: ReferenceResolver<'a, Section>,
    section_cursor: SectionCursor,
    next_order: i64,
    diagnostics: ImportDiagnostics,
}

impl<'a> RowPipeline<'a> {
    /// # 参数
    /// - mapping: 本次导入使用的列映射
    /// - question_column: 已在首行解析出的问题列实际表头
    /// - known_tags / known_sections: 只读快照
    pub fn new(
        mapping: &'a ColumnMapping,
        question_column: impl Into<String>,
        known_tags: &'a [Tag],
        known_sections: &'a [Section],
    ) -> Self {
        Self {
            mapping,
            question_column: question_column.into(),
            tags: ReferenceResolver::new(known_tags),
            sections: ReferenceResolver::new(known_sections),
            section_cursor: SectionCursor::new(),
            next_order: 0,
            diagnostics: ImportDiagnostics::default(),
        }
    }

    /// 处理一行；row_number 从 1 开始（不含表头）
    pub fn process(&mut self, row_number: usize, row: &RawRow) -> RowOutcome {
        let outcome = self.classify_row(row_number, row);
        if let RowOutcome::Rejected(reason) = &outcome {
            debug!(row_number, reason = %reason, "行被拒绝");
            self.diagnostics.row_errors.push(reason.clone());
        }
        outcome
    }

    fn classify_row(&mut self, row_number: usize, row: &RawRow) -> RowOutcome {
        // 1. 问题文本
        let Some(text) = question_text(row.get(&self.question_column)) else {
            return RowOutcome::Rejected(format!("Row {}: Empty question text", row_number));
        };

        // 2. 标签（未知名称只记建议，不拒绝该行）
        let tag_names = split_list(mapped_value(row, self.mapping.tags.as_deref()));
        let tag_ids = self
            .tags
            .resolve_all(&tag_names, &mut self.diagnostics.suggested_tags);

        // 3. 分区（沿用规则）
        let section = section_name(mapped_value(row, self.mapping.section.as_deref()));
        let section_id = self.section_cursor.advance(
            &self.sections,
            section.as_deref(),
            &mut self.diagnostics.suggested_sections,
        );

        // 4. 类型 / 必填 / 选项
        let question_type = classify_type(mapped_value(row, self.mapping.question_type.as_deref()));
        let required = classify_required(mapped_value(row, self.mapping.required.as_deref()));
        let options = split_list(mapped_value(row, self.mapping.options.as_deref()));

        // 5. 多选约束
        if question_type == QuestionType::MultipleChoice && options.is_empty() {
            return RowOutcome::Rejected(format!(
                "Row {}: Multiple choice question requires options",
                row_number
            ));
        }

        // 6. 组装
        let order = self.next_order;
        self.next_order += 1;
        let now = Utc::now();

        RowOutcome::Accepted(Question {
            id: format!("import-{}", row_number),
            text,
            question_type,
            tags: tag_ids,
            options: if options.is_empty() { None } else { Some(options) },
            required,
            section_id,
            order,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn diagnostics(&self) -> &ImportDiagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> ImportDiagnostics {
        self.diagnostics
    }
}
