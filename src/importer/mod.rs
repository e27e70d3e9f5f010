// ==========================================
// 供应商问卷系统 - 导入层
// ==========================================
// 职责: 表格文件 → 经过校验的问题列表
// 支持: Excel (.xlsx/.xls), CSV
// 红线: 导入层不落库，落库由调用方在导入成功后执行
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod error;
pub mod field_classifier;
pub mod file_parser;
pub mod progress;
pub mod question_importer;
pub mod question_importer_trait;
pub mod reference_resolver;
pub mod row_pipeline;
pub mod template;

// 重导出核心类型
pub use column_resolver::find_column;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileFormat, ImportFile, UniversalFileParser};
pub use progress::{CancellationToken, NoopProgress, ProgressSink};
pub use question_importer::QuestionImporter;
pub use reference_resolver::{ReferenceResolver, SectionCursor};
pub use row_pipeline::{RowOutcome, RowPipeline};

// 重导出 Trait 接口
pub use question_importer_trait::{FileParser, ParsedSheet};
