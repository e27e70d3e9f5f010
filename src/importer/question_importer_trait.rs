// ==========================================
// 供应商问卷系统 - 问题导入 Trait
// ==========================================
// 职责: 定义导入管道的可替换接口（不包含实现）
// ==========================================

use crate::domain::import::RawRow;
use crate::importer::error::ImportResult;

// ==========================================
// ParsedSheet - 工作表解析结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    /// 工作表名称（CSV 无工作表名）
    pub sheet_name: Option<String>,
    /// 数据行（不含表头，已跳过全空行）
    pub rows: Vec<RawRow>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容的第一个工作表为原始行
    ///
    /// # 参数
    /// - bytes: 文件完整内容
    ///
    /// # 返回
    /// - Ok(ParsedSheet): 至少包含一行数据
    /// - Err: 无法读取 / 无工作表 / 空表 / 无数据
    fn parse_first_sheet(&self, bytes: &[u8]) -> ImportResult<ParsedSheet>;
}
