// ==========================================
// 供应商问卷系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 约定: 只读取第一个工作表；第一行为表头（保留原文，仅去 BOM）；全空行跳过
// ==========================================

use crate::domain::import::{CellValue, RawRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::question_importer_trait::{FileParser, ParsedSheet};
use calamine::{open_workbook_from_rs, Data, Reader, Xls, XlsError, Xlsx, XlsxError};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

// ==========================================
// FileFormat - 受支持的文件格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xlsx,
    Xls,
    Csv,
}

impl FileFormat {
    /// 按文件名后缀判断（大小写不敏感）
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())?
            .to_lowercase();

        match ext.as_str() {
            "xlsx" => Some(FileFormat::Xlsx),
            "xls" => Some(FileFormat::Xls),
            "csv" => Some(FileFormat::Csv),
            _ => None,
        }
    }
}

// ==========================================
// ImportFile - 待导入文件（名称 + 内容）
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImportFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 从磁盘读取
    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let bytes = std::fs::read(path)?;

        Ok(Self { name, bytes })
    }

    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_file_name(&self.name)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_first_sheet(&self, bytes: &[u8]) -> ImportResult<ParsedSheet> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 读取表头（列名精确匹配依赖原文，不做 trim）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        if headers.iter().all(|h| is_blank_header(h)) {
            return Err(ImportError::EmptySheet);
        }

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: RawRow = headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !is_blank_header(header))
                .map(|(col_idx, header)| {
                    let value = record
                        .get(col_idx)
                        .map(text_cell)
                        .unwrap_or(CellValue::Empty);
                    (header.clone(), value)
                })
                .collect();

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }

            rows.push(row);
        }

        debug!(rows = rows.len(), columns = headers.len(), "CSV 解析完成");

        if rows.is_empty() {
            return Err(ImportError::NoData);
        }

        Ok(ParsedSheet {
            sheet_name: None,
            rows,
        })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    format: FileFormat,
}

impl ExcelParser {
    pub fn xlsx() -> Self {
        Self {
            format: FileFormat::Xlsx,
        }
    }

    pub fn xls() -> Self {
        Self {
            format: FileFormat::Xls,
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_first_sheet(&self, bytes: &[u8]) -> ImportResult<ParsedSheet> {
        let cursor = Cursor::new(bytes.to_vec());
        match self.format {
            FileFormat::Xls => {
                let workbook: Xls<Cursor<Vec<u8>>> = open_workbook_from_rs(cursor)
                    .map_err(|e: XlsError| ImportError::UnreadableWorkbook(e.to_string()))?;
                read_first_sheet(workbook)
            }
            _ => {
                let workbook: Xlsx<Cursor<Vec<u8>>> = open_workbook_from_rs(cursor)
                    .map_err(|e: XlsxError| ImportError::UnreadableWorkbook(e.to_string()))?;
                read_first_sheet(workbook)
            }
        }
    }
}

fn read_first_sheet<R>(mut workbook: R) -> ImportResult<ParsedSheet>
where
    R: Reader<Cursor<Vec<u8>>>,
    R::Error: std::fmt::Display,
{
    // 读取第一个 sheet
    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names.first().cloned().ok_or(ImportError::NoSheets)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::UnparsableSheet(e.to_string()))?;

    if range.is_empty() {
        return Err(ImportError::EmptySheet);
    }

    // 提取表头（第一行）
    let mut range_rows = range.rows();
    let header_row = range_rows.next().ok_or(ImportError::EmptySheet)?;
    let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();

    if headers.iter().all(|h| is_blank_header(h)) {
        return Err(ImportError::EmptySheet);
    }

    // 读取数据行
    let mut rows = Vec::new();
    for data_row in range_rows {
        let row: RawRow = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !is_blank_header(header))
            .map(|(col_idx, header)| {
                let value = data_row
                    .get(col_idx)
                    .map(excel_cell)
                    .unwrap_or(CellValue::Empty);
                (header.clone(), value)
            })
            .collect();

        // 跳过完全空白的行
        if row.is_blank() {
            continue;
        }

        rows.push(row);
    }

    debug!(sheet = %sheet_name, rows = rows.len(), "Excel 解析完成");

    if rows.is_empty() {
        return Err(ImportError::NoData);
    }

    Ok(ParsedSheet {
        sheet_name: Some(sheet_name),
        rows,
    })
}

fn is_blank_header(header: &str) -> bool {
    header.trim().is_empty()
}

fn text_cell(value: &str) -> CellValue {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

fn excel_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => text_cell(s),
        other => text_cell(&other.to_string()),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    format: FileFormat,
}

impl UniversalFileParser {
    /// 按文件名选择解析器；不支持的后缀直接报错
    pub fn for_file_name(file_name: &str) -> ImportResult<Self> {
        FileFormat::from_file_name(file_name)
            .map(|format| Self { format })
            .ok_or_else(|| ImportError::UnsupportedFormat {
                file_name: file_name.to_string(),
            })
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }
}

impl FileParser for UniversalFileParser {
    fn parse_first_sheet(&self, bytes: &[u8]) -> ImportResult<ParsedSheet> {
        match self.format {
            FileFormat::Csv => CsvParser.parse_first_sheet(bytes),
            FileFormat::Xlsx => ExcelParser::xlsx().parse_first_sheet(bytes),
            FileFormat::Xls => ExcelParser::xls().parse_first_sheet(bytes),
        }
    }
}
