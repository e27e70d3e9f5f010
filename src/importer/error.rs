// ==========================================
// 供应商问卷系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 错误消息直接展示给终端用户，保持英文原文
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误（结构性，立即终止） =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid file type. Please upload an Excel file (.xlsx, .xls) or CSV file")]
    UnsupportedFormat { file_name: String },

    #[error("File is empty")]
    EmptyFile,

    #[error("File is too large ({size} bytes). Maximum allowed size is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Error processing file: {0}")]
    FileReadError(String),

    #[error("Unable to read file. Please ensure it is a valid Excel or CSV file")]
    UnreadableWorkbook(String),

    #[error("Excel file contains no sheets")]
    NoSheets,

    #[error("Selected sheet is empty")]
    EmptySheet,

    #[error("Unable to parse sheet data. Please check the file format")]
    UnparsableSheet(String),

    #[error("No data found in the file")]
    NoData,

    #[error("Required column \"{0}\" not found in the file")]
    MissingColumn(String),

    // ===== 汇总错误（行错误 + 建议说明） =====
    #[error("Found {} issues:\n{}", .0.len(), .0.join("\n"))]
    Issues(Vec<String>),

    #[error("No valid questions found in the file")]
    NoValidQuestions,

    #[error("Import was cancelled")]
    Cancelled,

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 结构性错误：在任何行处理之前终止
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ImportError::FileNotFound(_)
                | ImportError::UnsupportedFormat { .. }
                | ImportError::EmptyFile
                | ImportError::FileTooLarge { .. }
                | ImportError::FileReadError(_)
                | ImportError::UnreadableWorkbook(_)
                | ImportError::NoSheets
                | ImportError::EmptySheet
                | ImportError::UnparsableSheet(_)
                | ImportError::NoData
                | ImportError::MissingColumn(_)
        )
    }

    /// 汇总错误中的单条问题列表
    pub fn issues(&self) -> &[String] {
        match self {
            ImportError::Issues(issues) => issues,
            _ => &[],
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::UnparsableSheet(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::UnreadableWorkbook(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
