// ==========================================
// 供应商问卷系统 - 导入模板生成
// ==========================================
// 职责: 输出带默认表头和示例行的 CSV 模板
// ==========================================

use crate::domain::import::ColumnMapping;
use crate::importer::error::ImportResult;
use csv::Writer;
use std::io::Write;

/// 示例行: (问题, 类型, 必填, 选项, 标签, 分区)
const SAMPLE_ROWS: [[&str; 6]; 3] = [
    [
        "Do you have a quality management system?",
        "yesNo",
        "yes",
        "",
        "Quality, Management",
        "Quality Management",
    ],
    [
        "How many employees work in your quality department?",
        "multipleChoice",
        "yes",
        "1-5, 6-10, 11-20, 21+",
        "Quality, Staffing",
        "Quality Management",
    ],
    [
        "Please describe your quality control process",
        "text",
        "yes",
        "",
        "Quality, Process",
        "Quality Management",
    ],
];

/// 模板中出现的标签名称（导入前需先创建）
pub fn sample_tag_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for row in SAMPLE_ROWS.iter() {
        for name in row[4].split(',').map(str::trim) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// 模板中出现的分区名称
pub fn sample_section_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for row in SAMPLE_ROWS.iter() {
        if !names.contains(&row[5]) {
            names.push(row[5]);
        }
    }
    names
}

/// 写出 CSV 模板（表头取默认列映射）
pub fn write_csv_template<W: Write>(writer: W) -> ImportResult<()> {
    let mapping = ColumnMapping::default();
    let headers = [
        mapping.question.as_str(),
        mapping.question_type.as_deref().unwrap_or("Type"),
        mapping.required.as_deref().unwrap_or("Required"),
        mapping.options.as_deref().unwrap_or("Options"),
        mapping.tags.as_deref().unwrap_or("Tags"),
        mapping.section.as_deref().unwrap_or("Section"),
    ];

    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(headers)?;
    for row in SAMPLE_ROWS.iter() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
