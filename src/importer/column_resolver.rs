// ==========================================
// 供应商问卷系统 - 列名解析
// ==========================================
// 规则: 先精确匹配，再大小写不敏感匹配；均按行内列顺序取第一个
// 不做模糊/拼写纠错匹配
// ==========================================

use crate::domain::import::{CellValue, RawRow};

/// 在行中查找与期望表头匹配的实际表头
pub fn find_column<'a>(row: &'a RawRow, column_name: &str) -> Option<&'a str> {
    if let Some(exact) = row.headers().find(|h| *h == column_name) {
        return Some(exact);
    }

    let lower = column_name.to_lowercase();
    row.headers().find(|h| h.to_lowercase() == lower)
}

/// 按映射取单元格值；映射缺失或列不存在时返回 None
pub fn mapped_value<'a>(row: &'a RawRow, column_name: Option<&str>) -> Option<&'a CellValue> {
    let column = find_column(row, column_name?)?;
    row.get(column)
}
