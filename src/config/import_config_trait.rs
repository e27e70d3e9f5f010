// ==========================================
// 供应商问卷系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入 API 所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::import::ColumnMapping;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: ImportApi 读取上传限制与默认列映射
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取上传文件大小上限（字节）
    ///
    /// # 默认值
    /// - 5 MiB
    ///
    /// # 用途
    /// - 超过上限的文件在解析前直接拒绝
    async fn get_max_file_size_bytes(&self) -> RepositoryResult<u64>;

    /// 获取默认列映射（未提供文件理解时使用）
    ///
    /// # 默认值
    /// - Question / Type / Required / Options / Tags / Section
    ///
    /// # 说明
    /// 配置格式为 ColumnMapping 的 JSON（camelCase）；格式错误时回退默认值
    async fn get_default_column_mapping(&self) -> RepositoryResult<ColumnMapping>;
}
