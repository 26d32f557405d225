// ==========================================
// 进度计划健康度评估 - 计划导入 Trait
// ==========================================
// 职责: 定义计划导入接口（不包含实现）
// ==========================================

use crate::domain::activity::ScheduleData;
use crate::importer::data_cleaner::FieldDefects;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::ScheduleFormat;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::path::Path;

// ==========================================
// ScheduleImporter Trait
// ==========================================
// 用途: 文件级导入主接口（读取文件 + 识别格式 + 解析）
// 实现者: ScheduleImporterImpl
#[async_trait]
pub trait ScheduleImporter: Send + Sync {
    /// 从文件导入计划数据
    ///
    /// # 参数
    /// - file_path: .xer / .xml 文件路径（按扩展名识别格式）
    ///
    /// # 返回
    /// - Ok(ScheduleData): 计划快照
    /// - Err: 文件不存在、格式不支持、内容无法解析
    async fn import_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<ScheduleData>;

    /// 批量导入多个文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件的导入是独立的,互不影响
    /// - 某个文件失败不影响其他文件,结果顺序与输入一致
    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<ImportResult<ScheduleData>>;
}

// ==========================================
// ScheduleParser Trait
// ==========================================
// 用途: 内容解析接口（文本 → ScheduleData）
// 实现者: XerParser, ProjectXmlParser
pub trait ScheduleParser: Send + Sync {
    /// 解析器对应的文件格式
    fn format(&self) -> ScheduleFormat;

    /// 解析文本内容,同时返回字段兜底计数
    ///
    /// # 返回
    /// - Ok((ScheduleData, FieldDefects)): 解析结果（字段缺陷已兜底）
    /// - Err: 内容结构无法识别（整文件拒绝,不做部分加载）
    fn parse_with_defects(&self, content: &str) -> ImportResult<(ScheduleData, FieldDefects)>;

    /// 解析文本内容（字段缺陷按文件汇总输出 warn 日志）
    fn parse(&self, content: &str) -> ImportResult<ScheduleData> {
        let (data, defects) = self.parse_with_defects(content)?;
        defects.log_summary(self.format());
        Ok(data)
    }

    /// 设置日期缺失时使用的兜底时间（默认: 当前时间）
    fn with_fallback_time(self, fallback: NaiveDateTime) -> Self
    where
        Self: Sized;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 字段清洗接口
// 实现者: data_cleaner::DataCleaner（importer 模块以 DataCleanerImpl 名称重导出）
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM）
    fn clean_text(&self, value: &str) -> String;

    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null<'a>(&self, value: Option<&'a str>) -> Option<&'a str>;

    /// 解析数值（非数值 / NaN / 无穷 → None）
    fn parse_number(&self, value: &str) -> Option<f64>;

    /// 解析日期时间（多种常见格式,仅日期时取 00:00）
    fn parse_datetime(&self, value: &str) -> Option<NaiveDateTime>;
}
