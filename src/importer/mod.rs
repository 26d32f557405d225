// ==========================================
// 进度计划健康度评估 - 导入层
// ==========================================
// 职责: 外部计划文件 → 规范化 ScheduleData
// 支持: XER, Project XML
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod project_xml_parser;
pub mod schedule_importer_impl;
pub mod schedule_importer_trait;
pub mod xer_parser;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use file_parser::{parse, parse_bytes, ScheduleFormat, UniversalScheduleParser};
pub use project_xml_parser::ProjectXmlParser;
pub use schedule_importer_impl::ScheduleImporterImpl;
pub use xer_parser::{XerParser, HOURS_PER_DAY};

// 重导出 Trait 接口
pub use schedule_importer_trait::{DataCleaner, ScheduleImporter, ScheduleParser};
