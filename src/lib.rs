// ==========================================
// 进度计划健康度评估 - 核心库
// ==========================================
// 流程: 计划文件 → 解析 → 检查项评估 → 分类聚合 → 整体评分
// 支持格式: XER / Project XML
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 计划数据与评估结果
pub mod domain;

// 导入层 - 计划文件解析
pub mod importer;

// 引擎层 - 评分规则
pub mod engine;

// 配置层 - 检查项目录
pub mod config;

// API 层 - 分析会话
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ConstraintType, CriterionStatus, HealthStatus, LogicType};

// 领域实体
pub use domain::{
    Activity, AnalysisResult, AnalysisStats, AnalysisSummary, Calendar, CategoryResult,
    Relationship, ScheduleAnalysis, ScheduleData,
};

// 引擎入口
pub use engine::{evaluate, run_analysis, CriterionEvaluator, CriterionId};

// 导入入口
pub use importer::{parse, parse_bytes, ImportError, ScheduleFormat};

// 配置
pub use config::{ConfigStore, UserConfig};

// API
pub use api::{AnalysisSession, ApiError};

// ==========================================
// 系统常量
// ==========================================

/// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 系统名称
pub const SYSTEM_NAME: &str = "Schedule Health";
