// ==========================================
// 进度计划健康度评估 - 领域模型层
// ==========================================
// 职责: 定义计划数据、评估结果与枚举类型
// 红线: 不含解析逻辑,不含评分逻辑
// ==========================================

pub mod activity;
pub mod analysis;
pub mod sample;
pub mod types;

// 重导出核心类型
pub use activity::{Activity, Calendar, Relationship, ScheduleData};
pub use analysis::{
    AnalysisResult, AnalysisStats, AnalysisSummary, CategoryResult, ScheduleAnalysis,
    MAX_DETAILS,
};
pub use sample::sample_schedule_data;
pub use types::{ConstraintType, CriterionStatus, HealthStatus, LogicType};
