// ==========================================
// 进度计划健康度评估 - API 层
// ==========================================
// 职责: 面向外部界面层 / 批处理的引擎接口
// 红线: 不含评分规则,只做编排与状态持有
// ==========================================

pub mod analysis_api;
pub mod error;

pub use analysis_api::AnalysisSession;
pub use error::{ApiError, ApiResult};
