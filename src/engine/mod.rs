// ==========================================
// 进度计划健康度评估 - 引擎层
// ==========================================
// 职责: 检查项评估 / 分类聚合 / 整体评分
// 红线: 纯计算,不读写文件,不持有全局状态
// ==========================================

pub mod aggregator;
pub mod criteria;
pub mod evaluator;
pub mod orchestrator;
pub mod overall;
pub mod scoring;

// 重导出核心引擎
pub use aggregator::CategoryAggregator;
pub use criteria::CriterionId;
pub use evaluator::{evaluate, CriterionEvaluator, CriterionFn, CriterionOutcome};
pub use orchestrator::{run_analysis, AnalysisOrchestrator};
pub use overall::OverallScorer;
