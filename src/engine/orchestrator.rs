// ==========================================
// 进度计划健康度评估 - 评估编排器
// ==========================================
// 用途: 协调 检查项评估 → 分类聚合 → 整体评分
// 输入: UserConfig 快照 + ScheduleData 快照（只读）
// 输出: ScheduleAnalysis（除 id / 时间戳外确定性）
// ==========================================

use crate::config::user_config::UserConfig;
use crate::domain::activity::ScheduleData;
use crate::domain::analysis::{AnalysisSummary, CategoryResult, ScheduleAnalysis};
use crate::engine::aggregator::CategoryAggregator;
use crate::engine::evaluator::CriterionEvaluator;
use crate::engine::overall::OverallScorer;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// AnalysisOrchestrator - 评估编排器
// ==========================================
#[derive(Debug, Default)]
pub struct AnalysisOrchestrator {
    evaluator: CriterionEvaluator,
    aggregator: CategoryAggregator,
    scorer: OverallScorer,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self {
            evaluator: CriterionEvaluator::new(),
            aggregator: CategoryAggregator::new(),
            scorer: OverallScorer::new(),
        }
    }

    /// 执行完整评估
    ///
    /// # 参数
    /// - config: 检查项目录
    /// - data: 计划快照
    /// - name: 评估名称
    #[instrument(skip(self, config, data), fields(activities = data.activities.len()))]
    pub fn run(&self, config: &UserConfig, data: &ScheduleData, name: &str) -> ScheduleAnalysis {
        let category_results = self.evaluate_categories(config, data);

        // 整体得分: 使用四舍五入后的分类得分
        let weighted = config
            .enabled_categories()
            .zip(category_results.iter())
            .map(|(cat, result)| (result.score, cat.weight));
        let overall_score = self.scorer.score(weighted);
        let status = self.scorer.status(overall_score, &config.global_thresholds);

        let analysis = ScheduleAnalysis {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
            overall_score,
            status,
            summary: summarize(data),
            category_results,
        };

        info!(
            name = %analysis.name,
            overall_score = analysis.overall_score,
            status = %analysis.status,
            "计划健康度评估完成"
        );
        analysis
    }

    /// 仅评估分类（已启用分类,按配置顺序）
    pub fn evaluate_categories(&self, config: &UserConfig, data: &ScheduleData) -> Vec<CategoryResult> {
        config
            .enabled_categories()
            .map(|category| {
                let weighted_results = category
                    .enabled_criteria()
                    .map(|criterion| {
                        let result = self.evaluator.evaluate(
                            &criterion.id,
                            &data.activities,
                            &data.relationships,
                        );
                        debug!(
                            category = %category.id,
                            criterion = %criterion.id,
                            score = result.score,
                            count = result.count,
                            "检查项评估"
                        );
                        (result, criterion.weight)
                    })
                    .collect();
                self.aggregator.aggregate(&category.id, weighted_results)
            })
            .collect()
    }
}

fn summarize(data: &ScheduleData) -> AnalysisSummary {
    AnalysisSummary {
        total_activities: data.activities.len(),
        total_relationships: data.relationships.len(),
        critical_activities: data.critical_count(),
        activities_with_relationships: data.linked_activity_count(),
    }
}

/// 执行完整评估（默认编排器）
pub fn run_analysis(config: &UserConfig, data: &ScheduleData, name: &str) -> ScheduleAnalysis {
    AnalysisOrchestrator::new().run(config, data, name)
}
