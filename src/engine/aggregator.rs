// ==========================================
// 进度计划健康度评估 - 分类得分聚合
// ==========================================
// 公式: round(Σ(score × weight) / Σ(weight))
// 规则: 仅已启用检查项参与；无已启用检查项 → 100
// ==========================================

use crate::domain::analysis::{AnalysisResult, CategoryResult};
use crate::engine::scoring::{round_score, weighted_mean};

#[derive(Debug, Default)]
pub struct CategoryAggregator {}

impl CategoryAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 聚合分类得分
    ///
    /// # 参数
    /// - category_id: 分类 ID
    /// - weighted_results: 已启用检查项的 (结果, 权重)，按配置顺序
    pub fn aggregate(
        &self,
        category_id: &str,
        weighted_results: Vec<(AnalysisResult, u32)>,
    ) -> CategoryResult {
        let score = self.score(weighted_results.iter().map(|(r, w)| (r.score, *w)));
        CategoryResult {
            category_id: category_id.to_string(),
            score,
            results: weighted_results.into_iter().map(|(r, _)| r).collect(),
        }
    }

    /// 仅计算得分
    pub fn score<I>(&self, weighted_scores: I) -> u32
    where
        I: IntoIterator<Item = (f64, u32)>,
    {
        weighted_mean(weighted_scores).map_or(100, round_score)
    }
}
