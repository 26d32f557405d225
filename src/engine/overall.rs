// ==========================================
// 进度计划健康度评估 - 整体得分与状态
// ==========================================
// 公式: round(Σ(category.score × category.weight) / Σ(category.weight))
// 状态: 依次比较 excellent → good → fair,否则 poor
// ==========================================

use crate::config::user_config::GlobalThresholds;
use crate::domain::types::HealthStatus;
use crate::engine::scoring::round_score;

#[derive(Debug, Default)]
pub struct OverallScorer {}

impl OverallScorer {
    pub fn new() -> Self {
        Self {}
    }

    /// 整体得分
    ///
    /// # 参数
    /// - weighted_scores: 已启用分类的 (分类得分, 分类权重)
    ///
    /// # 返回
    /// - 无已启用分类或权重和为 0 时返回 100
    pub fn score<I>(&self, weighted_scores: I) -> u32
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let (weighted_sum, total_weight) = weighted_scores.into_iter().fold(
            (0.0_f64, 0_u64),
            |(sum, total), (score, weight)| {
                (
                    sum + f64::from(score) * f64::from(weight),
                    total + u64::from(weight),
                )
            },
        );

        if total_weight == 0 {
            return 100;
        }
        round_score(weighted_sum / total_weight as f64)
    }

    /// 整体状态（不校验阈值大小顺序）
    pub fn status(&self, score: u32, thresholds: &GlobalThresholds) -> HealthStatus {
        let score = f64::from(score);
        if score >= thresholds.excellent {
            HealthStatus::Excellent
        } else if score >= thresholds.good {
            HealthStatus::Good
        } else if score >= thresholds.fair {
            HealthStatus::Fair
        } else {
            HealthStatus::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_weighted_score() {
        let scorer = OverallScorer::new();
        assert_eq!(scorer.score(vec![(100, 25), (60, 15)]), 85);
        assert_eq!(scorer.score(Vec::new()), 100);
        assert_eq!(scorer.score(vec![(40, 0)]), 100);
    }

    #[test]
    fn test_status_with_default_thresholds() {
        let scorer = OverallScorer::new();
        let t = GlobalThresholds::default();
        assert_eq!(scorer.status(90, &t), HealthStatus::Excellent);
        assert_eq!(scorer.status(89, &t), HealthStatus::Good);
        assert_eq!(scorer.status(75, &t), HealthStatus::Good);
        assert_eq!(scorer.status(60, &t), HealthStatus::Fair);
        assert_eq!(scorer.status(59, &t), HealthStatus::Poor);
    }

    #[test]
    fn test_unordered_thresholds_are_applied_sequentially() {
        let scorer = OverallScorer::new();
        // good > excellent 时不重排,85 同时低于两者 → fair
        let t = GlobalThresholds {
            excellent: 90.0,
            good: 95.0,
            fair: 60.0,
        };
        assert_eq!(scorer.status(85, &t), HealthStatus::Fair);
        assert_eq!(scorer.status(92, &t), HealthStatus::Excellent);
    }
}
