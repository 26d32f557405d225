// ==========================================
// 进度计划健康度评估 - 评分工具函数
// ==========================================
// 职责: 百分比扣分 / 分档 / 加权平均 / 取整
// 红线: 所有得分落在 [0, 100]
// ==========================================

/// 问题项占比（百分数）；分母为 0 时视为 0%
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// 按百分点扣分: 100 - pct × penalty
pub fn ratio_penalty_score(pct: f64, penalty_per_point: f64) -> f64 {
    clamp_score(100.0 - pct * penalty_per_point)
}

/// 限制到 [0, 100]；NaN 视为 0
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// 计数分档: 0 → 100, <= 2 → 70, 其余 40
pub fn count_band_score(count: usize) -> f64 {
    match count {
        0 => 100.0,
        1..=2 => 70.0,
        _ => 40.0,
    }
}

/// 四舍五入为整数得分
pub fn round_score(score: f64) -> u32 {
    clamp_score(score).round() as u32
}

/// 加权平均（score, weight）
///
/// # 返回
/// - None: 没有任何条目
/// - 权重和为 0 时退化为算术平均
pub fn weighted_mean<I>(items: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, u32)>,
{
    let items: Vec<(f64, u32)> = items.into_iter().collect();
    if items.is_empty() {
        return None;
    }

    let total_weight: u64 = items.iter().map(|(_, w)| u64::from(*w)).sum();
    let mean = if total_weight == 0 {
        items.iter().map(|(s, _)| *s).sum::<f64>() / items.len() as f64
    } else {
        items.iter().map(|(s, w)| s * f64::from(*w)).sum::<f64>() / total_weight as f64
    };
    Some(clamp_score(mean))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_handles_empty_total() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_ratio_penalty_floors_at_zero() {
        assert_eq!(ratio_penalty_score(100.0, 5.0), 0.0);
        assert_eq!(ratio_penalty_score(2.0, 5.0), 90.0);
        assert_eq!(ratio_penalty_score(0.0, 20.0), 100.0);
    }

    #[test]
    fn test_count_band() {
        assert_eq!(count_band_score(0), 100.0);
        assert_eq!(count_band_score(2), 70.0);
        assert_eq!(count_band_score(3), 40.0);
    }

    #[test]
    fn test_weighted_mean() {
        assert_eq!(weighted_mean(Vec::new()), None);
        assert_eq!(weighted_mean(vec![(100.0, 3), (0.0, 1)]), Some(75.0));
        // 权重和为 0 → 算术平均
        assert_eq!(weighted_mean(vec![(100.0, 0), (50.0, 0)]), Some(75.0));
        // 权重为 0 的条目不影响加权结果
        assert_eq!(weighted_mean(vec![(100.0, 2), (0.0, 0)]), Some(100.0));
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(84.5), 85);
        assert_eq!(round_score(84.49), 84);
        assert_eq!(round_score(-3.0), 0);
        assert_eq!(round_score(130.0), 100);
    }
}
