// ==========================================
// 进度计划健康度评估 - 检查项评估引擎
// ==========================================
// 职责: 按检查项 ID 分派到纯函数,输出 AnalysisResult
// 输入: 作业列表 + 逻辑关系列表（只读）
// 红线: 无副作用,未知 ID 返回中性结果（100 分）
// ==========================================
// 状态固定按 90/70 分档,不读取检查项配置的 threshold
// ==========================================

use crate::domain::activity::{Activity, Relationship};
use crate::domain::analysis::{AnalysisResult, MAX_DETAILS};
use crate::domain::types::{CriterionStatus, LogicType};
use crate::engine::criteria::CriterionId;
use crate::engine::scoring::{
    clamp_score, count_band_score, percentage, ratio_penalty_score,
};
use crate::i18n::{t, t_with_args};
use std::collections::{HashMap, HashSet};

/// 延时超过该天数视为过长
pub const EXCESSIVE_LAG_DAYS: f64 = 30.0;
/// 工期超过该天数视为过长
pub const EXCESSIVE_DURATION_DAYS: f64 = 40.0;
/// 工期超过正工期均值的该倍数视为异常
pub const UNUSUAL_DURATION_FACTOR: f64 = 3.0;

// ==========================================
// CriterionOutcome - 单项评估原始产出
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionOutcome {
    pub score: f64,
    pub message: String,
    pub details: Vec<String>,
    pub count: usize,
}

impl CriterionOutcome {
    fn new(score: f64, message: String) -> Self {
        Self {
            score,
            message,
            details: Vec::new(),
            count: 0,
        }
    }

    fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    fn with_details<I: IntoIterator<Item = String>>(mut self, details: I) -> Self {
        self.details = details.into_iter().take(MAX_DETAILS).collect();
        self
    }
}

/// 检查项函数签名
pub type CriterionFn = fn(&[Activity], &[Relationship]) -> CriterionOutcome;

// ==========================================
// CriterionEvaluator - 检查项评估引擎
// ==========================================
#[derive(Debug, Default)]
pub struct CriterionEvaluator {}

impl CriterionEvaluator {
    pub fn new() -> Self {
        Self {}
    }

    /// 按字符串 ID 评估（全函数,未知 ID 不报错）
    pub fn evaluate(
        &self,
        criterion_id: &str,
        activities: &[Activity],
        relationships: &[Relationship],
    ) -> AnalysisResult {
        let outcome = match criterion_id.parse::<CriterionId>() {
            Ok(id) => criterion_fn(id)(activities, relationships),
            Err(_) => {
                tracing::debug!(criterion_id, "检查项未注册,返回中性结果");
                CriterionOutcome::new(100.0, t("criteria.not_implemented"))
            }
        };
        into_result(criterion_id, outcome)
    }

    /// 按已注册标识评估
    pub fn evaluate_id(
        &self,
        id: CriterionId,
        activities: &[Activity],
        relationships: &[Relationship],
    ) -> AnalysisResult {
        into_result(id.as_str(), criterion_fn(id)(activities, relationships))
    }
}

/// 评估单个检查项（默认评估器）
pub fn evaluate(
    criterion_id: &str,
    activities: &[Activity],
    relationships: &[Relationship],
) -> AnalysisResult {
    CriterionEvaluator::new().evaluate(criterion_id, activities, relationships)
}

fn into_result(criterion_id: &str, outcome: CriterionOutcome) -> AnalysisResult {
    let score = clamp_score(outcome.score);
    AnalysisResult {
        criterion_id: criterion_id.to_string(),
        score,
        status: CriterionStatus::from_score(score),
        message: outcome.message,
        details: outcome.details,
        count: outcome.count,
    }
}

// ==========================================
// 注册表
// ==========================================
pub fn criterion_fn(id: CriterionId) -> CriterionFn {
    match id {
        CriterionId::MissingPredecessors => missing_predecessors,
        CriterionId::MissingSuccessors => missing_successors,
        CriterionId::OpenEnds => open_ends,
        CriterionId::RelationshipTypes => relationship_types,
        CriterionId::CircularRelationships => circular_relationships,
        CriterionId::RelationshipDensity => relationship_density,
        CriterionId::OutOfSequence => out_of_sequence,
        CriterionId::HardConstraints => hard_constraints,
        CriterionId::SoftConstraints => soft_constraints,
        CriterionId::NegativeLag => negative_lag,
        CriterionId::ExcessiveLag => excessive_lag,
        CriterionId::ZeroDuration => zero_duration,
        CriterionId::ExcessiveDuration => excessive_duration,
        CriterionId::UnusualDuration => unusual_duration,
        CriterionId::DurationInconsistencies => duration_inconsistencies,
        CriterionId::MissingCalendars => missing_calendars,
        CriterionId::CalendarConsistency => calendar_consistency,
        CriterionId::CriticalPathLength => critical_path_length,
        CriterionId::NegativeFloat => negative_float,
        CriterionId::MissingNames => missing_names,
        CriterionId::DuplicateIds => duplicate_ids,
        CriterionId::MissingWbs => missing_wbs,
        CriterionId::InvalidDates => invalid_dates,
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn count_message(key: &str, count: usize) -> String {
    t_with_args(key, &[("count", &count.to_string())])
}

fn name_detail(activity: &Activity) -> String {
    if activity.has_blank_name() {
        format!("{}: {}", activity.id, t("common.unnamed"))
    } else {
        format!("{}: {}", activity.id, activity.name)
    }
}

fn days_detail(id: &str, days: f64) -> String {
    format!("{}: {} {}", id, days, t("common.days"))
}

fn lag_detail(rel: &Relationship) -> String {
    format!("{} -> {}: {}", rel.predecessor, rel.successor, rel.lag)
}

/// 作业占比扣分: 分母为作业总数
fn activity_ratio<'a, F>(
    activities: &'a [Activity],
    penalty: f64,
    key: &str,
    offending: F,
) -> (Vec<&'a Activity>, CriterionOutcome)
where
    F: Fn(&Activity) -> bool,
{
    let hits: Vec<&Activity> = activities.iter().filter(|&a| offending(a)).collect();
    let pct = percentage(hits.len(), activities.len());
    let outcome = CriterionOutcome::new(
        ratio_penalty_score(pct, penalty),
        count_message(key, hits.len()),
    )
    .with_count(hits.len());
    (hits, outcome)
}

/// 关系占比扣分: 分母为关系总数
fn relationship_ratio<'a, F>(
    relationships: &'a [Relationship],
    penalty: f64,
    key: &str,
    offending: F,
) -> (Vec<&'a Relationship>, CriterionOutcome)
where
    F: Fn(&Relationship) -> bool,
{
    let hits: Vec<&Relationship> = relationships.iter().filter(|&r| offending(r)).collect();
    let pct = percentage(hits.len(), relationships.len());
    let outcome = CriterionOutcome::new(
        ratio_penalty_score(pct, penalty),
        count_message(key, hits.len()),
    )
    .with_count(hits.len());
    (hits, outcome)
}

fn with_predecessors(relationships: &[Relationship]) -> HashSet<&str> {
    relationships.iter().map(|r| r.successor.as_str()).collect()
}

fn with_successors(relationships: &[Relationship]) -> HashSet<&str> {
    relationships.iter().map(|r| r.predecessor.as_str()).collect()
}

// ==========================================
// 逻辑类检查项
// ==========================================

fn missing_predecessors(activities: &[Activity], relationships: &[Relationship]) -> CriterionOutcome {
    let linked = with_predecessors(relationships);
    let (hits, outcome) = activity_ratio(activities, 5.0, "criteria.missing_predecessors", |a| {
        a.duration > 0.0 && !linked.contains(a.id.as_str())
    });
    outcome.with_details(hits.into_iter().map(name_detail))
}

fn missing_successors(activities: &[Activity], relationships: &[Relationship]) -> CriterionOutcome {
    let linked = with_successors(relationships);
    let (hits, outcome) = activity_ratio(activities, 3.0, "criteria.missing_successors", |a| {
        a.duration > 0.0 && !linked.contains(a.id.as_str())
    });
    outcome.with_details(hits.into_iter().map(name_detail))
}

fn open_ends(activities: &[Activity], relationships: &[Relationship]) -> CriterionOutcome {
    let has_pred = with_predecessors(relationships);
    let has_succ = with_successors(relationships);
    let (hits, outcome) = activity_ratio(activities, 10.0, "criteria.open_ends", |a| {
        a.duration > 0.0 && !has_pred.contains(a.id.as_str()) && !has_succ.contains(a.id.as_str())
    });
    outcome.with_details(hits.into_iter().map(name_detail))
}

fn relationship_types(_: &[Activity], relationships: &[Relationship]) -> CriterionOutcome {
    let mut counts: HashMap<LogicType, usize> = HashMap::new();
    for rel in relationships {
        *counts.entry(rel.logic_type).or_insert(0) += 1;
    }
    let share = |lt: LogicType| {
        percentage(counts.get(&lt).copied().unwrap_or(0), relationships.len())
    };

    let fs = share(LogicType::FS);
    let score = if fs >= 80.0 {
        100.0
    } else if fs >= 60.0 {
        80.0
    } else {
        60.0
    };

    let formatted: Vec<(&str, String)> = LogicType::ALL
        .iter()
        .map(|lt| (lt.as_str(), format!("{:.1}", share(*lt))))
        .collect();
    let args: Vec<(&str, &str)> = formatted
        .iter()
        .map(|(k, v)| (*k, v.as_str()))
        .collect();
    CriterionOutcome::new(score, t_with_args("criteria.relationship_types", &args))
}

/// 互逆关系对检测（A→B 出现在前,B→A 出现在后计一次）
fn circular_relationships(_: &[Activity], relationships: &[Relationship]) -> CriterionOutcome {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut details = Vec::new();
    let mut count = 0;
    for rel in relationships {
        let forward = (rel.predecessor.as_str(), rel.successor.as_str());
        if seen.contains(&(forward.1, forward.0)) {
            count += 1;
            details.push(format!("{} <-> {}", forward.1, forward.0));
        }
        seen.insert(forward);
    }

    CriterionOutcome::new(
        count_band_score(count),
        count_message("criteria.circular_relationships", count),
    )
    .with_count(count)
    .with_details(details)
}

fn relationship_density(activities: &[Activity], relationships: &[Relationship]) -> CriterionOutcome {
    let density = if activities.is_empty() {
        0.0
    } else {
        relationships.len() as f64 / activities.len() as f64
    };
    let score = if density >= 2.0 {
        100.0
    } else if density >= 1.5 {
        85.0
    } else if density >= 1.0 {
        70.0
    } else {
        50.0
    };
    let message = t_with_args(
        "criteria.relationship_density",
        &[("density", &format!("{:.1}", density))],
    );
    CriterionOutcome::new(score, message)
}

/// 粗略判断: 有紧前作业且已开工未完成
fn out_of_sequence(activities: &[Activity], relationships: &[Relationship]) -> CriterionOutcome {
    let has_pred = with_predecessors(relationships);
    let (hits, outcome) = activity_ratio(activities, 10.0, "criteria.out_of_sequence", |a| {
        has_pred.contains(a.id.as_str()) && a.percent_complete > 0.0 && a.percent_complete < 100.0
    });
    outcome.with_details(
        hits.into_iter()
            .map(|a| format!("{}: {}%", a.id, a.percent_complete)),
    )
}

// ==========================================
// 约束类检查项
// ==========================================

fn hard_constraints(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) = activity_ratio(activities, 8.0, "criteria.hard_constraints", |a| {
        a.constraint_type.map_or(false, |c| c.is_hard())
    });
    outcome.with_details(hits.into_iter().filter_map(|a| {
        a.constraint_type.map(|c| format!("{}: {}", a.id, c))
    }))
}

fn soft_constraints(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) = activity_ratio(activities, 3.0, "criteria.soft_constraints", |a| {
        a.constraint_type.map_or(false, |c| c.is_soft())
    });
    outcome.with_details(hits.into_iter().filter_map(|a| {
        a.constraint_type.map(|c| format!("{}: {}", a.id, c))
    }))
}

// ==========================================
// 延时类检查项
// ==========================================

fn negative_lag(_: &[Activity], relationships: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) =
        relationship_ratio(relationships, 15.0, "criteria.negative_lag", |r| r.lag < 0.0);
    outcome.with_details(hits.into_iter().map(lag_detail))
}

fn excessive_lag(_: &[Activity], relationships: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) = relationship_ratio(relationships, 10.0, "criteria.excessive_lag", |r| {
        r.lag > EXCESSIVE_LAG_DAYS
    });
    outcome.with_details(hits.into_iter().map(lag_detail))
}

// ==========================================
// 工期类检查项
// ==========================================

fn zero_duration(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) =
        activity_ratio(activities, 15.0, "criteria.zero_duration", |a| a.duration == 0.0);
    outcome.with_details(hits.into_iter().map(name_detail))
}

fn excessive_duration(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) = activity_ratio(activities, 8.0, "criteria.excessive_duration", |a| {
        a.duration > EXCESSIVE_DURATION_DAYS
    });
    outcome.with_details(hits.into_iter().map(|a| days_detail(&a.id, a.duration)))
}

/// 没有正工期作业时不存在均值,不计异常
fn unusual_duration(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let positive: Vec<f64> = activities
        .iter()
        .map(|a| a.duration)
        .filter(|d| *d > 0.0)
        .collect();
    let limit = if positive.is_empty() {
        f64::INFINITY
    } else {
        positive.iter().sum::<f64>() / positive.len() as f64 * UNUSUAL_DURATION_FACTOR
    };

    let (hits, outcome) = activity_ratio(activities, 5.0, "criteria.unusual_duration", |a| {
        a.duration > limit
    });
    outcome.with_details(hits.into_iter().map(|a| days_detail(&a.id, a.duration)))
}

fn duration_inconsistencies(_: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    CriterionOutcome::new(100.0, t("criteria.duration_inconsistencies"))
}

// ==========================================
// 日历类检查项
// ==========================================

fn missing_calendars(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) = activity_ratio(activities, 15.0, "criteria.missing_calendars", |a| {
        a.calendar_id.is_empty()
    });
    outcome.with_details(hits.into_iter().map(name_detail))
}

fn calendar_consistency(_: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    CriterionOutcome::new(100.0, t("criteria.calendar_consistency"))
}

// ==========================================
// 关键路径类检查项
// ==========================================

fn critical_path_length(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let critical = activities.iter().filter(|a| a.is_critical).count();
    let pct = percentage(critical, activities.len());
    let score = if pct <= 40.0 {
        100.0
    } else if pct <= 60.0 {
        85.0
    } else if pct <= 75.0 {
        70.0
    } else {
        50.0
    };
    let message = t_with_args(
        "criteria.critical_path_length",
        &[
            ("count", &critical.to_string()),
            ("percent", &format!("{:.1}", pct)),
        ],
    );
    CriterionOutcome::new(score, message).with_count(critical)
}

fn negative_float(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) =
        activity_ratio(activities, 20.0, "criteria.negative_float", |a| a.total_float < 0.0);
    outcome.with_details(hits.into_iter().map(|a| days_detail(&a.id, a.total_float)))
}

// ==========================================
// 数据质量类检查项
// ==========================================

fn missing_names(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) =
        activity_ratio(activities, 15.0, "criteria.missing_names", |a| a.has_blank_name());
    outcome.with_details(hits.into_iter().map(|a| a.id.clone()))
}

/// 计数口径: 首次出现之后的每次重复各计一次
fn duplicate_ids(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for activity in activities {
        let n = occurrences.entry(activity.id.as_str()).or_insert(0);
        *n += 1;
        if *n == 2 {
            order.push(activity.id.as_str());
        }
    }

    let count = activities.len() - occurrences.len();
    CriterionOutcome::new(
        count_band_score(count),
        count_message("criteria.duplicate_ids", count),
    )
    .with_count(count)
    .with_details(
        order
            .into_iter()
            .map(|id| format!("{} (x{})", id, occurrences.get(id).copied().unwrap_or(0))),
    )
}

fn missing_wbs(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) = activity_ratio(activities, 8.0, "criteria.missing_wbs", |a| {
        a.wbs_code.is_empty()
    });
    outcome.with_details(hits.into_iter().map(name_detail))
}

fn invalid_dates(activities: &[Activity], _: &[Relationship]) -> CriterionOutcome {
    let (hits, outcome) = activity_ratio(activities, 15.0, "criteria.invalid_dates", |a| {
        a.start_date > a.end_date
    });
    outcome.with_details(hits.into_iter().map(|a| {
        format!(
            "{}: {} > {}",
            a.id,
            a.start_date.format("%Y-%m-%d"),
            a.end_date.format("%Y-%m-%d")
        )
    }))
}
