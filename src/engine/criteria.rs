// ==========================================
// 进度计划健康度评估 - 检查项注册表
// ==========================================
// 职责: 检查项标识 ↔ 字符串 ID 的双向映射
// 说明: 未注册的 ID 不报错,由评估器返回中性结果
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// CriterionId - 检查项标识
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionId {
    // ===== 逻辑 =====
    MissingPredecessors,
    MissingSuccessors,
    OpenEnds,
    RelationshipTypes,
    CircularRelationships,
    RelationshipDensity,
    OutOfSequence,

    // ===== 约束 =====
    HardConstraints,
    SoftConstraints,

    // ===== 延时 =====
    NegativeLag,
    ExcessiveLag,

    // ===== 工期 =====
    ZeroDuration,
    ExcessiveDuration,
    UnusualDuration,
    DurationInconsistencies,

    // ===== 日历 =====
    MissingCalendars,
    CalendarConsistency,

    // ===== 关键路径 =====
    CriticalPathLength,
    NegativeFloat,

    // ===== 数据质量 =====
    MissingNames,
    DuplicateIds,
    MissingWbs,
    InvalidDates,
}

impl CriterionId {
    pub const ALL: [CriterionId; 23] = [
        CriterionId::MissingPredecessors,
        CriterionId::MissingSuccessors,
        CriterionId::OpenEnds,
        CriterionId::RelationshipTypes,
        CriterionId::CircularRelationships,
        CriterionId::RelationshipDensity,
        CriterionId::OutOfSequence,
        CriterionId::HardConstraints,
        CriterionId::SoftConstraints,
        CriterionId::NegativeLag,
        CriterionId::ExcessiveLag,
        CriterionId::ZeroDuration,
        CriterionId::ExcessiveDuration,
        CriterionId::UnusualDuration,
        CriterionId::DurationInconsistencies,
        CriterionId::MissingCalendars,
        CriterionId::CalendarConsistency,
        CriterionId::CriticalPathLength,
        CriterionId::NegativeFloat,
        CriterionId::MissingNames,
        CriterionId::DuplicateIds,
        CriterionId::MissingWbs,
        CriterionId::InvalidDates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionId::MissingPredecessors => "missing_predecessors",
            CriterionId::MissingSuccessors => "missing_successors",
            CriterionId::OpenEnds => "open_ends",
            CriterionId::RelationshipTypes => "relationship_types",
            CriterionId::CircularRelationships => "circular_relationships",
            CriterionId::RelationshipDensity => "relationship_density",
            CriterionId::OutOfSequence => "out_of_sequence",
            CriterionId::HardConstraints => "hard_constraints",
            CriterionId::SoftConstraints => "soft_constraints",
            CriterionId::NegativeLag => "negative_lag",
            CriterionId::ExcessiveLag => "excessive_lag",
            CriterionId::ZeroDuration => "zero_duration",
            CriterionId::ExcessiveDuration => "excessive_duration",
            CriterionId::UnusualDuration => "unusual_duration",
            CriterionId::DurationInconsistencies => "duration_inconsistencies",
            CriterionId::MissingCalendars => "missing_calendars",
            CriterionId::CalendarConsistency => "calendar_consistency",
            CriterionId::CriticalPathLength => "critical_path_length",
            CriterionId::NegativeFloat => "negative_float",
            CriterionId::MissingNames => "missing_names",
            CriterionId::DuplicateIds => "duplicate_ids",
            CriterionId::MissingWbs => "missing_wbs",
            CriterionId::InvalidDates => "invalid_dates",
        }
    }

    /// 占位检查项（不做实际检查,恒为满分）
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self,
            CriterionId::CalendarConsistency | CriterionId::DurationInconsistencies
        )
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CriterionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CriterionId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("未注册的检查项: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = CriterionId::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(ids.len(), CriterionId::ALL.len());
    }

    #[test]
    fn test_from_str_matches_as_str() {
        for id in CriterionId::ALL {
            assert_eq!(id.as_str().parse::<CriterionId>().unwrap(), id);
        }
        assert!("critical_chain".parse::<CriterionId>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&CriterionId::MissingWbs).unwrap();
        assert_eq!(json, "\"missing_wbs\"");
    }
}
