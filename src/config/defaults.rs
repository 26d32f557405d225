// ==========================================
// 进度计划健康度评估 - 内置默认检查项目录
// ==========================================
// 7 个分类 / 23 个检查项
// 整体状态分界: excellent 90 / good 75 / fair 60
// ==========================================

use crate::config::user_config::{
    CategoryConfig, CriterionConfig, CriterionThreshold, GlobalThresholds, UserConfig,
};

// (id, 名称, 说明, 权重, warning, critical)
type CriterionSeed = (&'static str, &'static str, &'static str, u32, f64, f64);

const LOGIC: &[CriterionSeed] = &[
    ("missing_predecessors", "Missing Predecessors", "Activities with duration but no incoming relationship", 20, 5.0, 10.0),
    ("missing_successors", "Missing Successors", "Activities with duration but no outgoing relationship", 20, 5.0, 10.0),
    ("open_ends", "Open Ends", "Activities disconnected from the logic network", 20, 2.0, 5.0),
    ("relationship_types", "Relationship Types", "Share of finish-to-start relationships", 10, 80.0, 60.0),
    ("circular_relationships", "Circular Relationships", "Pairs of activities linked in both directions", 15, 1.0, 3.0),
    ("relationship_density", "Relationship Density", "Average relationships per activity", 10, 1.5, 1.0),
    ("out_of_sequence", "Out of Sequence", "In-progress activities whose predecessors may be incomplete", 5, 5.0, 10.0),
];

const CONSTRAINTS: &[CriterionSeed] = &[
    ("hard_constraints", "Hard Constraints", "Activities carrying any date constraint", 60, 5.0, 10.0),
    ("soft_constraints", "Soft Constraints", "Activities carrying start or finish constraints", 40, 10.0, 20.0),
];

const LAGS: &[CriterionSeed] = &[
    ("negative_lag", "Negative Lag", "Relationships with leads (negative lag)", 50, 1.0, 5.0),
    ("excessive_lag", "Excessive Lag", "Relationships with lag above 30 days", 50, 5.0, 10.0),
];

const DURATIONS: &[CriterionSeed] = &[
    ("zero_duration", "Zero Duration", "Activities with zero duration", 30, 5.0, 10.0),
    ("excessive_duration", "Excessive Duration", "Activities longer than 40 days", 30, 5.0, 10.0),
    ("unusual_duration", "Unusual Duration", "Activities longer than three times the mean duration", 20, 5.0, 10.0),
    ("duration_inconsistencies", "Duration Inconsistencies", "Durations inconsistent with their dates", 20, 5.0, 10.0),
];

const CALENDARS: &[CriterionSeed] = &[
    ("missing_calendars", "Missing Calendars", "Activities without a calendar assignment", 60, 1.0, 5.0),
    ("calendar_consistency", "Calendar Consistency", "Calendar usage across related activities", 40, 5.0, 10.0),
];

const CRITICAL_PATH: &[CriterionSeed] = &[
    ("critical_path_length", "Critical Path Length", "Share of activities on the critical path", 50, 40.0, 60.0),
    ("negative_float", "Negative Float", "Activities with negative total float", 50, 1.0, 5.0),
];

const DATA_QUALITY: &[CriterionSeed] = &[
    ("missing_names", "Missing Names", "Activities without a name", 25, 1.0, 5.0),
    ("duplicate_ids", "Duplicate IDs", "Activity identifiers used more than once", 30, 1.0, 3.0),
    ("missing_wbs", "Missing WBS", "Activities without a WBS code", 20, 5.0, 10.0),
    ("invalid_dates", "Invalid Dates", "Activities starting after they finish", 25, 1.0, 5.0),
];

fn category(
    id: &str,
    name: &str,
    description: &str,
    weight: u32,
    seeds: &[CriterionSeed],
) -> CategoryConfig {
    CategoryConfig {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        enabled: true,
        weight,
        criteria: seeds
            .iter()
            .map(|(id, name, description, weight, warning, critical)| CriterionConfig {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                enabled: true,
                weight: *weight,
                threshold: CriterionThreshold {
                    warning: *warning,
                    critical: *critical,
                },
            })
            .collect(),
    }
}

/// 内置默认配置（reset 恢复到此值）
pub fn default_config() -> UserConfig {
    UserConfig {
        categories: vec![
            category("logic", "Logic", "Completeness and quality of the relationship network", 25, LOGIC),
            category("constraints", "Constraints", "Use of date constraints", 10, CONSTRAINTS),
            category("lags", "Lags", "Leads and lags on relationships", 10, LAGS),
            category("durations", "Durations", "Activity duration sanity", 15, DURATIONS),
            category("calendars", "Calendars", "Calendar assignment", 10, CALENDARS),
            category("critical_path", "Critical Path", "Critical path and float", 15, CRITICAL_PATH),
            category("data_quality", "Data Quality", "Identifiers, names and dates", 15, DATA_QUALITY),
        ],
        global_thresholds: GlobalThresholds::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::criteria::CriterionId;
    use std::collections::HashSet;

    #[test]
    fn test_default_catalog_covers_every_registered_criterion() {
        let config = default_config();
        assert_eq!(config.categories.len(), 7);

        let ids: Vec<&str> = config
            .categories
            .iter()
            .flat_map(|c| c.criteria.iter().map(|k| k.id.as_str()))
            .collect();
        assert_eq!(ids.len(), 23);

        let registered: HashSet<&str> = CriterionId::ALL.iter().map(|c| c.as_str()).collect();
        let configured: HashSet<&str> = ids.into_iter().collect();
        assert_eq!(registered, configured);
    }

    #[test]
    fn test_default_category_weights() {
        let config = default_config();
        assert_eq!(config.category("logic").map(|c| c.weight), Some(25));
        assert_eq!(config.category("data_quality").map(|c| c.weight), Some(15));
        let total: u32 = config.categories.iter().map(|c| c.weight).sum();
        assert_eq!(total, 100);
        assert!(config.categories.iter().all(|c| c.enabled));
    }

    #[test]
    fn test_default_global_thresholds() {
        let t = default_config().global_thresholds;
        assert_eq!((t.excellent, t.good, t.fair), (90.0, 75.0, 60.0));
    }
}
