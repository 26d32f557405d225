// ==========================================
// 进度计划健康度评估 - 计划数据领域模型
// ==========================================
// 职责: 作业 / 逻辑关系 / 日历 / 计划快照
// 红线: 解析器创建后不可变,引擎只读
// ==========================================

use crate::domain::types::{ConstraintType, LogicType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Activity - 作业
// ==========================================
// 用途: 解析器写入,评估引擎只读
// 单位: duration / total_float 均为工作日（8 小时/天）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    // ===== 主键 =====
    pub id: String, // 作业标识（同一计划内应唯一）

    // ===== 基础信息 =====
    pub name: String,     // 作业名称
    pub wbs_code: String, // WBS 编码（空串=缺失）

    // ===== 时间信息 =====
    pub duration: f64,              // 工期（天，>=0）
    pub start_date: NaiveDateTime,  // 开始时间
    pub end_date: NaiveDateTime,    // 完成时间
    pub calendar_id: String,        // 日历引用（空串=缺失）

    // ===== 关键路径 =====
    pub is_critical: bool, // 关键作业标志（信任源文件）
    pub total_float: f64,  // 总浮时（天，可为负）

    // ===== 进度 =====
    pub percent_complete: f64, // 完成百分比（0-100）

    // ===== 约束 =====
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_type: Option<ConstraintType>,
}

impl Activity {
    /// 名称为空或仅含空白
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}

// ==========================================
// Relationship - 逻辑关系
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub predecessor: String, // 紧前作业 ID
    pub successor: String,   // 紧后作业 ID
    #[serde(rename = "type")]
    pub logic_type: LogicType,
    pub lag: f64, // 延时（天，负数=搭接）
}

// ==========================================
// Calendar - 日历
// ==========================================
// 当前检查项仅做存在性判断
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_day: Option<f64>,
}

// ==========================================
// ScheduleData - 计划快照
// ==========================================
// 作业与关系始终成对出现,作为一个整体交给引擎
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    pub activities: Vec<Activity>,
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub calendars: Vec<Calendar>,
}

impl ScheduleData {
    pub fn new(
        activities: Vec<Activity>,
        relationships: Vec<Relationship>,
        calendars: Vec<Calendar>,
    ) -> Self {
        Self {
            activities,
            relationships,
            calendars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty() && self.relationships.is_empty()
    }

    /// 关键作业数量
    pub fn critical_count(&self) -> usize {
        self.activities.iter().filter(|a| a.is_critical).count()
    }

    /// 至少参与一条逻辑关系的作业数量
    pub fn linked_activity_count(&self) -> usize {
        let linked: std::collections::HashSet<&str> = self
            .relationships
            .iter()
            .flat_map(|r| [r.predecessor.as_str(), r.successor.as_str()])
            .collect();
        self.activities
            .iter()
            .filter(|a| linked.contains(a.id.as_str()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn activity(id: &str, critical: bool) -> Activity {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Activity {
            id: id.to_string(),
            name: format!("Task {}", id),
            wbs_code: "WBS.1".to_string(),
            duration: 1.0,
            start_date: ts,
            end_date: ts,
            calendar_id: "1".to_string(),
            is_critical: critical,
            total_float: 0.0,
            percent_complete: 0.0,
            constraint_type: None,
        }
    }

    fn link(pred: &str, succ: &str) -> Relationship {
        Relationship {
            id: format!("{}-{}", pred, succ),
            predecessor: pred.to_string(),
            successor: succ.to_string(),
            logic_type: LogicType::FS,
            lag: 0.0,
        }
    }

    #[test]
    fn test_summary_counts() {
        let data = ScheduleData::new(
            vec![activity("A", true), activity("B", false), activity("C", true)],
            vec![link("A", "B")],
            vec![],
        );
        assert_eq!(data.critical_count(), 2);
        assert_eq!(data.linked_activity_count(), 2);
    }

    #[test]
    fn test_relationship_serializes_type_key() {
        let json = serde_json::to_value(link("A", "B")).unwrap();
        assert_eq!(json["type"], "FS");
        assert_eq!(json["predecessor"], "A");
    }

    #[test]
    fn test_blank_name() {
        let mut a = activity("A", false);
        assert!(!a.has_blank_name());
        a.name = "   ".to_string();
        assert!(a.has_blank_name());
    }
}
