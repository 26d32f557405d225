// ==========================================
// 进度计划健康度评估 - 演示计划数据
// ==========================================
// 用途: 无文件时的演示数据 / 冒烟测试
// 内容: 一个小型施工计划,刻意保留若干典型缺陷
// ==========================================

use crate::domain::activity::{Activity, Calendar, Relationship, ScheduleData};
use crate::domain::types::{ConstraintType, LogicType};
use chrono::{Duration, NaiveDate, NaiveDateTime};

fn day(offset: i64) -> NaiveDateTime {
    let base = NaiveDate::from_ymd_opt(2025, 3, 3)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or(NaiveDateTime::MIN);
    base + Duration::days(offset)
}

#[allow(clippy::too_many_arguments)]
fn activity(
    id: &str,
    name: &str,
    wbs: &str,
    start: i64,
    duration: f64,
    total_float: f64,
    percent_complete: f64,
    constraint_type: Option<ConstraintType>,
) -> Activity {
    Activity {
        id: id.to_string(),
        name: name.to_string(),
        wbs_code: wbs.to_string(),
        duration,
        start_date: day(start),
        end_date: day(start + duration.ceil() as i64),
        calendar_id: "1".to_string(),
        is_critical: total_float == 0.0,
        total_float,
        percent_complete,
        constraint_type,
    }
}

fn link(id: &str, pred: &str, succ: &str, logic_type: LogicType, lag: f64) -> Relationship {
    Relationship {
        id: id.to_string(),
        predecessor: pred.to_string(),
        successor: succ.to_string(),
        logic_type,
        lag,
    }
}

/// 演示计划
///
/// 包含的典型问题: 一个孤立作业、一个负延时、一个超长工期、
/// 一个缺少 WBS 的作业以及一个带开始约束的作业
pub fn sample_schedule_data() -> ScheduleData {
    let activities = vec![
        activity("A1000", "Project start", "1", 0, 0.0, 0.0, 100.0, None),
        activity("A1010", "Site mobilisation", "1.1", 0, 5.0, 0.0, 100.0, None),
        activity("A1020", "Excavation", "1.2", 5, 10.0, 0.0, 60.0, None),
        activity("A1030", "Foundations", "1.2", 15, 15.0, 0.0, 0.0, None),
        activity("A1040", "Structural frame", "1.3", 30, 45.0, 0.0, 0.0, None),
        activity("A1050", "Roofing", "1.3", 75, 10.0, 5.0, 0.0, None),
        activity(
            "A1060",
            "Facade",
            "1.4",
            70,
            20.0,
            3.0,
            0.0,
            Some(ConstraintType::Start),
        ),
        activity("A1070", "MEP rough-in", "", 75, 25.0, 0.0, 0.0, None),
        activity("A1080", "Interior finishes", "1.5", 100, 30.0, 0.0, 0.0, None),
        activity("A1090", "Landscaping", "1.6", 90, 8.0, 40.0, 0.0, None),
        activity("A1100", "Commissioning", "1.7", 130, 6.0, 0.0, 0.0, None),
        activity("A1110", "Project finish", "1", 136, 0.0, 0.0, 0.0, None),
    ];

    let relationships = vec![
        link("R1", "A1000", "A1010", LogicType::FS, 0.0),
        link("R2", "A1010", "A1020", LogicType::FS, 0.0),
        link("R3", "A1020", "A1030", LogicType::FS, 0.0),
        link("R4", "A1030", "A1040", LogicType::FS, 0.0),
        link("R5", "A1040", "A1050", LogicType::FS, 0.0),
        link("R6", "A1040", "A1060", LogicType::SS, 40.0),
        link("R7", "A1040", "A1070", LogicType::FS, -5.0),
        link("R8", "A1050", "A1080", LogicType::FS, 0.0),
        link("R9", "A1070", "A1080", LogicType::FS, 0.0),
        link("R10", "A1060", "A1080", LogicType::FF, 0.0),
        link("R11", "A1080", "A1100", LogicType::FS, 0.0),
        link("R12", "A1100", "A1110", LogicType::FS, 0.0),
    ];

    let calendars = vec![Calendar {
        id: "1".to_string(),
        name: "Standard 5x8".to_string(),
        hours_per_day: Some(8.0),
    }];

    ScheduleData::new(activities, relationships, calendars)
}
