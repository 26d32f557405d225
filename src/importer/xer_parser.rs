// ==========================================
// 进度计划健康度评估 - XER 解析器
// ==========================================
// 格式: 行式、制表符分隔
//   %T <表名>   开始新表（重置当前表头）
//   %F <列...>  声明当前表的列名
//   %R <值...>  按位置对应最近一次声明的列名
// 消费表: TASK → Activity, TASKPRED → Relationship, CALENDAR → Calendar
// 其余表整体忽略
// ==========================================

use crate::domain::activity::{Activity, Calendar, Relationship, ScheduleData};
use crate::domain::types::{ConstraintType, LogicType};
use crate::importer::data_cleaner::{DataCleaner, FieldDefects};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::ScheduleFormat;
use crate::importer::schedule_importer_trait::{
    DataCleaner as DataCleanerTrait, ScheduleParser,
};
use chrono::{NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;

/// 每个工作日的小时数（工期/浮时/延时由小时换算为天）
pub const HOURS_PER_DAY: f64 = 8.0;

const TABLE_TASK: &str = "TASK";
const TABLE_TASKPRED: &str = "TASKPRED";
const TABLE_CALENDAR: &str = "CALENDAR";

// ==========================================
// 解析状态
// ==========================================
#[derive(Default)]
struct TableState {
    name: String,
    headers: HashMap<String, usize>,
}

impl TableState {
    fn start(&mut self, name: &str) {
        self.name = name.to_string();
        self.headers.clear();
    }

    fn declare_headers(&mut self, columns: &[&str]) {
        self.headers = columns
            .iter()
            .enumerate()
            .map(|(idx, col)| (col.trim().to_string(), idx))
            .collect();
    }
}

/// 单行记录访问器（按列名取值,空值视为缺失）
struct XerRow<'a> {
    headers: &'a HashMap<String, usize>,
    values: &'a [&'a str],
}

impl<'a> XerRow<'a> {
    fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.headers.get(column)?;
        self.values
            .get(idx)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 按别名顺序取第一个存在的列
    fn first_of(&self, columns: &[&str]) -> Option<&'a str> {
        columns.iter().find_map(|c| self.get(c))
    }
}

// ==========================================
// XerParser
// ==========================================
pub struct XerParser {
    cleaner: DataCleaner,
    fallback_time: Option<NaiveDateTime>,
}

impl XerParser {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
            fallback_time: None,
        }
    }

    fn map_task(
        &self,
        row: &XerRow<'_>,
        fallback: NaiveDateTime,
        defects: &mut FieldDefects,
    ) -> Activity {
        let cleaner = &self.cleaner;

        let duration_raw = row.first_of(&["target_drtn_hr_cnt", "target_dur"]);
        if duration_raw.is_some_and(|v| cleaner.parse_number(v).is_none()) {
            defects.unparsed_numbers += 1;
        }
        let duration = cleaner.number_or_zero(duration_raw) / HOURS_PER_DAY;

        let mut parse_date = |column: &str| match row.get(column) {
            Some(v) => cleaner.parse_datetime(v).unwrap_or_else(|| {
                defects.unparsed_dates += 1;
                fallback
            }),
            None => fallback,
        };
        let start_date = parse_date("target_start_date");
        let end_date = parse_date("target_end_date");

        // 浮时缺失按 0 处理；存在但无法解析时不判定为关键
        let float_hours = match row.get("total_float_hr_cnt") {
            None => Some(0.0),
            Some(v) => cleaner.parse_number(v),
        };
        if float_hours.is_none() {
            defects.unparsed_numbers += 1;
        }
        let is_critical = float_hours == Some(0.0);
        let total_float = float_hours.unwrap_or(0.0) / HOURS_PER_DAY;

        Activity {
            id: cleaner.clean_text(row.get("task_id").unwrap_or_default()),
            name: cleaner.clean_text(row.get("task_name").unwrap_or_default()),
            wbs_code: cleaner.clean_text(row.get("wbs_id").unwrap_or_default()),
            duration,
            start_date,
            end_date,
            calendar_id: cleaner.clean_text(row.get("clndr_id").unwrap_or_default()),
            is_critical,
            total_float,
            percent_complete: cleaner
                .number_or_zero(row.first_of(&["phys_complete_pct", "complete_pct"])),
            constraint_type: row.get("cstr_type").and_then(ConstraintType::from_xer_code),
        }
    }

    fn map_taskpred(&self, row: &XerRow<'_>, defects: &mut FieldDefects) -> Relationship {
        let cleaner = &self.cleaner;

        let logic_type = match row.get("pred_type") {
            None => LogicType::FS,
            Some(code) => LogicType::from_xer_code(code).unwrap_or_else(|| {
                defects.unknown_codes += 1;
                LogicType::FS
            }),
        };

        Relationship {
            id: cleaner.clean_text(row.get("task_pred_id").unwrap_or_default()),
            predecessor: cleaner.clean_text(row.get("pred_task_id").unwrap_or_default()),
            successor: cleaner.clean_text(row.get("task_id").unwrap_or_default()),
            logic_type,
            lag: cleaner.number_or_zero(row.get("lag_hr_cnt")) / HOURS_PER_DAY,
        }
    }

    fn map_calendar(&self, row: &XerRow<'_>) -> Calendar {
        Calendar {
            id: self.cleaner.clean_text(row.get("clndr_id").unwrap_or_default()),
            name: self.cleaner.clean_text(row.get("clndr_name").unwrap_or_default()),
            hours_per_day: row
                .get("day_hr_cnt")
                .and_then(|v| self.cleaner.parse_number(v)),
        }
    }
}

impl Default for XerParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 拆分指令与取值: 兼容 "%T\tTASK" 与 "%T TASK" 两种写法
fn split_directive(record: &StringRecord) -> Option<(&str, Vec<&str>)> {
    let first = record.get(0)?.trim();
    if !first.starts_with('%') || !first.is_char_boundary(2) {
        return None;
    }
    let (directive, rest) = first.split_at(2);
    let rest = rest.trim();

    let mut values: Vec<&str> = Vec::with_capacity(record.len());
    if !rest.is_empty() {
        values.push(rest);
    }
    values.extend(record.iter().skip(1));
    Some((directive, values))
}

impl ScheduleParser for XerParser {
    fn format(&self) -> ScheduleFormat {
        ScheduleFormat::Xer
    }

    fn with_fallback_time(mut self, fallback: NaiveDateTime) -> Self {
        self.fallback_time = Some(fallback);
        self
    }

    fn parse_with_defects(&self, content: &str) -> ImportResult<(ScheduleData, FieldDefects)> {
        let fallback = self
            .fallback_time
            .unwrap_or_else(|| Utc::now().naive_utc());

        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .quoting(false)
            .from_reader(content.as_bytes());

        let mut data = ScheduleData::default();
        let mut table = TableState::default();
        let mut saw_table = false;
        let mut defects = FieldDefects::default();

        for result in reader.records() {
            let record = result?;
            let Some((directive, values)) = split_directive(&record) else {
                continue;
            };

            match directive {
                "%T" => {
                    let name = values.first().map(|v| v.trim()).unwrap_or_default();
                    tracing::debug!(table = name, "XER 切换数据表");
                    table.start(name);
                    saw_table = true;
                }
                "%F" => table.declare_headers(&values),
                "%R" => {
                    let row = XerRow {
                        headers: &table.headers,
                        values: &values,
                    };
                    match table.name.as_str() {
                        TABLE_TASK => data.activities.push(self.map_task(&row, fallback, &mut defects)),
                        TABLE_TASKPRED => data
                            .relationships
                            .push(self.map_taskpred(&row, &mut defects)),
                        TABLE_CALENDAR => data.calendars.push(self.map_calendar(&row)),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if !saw_table {
            return Err(ImportError::parse("XER", "未找到表定义指令 (%T)"));
        }

        tracing::debug!(
            activities = data.activities.len(),
            relationships = data.relationships.len(),
            calendars = data.calendars.len(),
            "XER 解析完成"
        );

        Ok((data, defects))
    }
}
