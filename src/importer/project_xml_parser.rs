// ==========================================
// 进度计划健康度评估 - Project XML 解析器
// ==========================================
// 格式: 层级标记
//   <Task>            → Activity（UID/Name/Duration/Start/Finish/PercentComplete/Critical）
//   <PredecessorLink> → Relationship（紧后作业 = 最近的外层 Task 的 UID）
//   <Calendar>        → Calendar（UID/Name）
// 说明: 该格式不含真实浮时,关键作业浮时记 0,否则记 1；延时不表达,固定为 0
// ==========================================

use crate::domain::activity::{Activity, Calendar, Relationship, ScheduleData};
use crate::domain::types::{ConstraintType, LogicType};
use crate::importer::data_cleaner::{DataCleaner, FieldDefects};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::ScheduleFormat;
use crate::importer::schedule_importer_trait::{
    DataCleaner as DataCleanerTrait, ScheduleParser,
};
use crate::importer::xer_parser::HOURS_PER_DAY;
use chrono::{NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const FORMAT_NAME: &str = "Project XML";
const DEFAULT_CALENDAR_ID: &str = "1";

static DURATION_PATTERN: OnceLock<Regex> = OnceLock::new();

fn duration_pattern() -> &'static Regex {
    DURATION_PATTERN.get_or_init(|| Regex::new(r"PT(\d+)H").expect("valid duration regex"))
}

/// 解析 "PT<N>H..." 形式的工期,返回小时数（不匹配 → 0）
pub fn parse_duration_hours(value: &str) -> f64 {
    duration_pattern()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

// ==========================================
// 元素构建器（收集直接子元素文本）
// ==========================================
#[derive(Default)]
struct ElementFields {
    fields: HashMap<String, String>,
}

impl ElementFields {
    fn append(&mut self, field: &str, text: &str) {
        self.fields.entry(field.to_string()).or_default().push_str(text);
    }

    fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Default)]
struct TaskBuilder {
    fields: ElementFields,
    links: Vec<ElementFields>,
}

// ==========================================
// ProjectXmlParser
// ==========================================
pub struct ProjectXmlParser {
    cleaner: DataCleaner,
    fallback_time: Option<NaiveDateTime>,
}

impl ProjectXmlParser {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
            fallback_time: None,
        }
    }

    fn finish_task(
        &self,
        task: TaskBuilder,
        fallback: NaiveDateTime,
        next_link_index: &mut usize,
        data: &mut ScheduleData,
        defects: &mut FieldDefects,
    ) {
        let cleaner = &self.cleaner;
        let fields = &task.fields;

        let uid = cleaner.clean_text(fields.get("UID").unwrap_or_default());
        let is_critical = cleaner.is_flag_set(fields.get("Critical"));
        let duration_raw = fields.get("Duration");
        if duration_raw.is_some_and(|v| !duration_pattern().is_match(v)) {
            defects.unparsed_numbers += 1;
        }
        let duration = parse_duration_hours(duration_raw.unwrap_or("0")) / HOURS_PER_DAY;

        let calendar_id = fields
            .get("CalendarUID")
            .filter(|v| *v != "-1")
            .unwrap_or(DEFAULT_CALENDAR_ID);

        for link in &task.links {
            data.relationships.push(Relationship {
                id: format!("P{}", *next_link_index),
                predecessor: cleaner.clean_text(link.get("PredecessorUID").unwrap_or_default()),
                successor: uid.clone(),
                logic_type: LogicType::from_project_xml_code(link.get("Type").unwrap_or("1")),
                lag: 0.0,
            });
            *next_link_index += 1;
        }

        data.activities.push(Activity {
            id: uid,
            name: cleaner.clean_text(fields.get("Name").unwrap_or_default()),
            wbs_code: cleaner.clean_text(fields.get("WBS").unwrap_or_default()),
            duration,
            start_date: cleaner.datetime_tracked(fields.get("Start"), fallback, defects),
            end_date: cleaner.datetime_tracked(fields.get("Finish"), fallback, defects),
            calendar_id: calendar_id.to_string(),
            is_critical,
            total_float: if is_critical { 0.0 } else { 1.0 },
            percent_complete: cleaner
                .leading_integer_tracked(fields.get("PercentComplete"), defects),
            constraint_type: fields
                .get("ConstraintType")
                .and_then(ConstraintType::from_project_xml_code),
        });
    }

    fn finish_calendar(&self, calendar: ElementFields, data: &mut ScheduleData) {
        data.calendars.push(Calendar {
            id: self.cleaner.clean_text(calendar.get("UID").unwrap_or_default()),
            name: self.cleaner.clean_text(calendar.get("Name").unwrap_or_default()),
            hours_per_day: None,
        });
    }
}

impl Default for ProjectXmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleParser for ProjectXmlParser {
    fn format(&self) -> ScheduleFormat {
        ScheduleFormat::ProjectXml
    }

    fn with_fallback_time(mut self, fallback: NaiveDateTime) -> Self {
        self.fallback_time = Some(fallback);
        self
    }

    fn parse_with_defects(&self, content: &str) -> ImportResult<(ScheduleData, FieldDefects)> {
        let fallback = self
            .fallback_time
            .unwrap_or_else(|| Utc::now().naive_utc());

        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut data = ScheduleData::default();
        let mut path: Vec<String> = Vec::new();
        let mut tasks: Vec<TaskBuilder> = Vec::new();
        let mut link: Option<ElementFields> = None;
        let mut calendar: Option<ElementFields> = None;
        let mut next_link_index = 0usize;
        let mut saw_element = false;
        let mut defects = FieldDefects::default();

        loop {
            let text = match reader.read_event()? {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    match name.as_str() {
                        "Task" => tasks.push(TaskBuilder::default()),
                        "PredecessorLink" => link = Some(ElementFields::default()),
                        "Calendar" => calendar = Some(ElementFields::default()),
                        _ => {}
                    }
                    path.push(name);
                    saw_element = true;
                    continue;
                }
                Event::Empty(e) => {
                    // <Task/> 仍视为一个（字段全空的）作业
                    if e.local_name().as_ref() == b"Task" {
                        self.finish_task(
                            TaskBuilder::default(),
                            fallback,
                            &mut next_link_index,
                            &mut data,
                            &mut defects,
                        );
                    }
                    saw_element = true;
                    continue;
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    path.pop();
                    match name.as_str() {
                        "PredecessorLink" => {
                            if let (Some(done), Some(owner)) = (link.take(), tasks.last_mut()) {
                                owner.links.push(done);
                            }
                        }
                        "Task" => {
                            if let Some(task) = tasks.pop() {
                                self.finish_task(
                                    task,
                                    fallback,
                                    &mut next_link_index,
                                    &mut data,
                                    &mut defects,
                                );
                            }
                        }
                        "Calendar" => {
                            if let Some(done) = calendar.take() {
                                self.finish_calendar(done, &mut data);
                            }
                        }
                        _ => {}
                    }
                    continue;
                }
                Event::Text(e) => e.unescape()?.into_owned(),
                Event::CData(e) => String::from_utf8_lossy(&e.into_inner()).into_owned(),
                Event::Eof => break,
                _ => continue,
            };

            // 仅收集直接子元素文本
            let depth = path.len();
            if depth < 2 {
                continue;
            }
            let field = path[depth - 1].as_str();
            match path[depth - 2].as_str() {
                "PredecessorLink" => {
                    if let Some(current) = link.as_mut() {
                        current.append(field, &text);
                    }
                }
                "Task" => {
                    if let Some(current) = tasks.last_mut() {
                        current.fields.append(field, &text);
                    }
                }
                "Calendar" => {
                    if let Some(current) = calendar.as_mut() {
                        current.append(field, &text);
                    }
                }
                _ => {}
            }
        }

        if !saw_element {
            return Err(ImportError::parse(FORMAT_NAME, "文档不包含任何元素"));
        }
        if !path.is_empty() {
            return Err(ImportError::parse(
                FORMAT_NAME,
                format!("文档不完整，未闭合元素: {}", path.join(" > ")),
            ));
        }

        tracing::debug!(
            activities = data.activities.len(),
            relationships = data.relationships.len(),
            calendars = data.calendars.len(),
            "Project XML 解析完成"
        );

        Ok((data, defects))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fallback() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn parser() -> ProjectXmlParser {
        ProjectXmlParser::new().with_fallback_time(fallback())
    }

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Project xmlns="http://schemas.microsoft.com/project">
  <Name>Demo</Name>
  <Calendars>
    <Calendar>
      <UID>1</UID>
      <Name>Standard</Name>
      <WeekDays><WeekDay><DayType>1</DayType></WeekDay></WeekDays>
    </Calendar>
  </Calendars>
  <Tasks>
    <Task>
      <UID>1</UID>
      <Name>Design &amp; review</Name>
      <WBS>1.1</WBS>
      <Duration>PT40H0M0S</Duration>
      <Start>2025-01-06T08:00:00</Start>
      <Finish>2025-01-10T17:00:00</Finish>
      <PercentComplete>25</PercentComplete>
      <Critical>1</Critical>
      <ConstraintType>4</ConstraintType>
    </Task>
    <Task>
      <UID>2</UID>
      <Name>Build</Name>
      <Duration>PT80H0M0S</Duration>
      <Start>2025-01-13T08:00:00</Start>
      <Finish>2025-01-24T17:00:00</Finish>
      <PercentComplete>0</PercentComplete>
      <Critical>0</Critical>
      <PredecessorLink>
        <PredecessorUID>1</PredecessorUID>
        <Type>2</Type>
      </PredecessorLink>
      <PredecessorLink>
        <PredecessorUID>9</PredecessorUID>
      </PredecessorLink>
    </Task>
  </Tasks>
</Project>"#;

    #[test]
    fn test_parse_duration_hours() {
        assert_eq!(parse_duration_hours("PT40H"), 40.0);
        assert_eq!(parse_duration_hours("PT40H0M0S"), 40.0);
        assert_eq!(parse_duration_hours("P1D"), 0.0);
        assert_eq!(parse_duration_hours(""), 0.0);
    }

    #[test]
    fn test_parse_tasks() {
        let data = parser().parse(SAMPLE).unwrap();
        assert_eq!(data.activities.len(), 2);

        let design = &data.activities[0];
        assert_eq!(design.id, "1");
        assert_eq!(design.name, "Design & review");
        assert_eq!(design.wbs_code, "1.1");
        assert_eq!(design.duration, 5.0);
        assert!(design.is_critical);
        assert_eq!(design.total_float, 0.0);
        assert_eq!(design.percent_complete, 25.0);
        assert_eq!(design.calendar_id, "1");
        assert_eq!(design.constraint_type, Some(ConstraintType::Start));
        assert_eq!(
            design.end_date,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap().and_hms_opt(17, 0, 0).unwrap()
        );

        let build = &data.activities[1];
        assert_eq!(build.duration, 10.0);
        assert!(!build.is_critical);
        assert_eq!(build.total_float, 1.0);
        assert_eq!(build.wbs_code, "");
    }

    #[test]
    fn test_parse_predecessor_links() {
        let data = parser().parse(SAMPLE).unwrap();
        assert_eq!(data.relationships.len(), 2);

        let first = &data.relationships[0];
        assert_eq!(first.id, "P0");
        assert_eq!(first.predecessor, "1");
        assert_eq!(first.successor, "2");
        assert_eq!(first.logic_type, LogicType::SS);
        assert_eq!(first.lag, 0.0);

        // Type 缺失按 1 (FS) 处理
        let second = &data.relationships[1];
        assert_eq!(second.id, "P1");
        assert_eq!(second.predecessor, "9");
        assert_eq!(second.logic_type, LogicType::FS);
    }

    #[test]
    fn test_parse_calendars() {
        let data = parser().parse(SAMPLE).unwrap();
        assert_eq!(data.calendars.len(), 1);
        assert_eq!(data.calendars[0].id, "1");
        assert_eq!(data.calendars[0].name, "Standard");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let xml = "<Project><Tasks><Task><UID>7</UID><Duration>P2D</Duration></Task></Tasks></Project>";
        let data = parser().parse(xml).unwrap();
        let a = &data.activities[0];
        assert_eq!(a.duration, 0.0);
        assert_eq!(a.start_date, fallback());
        assert_eq!(a.percent_complete, 0.0);
        assert!(!a.is_critical);
        assert_eq!(a.total_float, 1.0);
    }

    #[test]
    fn test_field_defects_are_counted_per_file() {
        let (_, clean) = parser().parse_with_defects(SAMPLE).unwrap();
        assert_eq!(clean.total(), 0);

        let xml = "<Project><Tasks>\
<Task><UID>1</UID><Start>next week</Start><Finish>2025-13-40</Finish>\
<PercentComplete>most</PercentComplete><Duration>P2D</Duration></Task>\
<Task><UID>2</UID><Start>2025-01-06T08:00:00</Start><PercentComplete>50</PercentComplete></Task>\
</Tasks></Project>";
        let (data, defects) = parser().parse_with_defects(xml).unwrap();
        assert_eq!(data.activities.len(), 2);
        assert_eq!(data.activities[0].start_date, fallback());
        assert_eq!(data.activities[0].percent_complete, 0.0);
        assert_eq!(defects.unparsed_dates, 2);
        assert_eq!(defects.unparsed_numbers, 2);
        assert_eq!(defects.unknown_codes, 0);
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err = parser()
            .parse("<Project><Tasks><Task></Tasks></Project>")
            .unwrap_err();
        assert!(err.is_parse_error());

        let err = parser().parse("<Project><Tasks>").unwrap_err();
        assert!(err.is_parse_error());

        let err = parser().parse("plain text").unwrap_err();
        assert!(err.is_parse_error());
    }
}
