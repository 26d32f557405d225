// ==========================================
// 进度计划健康度评估 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值与日期容错解析
// 策略: 字段缺陷就地兜底（数值→0, 日期→兜底时间）,不阻断整文件
// ==========================================

use crate::importer::file_parser::ScheduleFormat;
use crate::importer::schedule_importer_trait::DataCleaner as DataCleanerTrait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 支持的日期时间格式（按常见程度排列）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

pub struct DataCleaner;

// ==========================================
// FieldDefects - 字段兜底计数
// ==========================================
// 仅统计"有值但无法解析"的字段,缺失字段不计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefects {
    pub unparsed_dates: usize,
    pub unparsed_numbers: usize,
    pub unknown_codes: usize,
}

impl FieldDefects {
    pub fn total(&self) -> usize {
        self.unparsed_dates + self.unparsed_numbers + self.unknown_codes
    }

    /// 每个文件一条汇总日志
    pub fn log_summary(&self, format: ScheduleFormat) {
        if self.total() == 0 {
            return;
        }
        tracing::warn!(
            format = %format,
            unparsed_dates = self.unparsed_dates,
            unparsed_numbers = self.unparsed_numbers,
            unknown_codes = self.unknown_codes,
            "计划文件存在字段缺陷，已使用默认值兜底"
        );
    }
}

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_null<'a>(&self, value: Option<&'a str>) -> Option<&'a str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    fn parse_number(&self, value: &str) -> Option<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    fn parse_datetime(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.naive_utc());
        }

        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }
}

impl DataCleaner {
    /// 数值字段: 缺失/非数值/NaN 一律按 0 处理
    pub fn number_or_zero(&self, value: Option<&str>) -> f64 {
        self.normalize_null(value)
            .and_then(|v| self.parse_number(v))
            .unwrap_or(0.0)
    }

    /// 日期字段: 缺失/无法解析时使用兜底时间
    pub fn datetime_or(&self, value: Option<&str>, fallback: NaiveDateTime) -> NaiveDateTime {
        self.normalize_null(value)
            .and_then(|v| self.parse_datetime(v))
            .unwrap_or(fallback)
    }

    /// 整数字段: 取前导数字部分（"50.5" → 50, "abc" → 0）
    pub fn leading_integer(&self, value: Option<&str>) -> f64 {
        let Some(v) = self.normalize_null(value) else {
            return 0.0;
        };
        let (sign, digits) = match v.strip_prefix('-') {
            Some(rest) => (-1.0, rest),
            None => (1.0, v.strip_prefix('+').unwrap_or(v)),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..end]
            .parse::<f64>()
            .map(|n| sign * n)
            .unwrap_or(0.0)
    }

    /// 日期字段（计数版）: 有值但无法解析时记一次缺陷
    pub fn datetime_tracked(
        &self,
        value: Option<&str>,
        fallback: NaiveDateTime,
        defects: &mut FieldDefects,
    ) -> NaiveDateTime {
        match self.normalize_null(value) {
            Some(v) => self.parse_datetime(v).unwrap_or_else(|| {
                defects.unparsed_dates += 1;
                fallback
            }),
            None => fallback,
        }
    }

    /// 整数字段（计数版）: 有值但不以数字开头时记一次缺陷
    pub fn leading_integer_tracked(&self, value: Option<&str>, defects: &mut FieldDefects) -> f64 {
        if let Some(v) = self.normalize_null(value) {
            let digits = v.trim_start_matches(['-', '+']);
            if !digits.starts_with(|c: char| c.is_ascii_digit()) {
                defects.unparsed_numbers += 1;
            }
        }
        self.leading_integer(value)
    }

    /// 布尔标志: 仅 "1" 视为真
    pub fn is_flag_set(&self, value: Option<&str>) -> bool {
        self.normalize_null(value) == Some("1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  hello  "), "hello");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ")), None);
        assert_eq!(cleaner.normalize_null(Some("")), None);
        assert_eq!(cleaner.normalize_null(Some("  value  ")), Some("value"));
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_number_or_zero() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.number_or_zero(Some("40")), 40.0);
        assert_eq!(cleaner.number_or_zero(Some(" -16.5 ")), -16.5);
        assert_eq!(cleaner.number_or_zero(Some("abc")), 0.0);
        assert_eq!(cleaner.number_or_zero(Some("NaN")), 0.0);
        assert_eq!(cleaner.number_or_zero(Some("")), 0.0);
        assert_eq!(cleaner.number_or_zero(None), 0.0);
    }

    #[test]
    fn test_parse_datetime_formats() {
        let cleaner = DataCleaner;
        let expected = NaiveDate::from_ymd_opt(2025, 1, 20)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(cleaner.parse_datetime("2025-01-20 08:00"), Some(expected));
        assert_eq!(cleaner.parse_datetime("2025-01-20T08:00:00"), Some(expected));
        assert_eq!(cleaner.parse_datetime("2025-01-20T08:00:00Z"), Some(expected));

        let midnight = NaiveDate::from_ymd_opt(2025, 1, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(cleaner.parse_datetime("2025-01-20"), Some(midnight));
        assert_eq!(cleaner.parse_datetime("not a date"), None);
    }

    #[test]
    fn test_datetime_or_fallback() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.datetime_or(None, fallback()), fallback());
        assert_eq!(cleaner.datetime_or(Some("31/31/2025"), fallback()), fallback());
    }

    #[test]
    fn test_leading_integer() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.leading_integer(Some("50")), 50.0);
        assert_eq!(cleaner.leading_integer(Some("50.5")), 50.0);
        assert_eq!(cleaner.leading_integer(Some("abc")), 0.0);
        assert_eq!(cleaner.leading_integer(Some("-3")), -3.0);
        assert_eq!(cleaner.leading_integer(None), 0.0);
    }

    #[test]
    fn test_tracked_helpers_count_only_present_bad_values() {
        let cleaner = DataCleaner;
        let mut defects = FieldDefects::default();

        cleaner.datetime_tracked(None, fallback(), &mut defects);
        cleaner.datetime_tracked(Some("  "), fallback(), &mut defects);
        cleaner.datetime_tracked(Some("2024-02-01"), fallback(), &mut defects);
        assert_eq!(defects.unparsed_dates, 0);
        assert_eq!(cleaner.datetime_tracked(Some("soon"), fallback(), &mut defects), fallback());
        assert_eq!(defects.unparsed_dates, 1);

        assert_eq!(cleaner.leading_integer_tracked(Some("75"), &mut defects), 75.0);
        assert_eq!(cleaner.leading_integer_tracked(Some("-5"), &mut defects), -5.0);
        assert_eq!(cleaner.leading_integer_tracked(None, &mut defects), 0.0);
        assert_eq!(defects.unparsed_numbers, 0);
        assert_eq!(cleaner.leading_integer_tracked(Some("half"), &mut defects), 0.0);
        assert_eq!(defects.unparsed_numbers, 1);
        assert_eq!(defects.total(), 2);
    }

    #[test]
    fn test_is_flag_set() {
        let cleaner = DataCleaner;
        assert!(cleaner.is_flag_set(Some("1")));
        assert!(cleaner.is_flag_set(Some(" 1 ")));
        assert!(!cleaner.is_flag_set(Some("0")));
        assert!(!cleaner.is_flag_set(Some("true")));
        assert!(!cleaner.is_flag_set(None));
    }
}
