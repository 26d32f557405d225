// ==========================================
// 进度计划健康度评估 - 通用文件解析器
// ==========================================
// 职责: 根据文件名/格式标签选择解析器
// 支持: XER (.xer) / Project XML (.xml)
// ==========================================

use crate::domain::activity::ScheduleData;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::project_xml_parser::ProjectXmlParser;
use crate::importer::schedule_importer_trait::ScheduleParser;
use crate::importer::xer_parser::XerParser;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// ==========================================
// ScheduleFormat - 计划文件格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleFormat {
    Xer,        // 制表符分隔表格式
    ProjectXml, // 层级标记格式
}

impl ScheduleFormat {
    /// 由文件名或显式格式标签识别格式
    ///
    /// # 参数
    /// - hint: 文件名（"plan.XER"）或标签（"xer" / "xml" / "project_xml"）
    ///
    /// # 返回
    /// - Err(UnsupportedFormat): 无法识别
    pub fn from_hint(hint: &str) -> ImportResult<Self> {
        let lower = hint.trim().to_lowercase();
        match lower.as_str() {
            "xer" => return Ok(ScheduleFormat::Xer),
            "xml" | "project_xml" | "project-xml" | "mspdi" => {
                return Ok(ScheduleFormat::ProjectXml)
            }
            _ => {}
        }

        if lower.ends_with(".xer") {
            Ok(ScheduleFormat::Xer)
        } else if lower.ends_with(".xml") {
            Ok(ScheduleFormat::ProjectXml)
        } else {
            Err(ImportError::UnsupportedFormat(hint.to_string()))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleFormat::Xer => "xer",
            ScheduleFormat::ProjectXml => "project_xml",
        }
    }
}

impl fmt::Display for ScheduleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleFormat::Xer => write!(f, "XER"),
            ScheduleFormat::ProjectXml => write!(f, "Project XML"),
        }
    }
}

// ==========================================
// 通用解析器（根据格式自动选择）
// ==========================================
#[derive(Default)]
pub struct UniversalScheduleParser {
    fallback_time: Option<NaiveDateTime>,
}

impl UniversalScheduleParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 固定日期兜底时间（用于可复现的解析结果）
    pub fn with_fallback_time(mut self, fallback: NaiveDateTime) -> Self {
        self.fallback_time = Some(fallback);
        self
    }

    /// 解析文本内容
    pub fn parse(&self, content: &str, hint: &str) -> ImportResult<ScheduleData> {
        let format = ScheduleFormat::from_hint(hint)?;
        let data = match format {
            ScheduleFormat::Xer => self.run(XerParser::new(), content),
            ScheduleFormat::ProjectXml => self.run(ProjectXmlParser::new(), content),
        }?;

        tracing::info!(
            format = %format,
            activities = data.activities.len(),
            relationships = data.relationships.len(),
            "计划文件解析完成"
        );
        Ok(data)
    }

    /// 解析原始字节（去除 UTF-8 BOM,非 UTF-8 内容拒绝）
    pub fn parse_bytes(&self, bytes: &[u8], hint: &str) -> ImportResult<ScheduleData> {
        // 先识别格式,格式不支持时不必解码
        ScheduleFormat::from_hint(hint)?;

        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let content = std::str::from_utf8(bytes)
            .map_err(|e| ImportError::Encoding(format!("{}: {}", hint, e)))?;
        self.parse(content, hint)
    }

    fn run<P: ScheduleParser>(&self, parser: P, content: &str) -> ImportResult<ScheduleData> {
        match self.fallback_time {
            Some(fallback) => parser.with_fallback_time(fallback).parse(content),
            None => parser.parse(content),
        }
    }
}

/// 解析计划文本（使用当前时间作为日期兜底）
pub fn parse(content: &str, hint: &str) -> ImportResult<ScheduleData> {
    UniversalScheduleParser::new().parse(content, hint)
}

/// 解析计划原始字节
pub fn parse_bytes(bytes: &[u8], hint: &str) -> ImportResult<ScheduleData> {
    UniversalScheduleParser::new().parse_bytes(bytes, hint)
}
