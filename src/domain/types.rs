// ==========================================
// 进度计划健康度评估 - 领域类型定义
// ==========================================
// 职责: 逻辑关系类型 / 约束类型 / 评分状态等枚举
// 序列化格式: 与配置 JSON、界面层约定一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 逻辑关系类型 (Logic Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicType {
    FS, // 完成-开始
    SS, // 开始-开始
    FF, // 完成-完成
    SF, // 开始-完成
}

impl LogicType {
    pub const ALL: [LogicType; 4] = [LogicType::FS, LogicType::SS, LogicType::FF, LogicType::SF];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicType::FS => "FS",
            LogicType::SS => "SS",
            LogicType::FF => "FF",
            LogicType::SF => "SF",
        }
    }

    /// 解析 XER 关系类型代码
    ///
    /// 兼容 "FS" 与 P6 原生写法 "PR_FS"；无法识别返回 None
    pub fn from_xer_code(code: &str) -> Option<Self> {
        let upper = code.trim().to_uppercase();
        let bare = upper.strip_prefix("PR_").unwrap_or(&upper);
        match bare {
            "FS" => Some(LogicType::FS),
            "SS" => Some(LogicType::SS),
            "FF" => Some(LogicType::FF),
            "SF" => Some(LogicType::SF),
            _ => None,
        }
    }

    /// 解析 Project XML 关系类型代码（1→FS, 2→SS, 3→FF, 其余→SF）
    pub fn from_project_xml_code(code: &str) -> Self {
        match code.trim() {
            "1" => LogicType::FS,
            "2" => LogicType::SS,
            "3" => LogicType::FF,
            _ => LogicType::SF,
        }
    }
}

impl Default for LogicType {
    fn default() -> Self {
        LogicType::FS
    }
}

impl fmt::Display for LogicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 约束类型 (Constraint Type)
// ==========================================
// none 以外均计为硬约束；start/finish 同时计为软约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    None,            // 无约束（ASAP/ALAP）
    Start,           // 开始日期约束（不早于/不晚于）
    Finish,          // 完成日期约束（不早于/不晚于）
    MandatoryStart,  // 强制开始
    MandatoryFinish, // 强制完成
}

impl ConstraintType {
    /// 解析 XER cstr_type 字段（空值返回 None）
    pub fn from_xer_code(code: &str) -> Option<Self> {
        let upper = code.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }
        let constraint = match upper.as_str() {
            "CS_MANDSTART" => ConstraintType::MandatoryStart,
            "CS_MANDFIN" => ConstraintType::MandatoryFinish,
            s if s.starts_with("CS_MSO") => ConstraintType::Start,
            s if s.starts_with("CS_MEO") => ConstraintType::Finish,
            _ => ConstraintType::None,
        };
        Some(constraint)
    }

    /// 解析 Project XML ConstraintType 字段（0-7）
    pub fn from_project_xml_code(code: &str) -> Option<Self> {
        let constraint = match code.trim() {
            "0" | "1" => ConstraintType::None,
            "2" => ConstraintType::MandatoryStart,
            "3" => ConstraintType::MandatoryFinish,
            "4" | "5" => ConstraintType::Start,
            "6" | "7" => ConstraintType::Finish,
            _ => return None,
        };
        Some(constraint)
    }

    pub fn is_hard(&self) -> bool {
        *self != ConstraintType::None
    }

    pub fn is_soft(&self) -> bool {
        matches!(self, ConstraintType::Start | ConstraintType::Finish)
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintType::None => write!(f, "none"),
            ConstraintType::Start => write!(f, "start"),
            ConstraintType::Finish => write!(f, "finish"),
            ConstraintType::MandatoryStart => write!(f, "mandatory_start"),
            ConstraintType::MandatoryFinish => write!(f, "mandatory_finish"),
        }
    }
}

// ==========================================
// 检查项状态 (Criterion Status)
// ==========================================
// 固定分档: >=90 ok, >=70 warning, 其余 critical
// 与检查项自身配置的 threshold 无关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionStatus {
    Ok,
    Warning,
    Critical,
}

impl CriterionStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            CriterionStatus::Ok
        } else if score >= 70.0 {
            CriterionStatus::Warning
        } else {
            CriterionStatus::Critical
        }
    }
}

impl fmt::Display for CriterionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionStatus::Ok => write!(f, "ok"),
            CriterionStatus::Warning => write!(f, "warning"),
            CriterionStatus::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 整体健康状态 (Health Status)
// ==========================================
// 由 globalThresholds 依次比较得出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Excellent => write!(f, "excellent"),
            HealthStatus::Good => write!(f, "good"),
            HealthStatus::Fair => write!(f, "fair"),
            HealthStatus::Poor => write!(f, "poor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logic_type_from_xer_code() {
        assert_eq!(LogicType::from_xer_code("FS"), Some(LogicType::FS));
        assert_eq!(LogicType::from_xer_code("PR_SS"), Some(LogicType::SS));
        assert_eq!(LogicType::from_xer_code(" pr_ff "), Some(LogicType::FF));
        assert_eq!(LogicType::from_xer_code("XX"), None);
    }

    #[test]
    fn test_logic_type_from_project_xml_code() {
        assert_eq!(LogicType::from_project_xml_code("1"), LogicType::FS);
        assert_eq!(LogicType::from_project_xml_code("2"), LogicType::SS);
        assert_eq!(LogicType::from_project_xml_code("3"), LogicType::FF);
        assert_eq!(LogicType::from_project_xml_code("0"), LogicType::SF);
        assert_eq!(LogicType::from_project_xml_code(""), LogicType::SF);
    }

    #[test]
    fn test_constraint_type_codes() {
        assert_eq!(ConstraintType::from_xer_code(""), None);
        assert_eq!(ConstraintType::from_xer_code("CS_MSOA"), Some(ConstraintType::Start));
        assert_eq!(ConstraintType::from_xer_code("CS_MEOB"), Some(ConstraintType::Finish));
        assert_eq!(
            ConstraintType::from_xer_code("CS_MANDFIN"),
            Some(ConstraintType::MandatoryFinish)
        );
        assert_eq!(ConstraintType::from_xer_code("CS_ALAP"), Some(ConstraintType::None));

        assert_eq!(ConstraintType::from_project_xml_code("0"), Some(ConstraintType::None));
        assert_eq!(
            ConstraintType::from_project_xml_code("2"),
            Some(ConstraintType::MandatoryStart)
        );
        assert_eq!(ConstraintType::from_project_xml_code("7"), Some(ConstraintType::Finish));
        assert_eq!(ConstraintType::from_project_xml_code("x"), None);
    }

    #[test]
    fn test_constraint_hard_soft() {
        assert!(!ConstraintType::None.is_hard());
        assert!(ConstraintType::Start.is_hard());
        assert!(ConstraintType::Start.is_soft());
        assert!(ConstraintType::MandatoryStart.is_hard());
        assert!(!ConstraintType::MandatoryStart.is_soft());
    }

    #[test]
    fn test_criterion_status_bands() {
        assert_eq!(CriterionStatus::from_score(100.0), CriterionStatus::Ok);
        assert_eq!(CriterionStatus::from_score(90.0), CriterionStatus::Ok);
        assert_eq!(CriterionStatus::from_score(89.9), CriterionStatus::Warning);
        assert_eq!(CriterionStatus::from_score(70.0), CriterionStatus::Warning);
        assert_eq!(CriterionStatus::from_score(69.99), CriterionStatus::Critical);
        assert_eq!(CriterionStatus::from_score(0.0), CriterionStatus::Critical);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&CriterionStatus::Warning).unwrap(), "\"warning\"");
        assert_eq!(serde_json::to_string(&HealthStatus::Excellent).unwrap(), "\"excellent\"");
        assert_eq!(serde_json::to_string(&LogicType::SF).unwrap(), "\"SF\"");
        assert_eq!(
            serde_json::to_string(&ConstraintType::MandatoryFinish).unwrap(),
            "\"mandatory_finish\""
        );
    }
}
