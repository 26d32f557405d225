// ==========================================
// 进度计划健康度评估 - 评估结果领域模型
// ==========================================
// 职责: 检查项结果 / 分类结果 / 整体评估快照
// 红线: 评估结果一经生成不可变
// ==========================================

use crate::domain::types::{CriterionStatus, HealthStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 每个检查项保留的示例条目上限
pub const MAX_DETAILS: usize = 5;

// ==========================================
// AnalysisResult - 单个检查项结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub criterion_id: String,
    pub score: f64,              // 0-100
    pub status: CriterionStatus, // 由 score 固定分档得出
    pub message: String,
    pub details: Vec<String>, // 最多 MAX_DETAILS 条
    pub count: usize,         // 问题项原始数量
}

// ==========================================
// CategoryResult - 分类结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub category_id: String,
    pub score: u32, // 已启用检查项的加权平均（四舍五入）
    pub results: Vec<AnalysisResult>,
}

// ==========================================
// AnalysisSummary - 计划规模统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_activities: usize,
    pub total_relationships: usize,
    pub critical_activities: usize,
    /// 至少参与一条逻辑关系的作业数
    pub activities_with_relationships: usize,
}

// ==========================================
// ScheduleAnalysis - 整体评估快照
// ==========================================
// 生命周期: 每次运行生成一份,可追加到已保存列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAnalysis {
    pub id: String,
    pub name: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub overall_score: u32,
    pub status: HealthStatus,
    #[serde(flatten)]
    pub summary: AnalysisSummary,
    pub category_results: Vec<CategoryResult>,
}

impl ScheduleAnalysis {
    /// 按检查项 ID 查找结果
    pub fn find_result(&self, criterion_id: &str) -> Option<&AnalysisResult> {
        self.category_results
            .iter()
            .flat_map(|c| c.results.iter())
            .find(|r| r.criterion_id == criterion_id)
    }

    pub fn category(&self, category_id: &str) -> Option<&CategoryResult> {
        self.category_results
            .iter()
            .find(|c| c.category_id == category_id)
    }

    pub fn stats(&self) -> AnalysisStats {
        AnalysisStats::from_analysis(self)
    }
}

// ==========================================
// AnalysisStats - 检查项状态汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_ok: usize,
    pub total_warnings: usize,
    pub total_critical: usize,
    pub total_checks: usize,
}

impl AnalysisStats {
    pub fn from_analysis(analysis: &ScheduleAnalysis) -> Self {
        let mut stats = AnalysisStats::default();
        for result in analysis.category_results.iter().flat_map(|c| c.results.iter()) {
            match result.status {
                CriterionStatus::Ok => stats.total_ok += 1,
                CriterionStatus::Warning => stats.total_warnings += 1,
                CriterionStatus::Critical => stats.total_critical += 1,
            }
        }
        stats.total_checks = stats.total_ok + stats.total_warnings + stats.total_critical;
        stats
    }
}
