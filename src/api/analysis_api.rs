// ==========================================
// 进度计划健康度评估 - 分析会话 API
// ==========================================
// 职责: 供外部界面层调用的引擎入口
// 持有: 配置存储 / 当前计划 / 当前评估 / 已保存评估
// 说明: 已保存评估仅驻留内存,追加写入,不淘汰
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigStore;
use crate::config::user_config::{CategoryPatch, CriterionPatch, GlobalThresholds, UserConfig};
use crate::domain::activity::ScheduleData;
use crate::domain::analysis::{AnalysisStats, ScheduleAnalysis};
use crate::domain::sample::sample_schedule_data;
use crate::engine::orchestrator::AnalysisOrchestrator;
use crate::i18n::t;
use crate::importer::file_parser::UniversalScheduleParser;
use std::sync::Arc;
use tracing::info;

// ==========================================
// AnalysisSession - 分析会话
// ==========================================
pub struct AnalysisSession {
    config: ConfigStore,
    parser: UniversalScheduleParser,
    orchestrator: AnalysisOrchestrator,
    schedule: ScheduleData,
    current: Option<ScheduleAnalysis>,
    saved: Vec<ScheduleAnalysis>,
}

impl AnalysisSession {
    /// 默认配置 + 内置示例计划
    pub fn new() -> Self {
        Self::with_config(ConfigStore::new())
    }

    pub fn with_config(config: ConfigStore) -> Self {
        Self {
            config,
            parser: UniversalScheduleParser::new(),
            orchestrator: AnalysisOrchestrator::new(),
            schedule: sample_schedule_data(),
            current: None,
            saved: Vec::new(),
        }
    }

    /// 替换解析器（例如注入固定的日期兜底时间）
    pub fn with_parser(mut self, parser: UniversalScheduleParser) -> Self {
        self.parser = parser;
        self
    }

    // ==========================================
    // 计划数据
    // ==========================================

    pub fn schedule_data(&self) -> &ScheduleData {
        &self.schedule
    }

    pub fn load_schedule_data(&mut self, data: ScheduleData) {
        info!(
            activities = data.activities.len(),
            relationships = data.relationships.len(),
            "载入计划数据"
        );
        self.schedule = data;
    }

    pub fn load_demo(&mut self) {
        self.load_schedule_data(sample_schedule_data());
    }

    /// 解析文本并载入（失败时保留原计划）
    pub fn load_file(&mut self, content: &str, hint: &str) -> ApiResult<&ScheduleData> {
        let data = self.parser.parse(content, hint)?;
        self.load_schedule_data(data);
        Ok(&self.schedule)
    }

    /// 解析原始字节并载入（失败时保留原计划）
    pub fn load_bytes(&mut self, bytes: &[u8], hint: &str) -> ApiResult<&ScheduleData> {
        let data = self.parser.parse_bytes(bytes, hint)?;
        self.load_schedule_data(data);
        Ok(&self.schedule)
    }

    // ==========================================
    // 评估
    // ==========================================

    /// 执行评估（name 为空时使用本地化默认名称）
    pub fn run_analysis(&mut self, name: Option<&str>) -> ScheduleAnalysis {
        let name = match name {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ => t("analysis.default_name"),
        };
        let config = self.config.snapshot();
        let analysis = self.orchestrator.run(&config, &self.schedule, &name);
        self.current = Some(analysis.clone());
        analysis
    }

    pub fn current_analysis(&self) -> Option<&ScheduleAnalysis> {
        self.current.as_ref()
    }

    pub fn save_analysis(&mut self, analysis: ScheduleAnalysis) {
        info!(id = %analysis.id, name = %analysis.name, "保存评估结果");
        self.saved.push(analysis);
    }

    /// 保存当前评估
    pub fn save_current(&mut self) -> ApiResult<()> {
        let analysis = self
            .current
            .clone()
            .ok_or_else(|| ApiError::NotFound("当前评估".to_string()))?;
        self.save_analysis(analysis);
        Ok(())
    }

    pub fn saved_analyses(&self) -> &[ScheduleAnalysis] {
        &self.saved
    }

    /// 最近的评估（当前 + 已保存,新者在前,按 id 去重）
    pub fn recent_analyses(&self, limit: usize) -> Vec<&ScheduleAnalysis> {
        let mut recent: Vec<&ScheduleAnalysis> = Vec::with_capacity(limit);
        let candidates = self.current.iter().chain(self.saved.iter().rev());
        for analysis in candidates {
            if recent.len() >= limit {
                break;
            }
            if !recent.iter().any(|a| a.id == analysis.id) {
                recent.push(analysis);
            }
        }
        recent
    }

    /// 当前评估的状态统计
    pub fn stats(&self) -> Option<AnalysisStats> {
        self.current.as_ref().map(AnalysisStats::from_analysis)
    }

    // ==========================================
    // 配置（委托 ConfigStore）
    // ==========================================

    pub fn config(&self) -> Arc<UserConfig> {
        self.config.snapshot()
    }

    pub fn update_category(&mut self, category_id: &str, patch: &CategoryPatch) -> Arc<UserConfig> {
        self.config.update_category(category_id, patch)
    }

    pub fn update_criterion(
        &mut self,
        category_id: &str,
        criterion_id: &str,
        patch: &CriterionPatch,
    ) -> Arc<UserConfig> {
        self.config.update_criterion(category_id, criterion_id, patch)
    }

    pub fn set_global_thresholds(&mut self, thresholds: GlobalThresholds) -> Arc<UserConfig> {
        self.config.set_global_thresholds(thresholds)
    }

    pub fn export_config(&self) -> ApiResult<String> {
        Ok(self.config.export_config()?)
    }

    pub fn import_config(&mut self, json: &str) -> bool {
        self.config.import_config(json)
    }

    pub fn try_import_config(&mut self, json: &str) -> ApiResult<Arc<UserConfig>> {
        Ok(self.config.try_import_config(json)?)
    }

    pub fn reset_config(&mut self) -> Arc<UserConfig> {
        self.config.reset()
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}
