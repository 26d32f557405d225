// ==========================================
// 进度计划健康度评估 - 配置存储
// ==========================================
// 职责: 持有当前检查项目录,提供更新 / 导出 / 导入 / 重置
// 模式: 写时复制,每次变更生成新的 Arc<UserConfig> 快照
// 导入: 全量替换,解码失败时原配置保持不变
// ==========================================

use crate::config::defaults::default_config;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::user_config::{CategoryPatch, CriterionPatch, GlobalThresholds, UserConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "SCHEDULE_HEALTH_CONFIG";

/// 默认配置文件路径
///
/// 优先级: 环境变量 → 用户配置目录/schedule-health/config.json → ./schedule-health.json
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("schedule-health").join("config.json"),
        None => PathBuf::from("./schedule-health.json"),
    }
}

// ==========================================
// ConfigStore - 配置存储
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigStore {
    current: Arc<UserConfig>,
}

impl ConfigStore {
    /// 以内置默认配置创建
    pub fn new() -> Self {
        Self::with_config(default_config())
    }

    pub fn with_config(config: UserConfig) -> Self {
        Self {
            current: Arc::new(config),
        }
    }

    /// 从配置文件加载；文件不存在时使用默认配置
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "配置文件不存在,使用默认配置");
            return Ok(Self::new());
        }

        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut store = Self::new();
        store.try_import_config(&json)?;
        Ok(store)
    }

    /// 将当前配置写入文件（自动创建父目录）
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let io_error = |e: std::io::Error| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(path, self.export_config()?).map_err(io_error)?;
        info!(path = %path.display(), "配置已保存");
        Ok(())
    }

    /// 当前配置快照（评估运行读取此快照）
    pub fn snapshot(&self) -> Arc<UserConfig> {
        Arc::clone(&self.current)
    }

    // ==========================================
    // 局部更新（ID 不存在时静默忽略）
    // ==========================================

    pub fn update_category(&mut self, category_id: &str, patch: &CategoryPatch) -> Arc<UserConfig> {
        if self.current.category(category_id).is_none() {
            debug!(category_id, "分类不存在,忽略更新");
            return self.snapshot();
        }

        self.replace_with(|config| {
            for category in config.categories.iter_mut().filter(|c| c.id == category_id) {
                patch.apply_to(category);
            }
        })
    }

    pub fn update_criterion(
        &mut self,
        category_id: &str,
        criterion_id: &str,
        patch: &CriterionPatch,
    ) -> Arc<UserConfig> {
        if self.current.criterion(category_id, criterion_id).is_none() {
            debug!(category_id, criterion_id, "检查项不存在,忽略更新");
            return self.snapshot();
        }

        self.replace_with(|config| {
            for category in config.categories.iter_mut().filter(|c| c.id == category_id) {
                for criterion in category.criteria.iter_mut().filter(|c| c.id == criterion_id) {
                    patch.apply_to(criterion);
                }
            }
        })
    }

    pub fn set_global_thresholds(&mut self, thresholds: GlobalThresholds) -> Arc<UserConfig> {
        self.replace_with(|config| config.global_thresholds = thresholds)
    }

    // ==========================================
    // 导出 / 导入 / 重置
    // ==========================================

    /// 导出为 JSON（2 空格缩进）
    pub fn export_config(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self.current.as_ref())
            .map_err(|e| ConfigError::ExportFailed(e.to_string()))
    }

    /// 导入 JSON,返回是否成功
    pub fn import_config(&mut self, json: &str) -> bool {
        self.try_import_config(json).is_ok()
    }

    /// 导入 JSON（全有或全无）
    ///
    /// 按 UserConfig 强类型解码: JSON 语法正确但结构不符（缺少必填字段、类型错误）
    /// 在导入时即失败,而不是被接受后在评估时暴露。仅 description / threshold 可省略。
    pub fn try_import_config(&mut self, json: &str) -> ConfigResult<Arc<UserConfig>> {
        match serde_json::from_str::<UserConfig>(json) {
            Ok(config) => {
                info!(categories = config.categories.len(), "配置已导入");
                self.current = Arc::new(config);
                Ok(self.snapshot())
            }
            Err(e) => {
                warn!(error = %e, "配置导入失败,保留原配置");
                Err(ConfigError::ImportFailed(e.to_string()))
            }
        }
    }

    /// 恢复内置默认配置
    pub fn reset(&mut self) -> Arc<UserConfig> {
        info!("配置已重置为默认值");
        self.current = Arc::new(default_config());
        self.snapshot()
    }

    fn replace_with<F>(&mut self, mutate: F) -> Arc<UserConfig>
    where
        F: FnOnce(&mut UserConfig),
    {
        let mut next = self.current.as_ref().clone();
        mutate(&mut next);
        self.current = Arc::new(next);
        self.snapshot()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
