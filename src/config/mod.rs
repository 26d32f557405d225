// ==========================================
// 进度计划健康度评估 - 配置层
// ==========================================
// 职责: 检查项目录的模型、默认值与存储
// 存储: 进程内存（JSON 导入导出）
// ==========================================

pub mod config_manager;
pub mod defaults;
pub mod error;
pub mod user_config;

// 重导出核心配置类型
pub use config_manager::{default_config_path, ConfigStore, CONFIG_PATH_ENV};
pub use defaults::default_config;
pub use error::{ConfigError, ConfigResult};
pub use user_config::{
    CategoryConfig, CategoryPatch, CriterionConfig, CriterionPatch, CriterionThreshold,
    GlobalThresholds, UserConfig,
};
