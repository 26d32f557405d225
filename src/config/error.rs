// ==========================================
// 进度计划健康度评估 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置 JSON 无法解码（原配置保持不变）
    #[error("配置导入失败: {0}")]
    ImportFailed(String),

    #[error("配置导出失败: {0}")]
    ExportFailed(String),

    #[error("配置文件读写失败: {path}: {message}")]
    Io { path: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
