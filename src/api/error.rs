// ==========================================
// 进度计划健康度评估 - API 层错误类型
// ==========================================
// 职责: 统一导入层 / 配置层错误,供外部界面层消费
// ==========================================

use crate::config::error::ConfigError;
use crate::importer::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 文件格式不受支持
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ApiError::Import(e) if e.is_unsupported_format())
    }

    /// 文件内容无法解析
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ApiError::Import(e) if e.is_parse_error())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
