// ==========================================
// 进度计划健康度评估 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 格式不支持 / 结构解析失败（整文件拒绝）
// 说明: 字段级缺陷（数值/日期）在清洗阶段就地兜底,不产生错误
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xer/.xml）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 内容解析错误 =====
    #[error("文件编码错误: {0}")]
    Encoding(String),

    #[error("{format} 解析失败: {message}")]
    Parse { format: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        ImportError::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    /// 内容无法解码（包含编码错误）
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ImportError::Parse { .. } | ImportError::Encoding(_))
    }

    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ImportError::UnsupportedFormat(_))
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::parse("XER", err.to_string())
    }
}

// 实现 From<quick_xml::Error>
impl From<quick_xml::Error> for ImportError {
    fn from(err: quick_xml::Error) -> Self {
        ImportError::parse("Project XML", err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
