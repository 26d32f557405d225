// ==========================================
// 进度计划健康度评估 - 计划文件导入实现
// ==========================================
// 流程: 检查文件 → 识别格式 → 读取字节 → 解码解析
// 批量: 多文件并发导入,单文件失败不影响其他文件
// ==========================================

use crate::domain::activity::ScheduleData;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{ScheduleFormat, UniversalScheduleParser};
use crate::importer::schedule_importer_trait::ScheduleImporter;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::future::join_all;
use std::path::Path;

pub struct ScheduleImporterImpl {
    parser: UniversalScheduleParser,
}

impl ScheduleImporterImpl {
    pub fn new() -> Self {
        Self {
            parser: UniversalScheduleParser::new(),
        }
    }

    pub fn with_fallback_time(fallback: NaiveDateTime) -> Self {
        Self {
            parser: UniversalScheduleParser::new().with_fallback_time(fallback),
        }
    }
}

impl Default for ScheduleImporterImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleImporter for ScheduleImporterImpl {
    async fn import_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<ScheduleData> {
        let path = file_path.as_ref();
        let display = path.display().to_string();

        // 检查扩展名（先于读取,避免读取无关大文件）
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| display.clone());
        ScheduleFormat::from_hint(&file_name)?;

        // 检查文件存在
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ImportError::FileNotFound(display));
        }

        let bytes = tokio::fs::read(path).await?;
        tracing::debug!(file = %path.display(), bytes = bytes.len(), "读取计划文件");

        self.parser.parse_bytes(&bytes, &file_name)
    }

    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<ImportResult<ScheduleData>> {
        let total = file_paths.len();
        let results = join_all(file_paths.iter().map(|p| self.import_file(p.as_ref()))).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::warn!(total, failed, "批量导入存在失败文件");
        } else {
            tracing::info!(total, "批量导入完成");
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[tokio::test]
    async fn test_import_xer_file() {
        let mut file = Builder::new().suffix(".xer").tempfile().unwrap();
        write!(file, "%T\tTASK\n%F\ttask_id\ttask_name\n%R\tA\tAlpha\n").unwrap();

        let importer = ScheduleImporterImpl::new();
        let data = importer.import_file(file.path()).await.unwrap();
        assert_eq!(data.activities.len(), 1);
        assert_eq!(data.activities[0].name, "Alpha");
    }

    #[tokio::test]
    async fn test_import_file_not_found() {
        let importer = ScheduleImporterImpl::new();
        let err = importer
            .import_file(Path::new("/non/existent/plan.xer"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_import_unsupported_extension() {
        let file = Builder::new().suffix(".mpp").tempfile().unwrap();
        let importer = ScheduleImporterImpl::new();
        let err = importer.import_file(file.path()).await.unwrap_err();
        assert!(err.is_unsupported_format());
    }
}
