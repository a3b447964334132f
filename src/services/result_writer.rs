//! 结果写入服务 - 业务能力层
//!
//! 只负责"把主评估结果写到文件"能力，不关心流程

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult};

/// 结果写入服务
///
/// 每次写入都会覆盖文件原有内容
pub struct ResultWriter {
    result_file_path: PathBuf,
}

impl ResultWriter {
    /// 写到默认的 `evaluation_result.txt`
    pub fn new() -> Self {
        Self {
            result_file_path: PathBuf::from("evaluation_result.txt"),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            result_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.result_file_path
    }

    /// 原样写入内容
    pub async fn write(&self, content: &str) -> AppResult<()> {
        debug!(
            "写入评估结果: {} | 长度: {}",
            self.result_file_path.display(),
            content.len()
        );

        tokio::fs::write(&self.result_file_path, content)
            .await
            .map_err(|e| AppError::file_write_failed(self.result_file_path.display().to_string(), e))
    }
}

impl Default for ResultWriter {
    fn default() -> Self {
        Self::new()
    }
}
