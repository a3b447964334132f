use std::path::Path;

use tokio::fs;

use crate::error::{AppError, AppResult, FileError};
use crate::models::rubric::{RubricOverrides, ScoringRubric};

/// 从 TOML 文件加载评分规则覆盖项，并应用到默认规则上
pub async fn load_rubric(toml_file_path: &Path) -> AppResult<ScoringRubric> {
    let path = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(path.clone(), e))?;

    let overrides: RubricOverrides =
        toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
            path,
            source: Box::new(e),
        })?;

    Ok(ScoringRubric::default().apply(overrides))
}

/// 有覆盖文件就加载，没有就用默认规则
pub async fn load_rubric_or_default(toml_file_path: Option<&Path>) -> AppResult<ScoringRubric> {
    match toml_file_path {
        Some(path) => {
            tracing::info!("正在加载评分规则: {}", path.display());
            load_rubric(path).await
        }
        None => Ok(ScoringRubric::default()),
    }
}
