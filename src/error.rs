use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 文档分析服务错误
    #[error("文档分析错误: {0}")]
    Document(#[from] DocumentError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 错误分类
///
/// 调用方据此区分"外部服务异常"和"模型输出格式不对"
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// 外部服务不可用（网络 / 鉴权 / 服务端错误）
    ServiceUnavailable,
    /// 模型返回了无法解析的内容
    MalformedOutput,
    /// 输入文件或模板有问题
    Input,
    /// 配置缺失或非法
    Config,
}

impl AppError {
    /// 返回错误分类
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Llm(LlmError::ScoreParseFailed { .. } | LlmError::EmptyContent { .. }) => {
                ErrorKind::MalformedOutput
            }
            AppError::Llm(_) | AppError::Document(_) => ErrorKind::ServiceUnavailable,
            AppError::File(_) => ErrorKind::Input,
            AppError::Config(_) => ErrorKind::Config,
        }
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 请求构建失败
    #[error("LLM请求构建失败: {source}")]
    RequestBuildFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 评分解析失败
    #[error("无法将LLM返回内容解析为分数: {response:?}")]
    ScoreParseFailed { response: String },
}

/// 文档分析服务错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 网络请求失败
    #[error("文档分析请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务返回错误响应
    #[error("文档分析服务返回错误响应 ({status}): {body}")]
    BadResponse { status: u16, body: String },
    /// 缺少 Operation-Location 头
    #[error("文档分析服务未返回 Operation-Location")]
    MissingOperationLocation,
    /// 分析任务失败
    #[error("文档分析任务失败，状态: {status}")]
    AnalysisFailed { status: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 模板渲染失败
    #[error("模板渲染失败 ({name}): {source}")]
    TemplateFailed {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_is_malformed_output() {
        let err: AppError = LlmError::ScoreParseFailed {
            response: "seven".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::MalformedOutput);
        assert!(err.to_string().contains("seven"));
    }

    #[test]
    fn test_service_failures_are_service_unavailable() {
        let err = AppError::llm_api_failed(
            "gpt-4o",
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        );
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);

        let err: AppError = DocumentError::BadResponse {
            status: 401,
            body: "unauthorized".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_config_and_file_kinds() {
        let err: AppError = ConfigError::EnvVarNotFound {
            var_name: "OPENAI_API_KEY".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.to_string(), "配置错误: 环境变量 OPENAI_API_KEY 不存在");

        let err = AppError::file_read_failed(
            "file.pdf",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}
