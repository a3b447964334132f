use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppResult, ConfigError};

/// LLM 配置（Azure OpenAI 部署）
#[derive(Clone, Debug)]
pub struct LlmSettings {
    pub api_base: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

/// 文档分析服务配置
#[derive(Clone, Debug)]
pub struct DocumentSettings {
    pub endpoint: String,
    /// 允许为空，未配置时发送空的订阅密钥
    pub api_key: String,
    pub api_version: String,
    /// 轮询分析结果的默认间隔（服务未返回 Retry-After 时使用）
    pub poll_interval_ms: u64,
}

/// 提示词评估流程配置
#[derive(Clone, Debug)]
pub struct EvaluationSettings {
    /// 模板目录
    pub template_dir: PathBuf,
    /// 评估系统提示词模板名
    pub system_template: String,
    /// 待评估提示词模板名，按顺序逐个评估
    pub prompt_templates: Vec<String>,
    /// 主评估结果输出文件（每次覆盖）
    pub result_file: PathBuf,
    /// 可选的评分规则覆盖文件
    pub rubric_file: Option<PathBuf>,
    /// 是否额外请求一次"改写建议"
    pub suggest_revision: bool,
}

/// 单页提取流程配置
#[derive(Clone, Debug)]
pub struct ExtractionSettings {
    pub pdf_path: PathBuf,
    /// 页码，从 1 开始
    pub page_number: u32,
}

impl LlmSettings {
    pub const DEFAULT_API_VERSION: &'static str = "2024-05-01-preview";

    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            api_base: required("OPENAI_API_BASE")?,
            api_key: required("OPENAI_API_KEY")?,
            deployment: required("GPT4O_MODEL_DEPLOYMENT_NAME")?,
            api_version: optional("OPENAI_API_VERSION")
                .unwrap_or_else(|| Self::DEFAULT_API_VERSION.to_string()),
        })
    }
}

impl DocumentSettings {
    pub const DEFAULT_API_VERSION: &'static str = "2023-10-31-preview";

    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            endpoint: required("DOC_INTELLIGENCE_ENDPOINT")?,
            api_key: optional("DOC_INTELLIGENCE_KEY").unwrap_or_default(),
            api_version: optional("DOC_INTELLIGENCE_API_VERSION")
                .unwrap_or_else(|| Self::DEFAULT_API_VERSION.to_string()),
            poll_interval_ms: parsed("DOC_INTELLIGENCE_POLL_INTERVAL_MS", 1000)?,
        })
    }
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("."),
            system_template: "eval_system_prompt_template.j2".to_string(),
            prompt_templates: vec!["prompt_to_evaluate.j2".to_string()],
            result_file: PathBuf::from("evaluation_result.txt"),
            rubric_file: None,
            suggest_revision: false,
        }
    }
}

impl EvaluationSettings {
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            template_dir: optional("TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.template_dir),
            system_template: optional("EVAL_SYSTEM_TEMPLATE").unwrap_or(default.system_template),
            prompt_templates: optional("PROMPT_TEMPLATE")
                .map(|v| split_list(&v))
                .filter(|names| !names.is_empty())
                .unwrap_or(default.prompt_templates),
            result_file: optional("EVAL_RESULT_FILE")
                .map(PathBuf::from)
                .unwrap_or(default.result_file),
            rubric_file: optional("RUBRIC_FILE").map(PathBuf::from),
            suggest_revision: parsed("SUGGEST_REVISION", default.suggest_revision)?,
        })
    }
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            pdf_path: PathBuf::from("file.pdf"),
            page_number: 1,
        }
    }
}

impl ExtractionSettings {
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            pdf_path: optional("PDF_PATH")
                .map(PathBuf::from)
                .unwrap_or(default.pdf_path),
            page_number: parsed("PAGE_NUMBER", default.page_number)?,
        })
    }
}

/// 加载 `.env`（如果存在）
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("已加载环境文件: {}", path.display());
    }
}

fn optional(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok()
}

fn required(var_name: &str) -> AppResult<String> {
    optional(var_name).ok_or_else(|| {
        ConfigError::EnvVarNotFound {
            var_name: var_name.to_string(),
        }
        .into()
    })
}

/// 逗号分隔的列表，忽略空项
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parsed<T: FromStr>(var_name: &str, default: T) -> AppResult<T> {
    match optional(var_name) {
        Some(value) => parse_value(var_name, &value),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(var_name: &str, value: &str) -> AppResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: std::any::type_name::<T>().to_string(),
        }
        .into()
    })
}
