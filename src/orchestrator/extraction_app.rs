//! 单页提取应用 - 编排层
//!
//! 读取配置中的 PDF 和页码，提取该页文本并交给模型，打印两者。
//! 任何错误都直接返回，由 `main` 终止程序

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{DocumentSettings, ExtractionSettings, LlmSettings};
use crate::services::{ChatModel, DocumentAnalyzer, DocumentService, LlmService};
use crate::utils::logging::log_startup;
use crate::workflow::{describe_page, extract_page_text};

/// 单页提取的输出
#[derive(Debug, Clone)]
pub struct PageExtraction {
    pub page_text: String,
    pub details: String,
}

/// 提取应用
pub struct ExtractionApp<A: DocumentAnalyzer, M: ChatModel> {
    settings: ExtractionSettings,
    analyzer: A,
    llm: M,
}

impl ExtractionApp<DocumentService, LlmService> {
    /// 使用真实的文档分析服务和 Azure OpenAI 部署初始化
    pub fn initialize(
        llm: &LlmSettings,
        document: &DocumentSettings,
        settings: ExtractionSettings,
    ) -> Self {
        let llm = LlmService::new(llm);
        log_startup("PDF 单页提取", llm.model_name());
        Self::new(DocumentService::new(document), llm, settings)
    }
}

impl<A: DocumentAnalyzer, M: ChatModel> ExtractionApp<A, M> {
    pub fn new(analyzer: A, llm: M, settings: ExtractionSettings) -> Self {
        Self {
            settings,
            analyzer,
            llm,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<PageExtraction> {
        let path = &self.settings.pdf_path;
        let page_number = self.settings.page_number;

        let page_text = extract_page_text(&self.analyzer, path, page_number)
            .await
            .with_context(|| format!("无法提取 {} 第 {} 页", path.display(), page_number))?;
        println!("{}", page_text);

        if page_text.is_empty() {
            info!("第 {} 页没有文本（或页码不存在）", page_number);
        }

        let details = describe_page(&self.llm, &page_text)
            .await
            .context("模型提取页面细节失败")?;
        println!("{}", details);

        Ok(PageExtraction { page_text, details })
    }
}
