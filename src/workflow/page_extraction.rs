//! 单页提取流程 - 流程层
//!
//! 流程顺序：读取 PDF → 文档分析 → 取指定页文本 → 交给模型提取细节
//!
//! 本流程不做任何本地恢复，错误直接返回给调用方

use std::path::Path;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::services::{ChatModel, DocumentAnalyzer};

const EXTRACTION_SYSTEM_MESSAGE: &str =
    "You are an AI assistant that helps extract details from a document. Also show the page number.";

const EXTRACTION_USER_PREFIX: &str =
    "Provide granular, micro level details from the document given here. ";

/// 读取文件、分析并返回指定页（从 1 开始）的文本
///
/// 页码不存在时返回空字符串
pub async fn extract_page_text<A>(analyzer: &A, pdf_path: &Path, page_number: u32) -> AppResult<String>
where
    A: DocumentAnalyzer + ?Sized,
{
    let document = tokio::fs::read(pdf_path)
        .await
        .map_err(|e| AppError::file_read_failed(pdf_path.display().to_string(), e))?;

    info!(
        "已读取 {}（{} 字节），提交文档分析...",
        pdf_path.display(),
        document.len()
    );

    let result = analyzer.analyze(&document).await?;
    info!("文档分析返回 {} 页", result.pages.len());

    Ok(result.page_text(page_number))
}

/// 构建发给模型的用户消息
pub fn build_extraction_message(page_text: &str) -> String {
    format!("{}Here is is the document: {}", EXTRACTION_USER_PREFIX, page_text)
}

/// 让模型提取页面的细节
pub async fn describe_page<M>(llm: &M, page_text: &str) -> AppResult<String>
where
    M: ChatModel + ?Sized,
{
    let user_message = build_extraction_message(page_text);
    llm.send_plain_to_llm(&user_message, Some(EXTRACTION_SYSTEM_MESSAGE), None)
        .await
}
