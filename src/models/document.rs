//! 文档分析结果（只保留用到的字段）

use serde::Deserialize;

/// 分析结果
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    #[serde(default)]
    pub pages: Vec<DocumentPage>,
}

/// 单页
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    /// 页码，从 1 开始
    pub page_number: u32,
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

/// 一行文本
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentLine {
    pub content: String,
}

impl AnalyzeResult {
    /// 取出指定页的全部文本行，每行后跟换行符
    ///
    /// 只取第一个页码匹配的页；没有匹配的页时返回空字符串
    pub fn page_text(&self, page_number: u32) -> String {
        let Some(page) = self.pages.iter().find(|p| p.page_number == page_number) else {
            return String::new();
        };

        let mut text = String::new();
        for line in &page.lines {
            text.push_str(&line.content);
            text.push('\n');
        }
        text
    }
}
