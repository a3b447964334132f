//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `evaluation_app` - 提示词评估
//! - 渲染模板、顺序评估每个提示词、输出报告
//!
//! ### `extraction_app` - PDF 单页提取
//! - 文档分析、取页、交给模型提取细节
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (应用生命周期、输出)
//!     ↓
//! workflow (PromptEvaluator / page_extraction)
//!     ↓
//! services (能力层：llm / document / result_writer)
//! ```

pub mod evaluation_app;
pub mod extraction_app;

pub use evaluation_app::EvaluationApp;
pub use extraction_app::{ExtractionApp, PageExtraction};
