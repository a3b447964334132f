//! # Prompt Eval
//!
//! 调用云端 AI 服务的两个小工具：
//! - 提示词评估：让模型对一个提示词做整体评价，并按六个维度打分，汇总成 JSON 报告
//! - PDF 单页提取：通过文档分析服务取出某一页的文本，再交给模型提取细节
//!
//! ## 架构设计
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `LlmService` - 对话能力（实现 `ChatModel`）
//! - `DocumentService` - 文档分析能力（实现 `DocumentAnalyzer`）
//! - `ResultWriter` - 写结果文件能力
//!
//! ### ② 流程层（Workflow）
//! - `PromptEvaluator` - 主评估 → 逐维度评分 → 写入评估日志
//! - `page_extraction` - 读文件 → 分析 → 取页 → 交给模型
//!
//! ### ③ 编排层（Orchestration）
//! - `EvaluationApp` / `ExtractionApp` - 读取配置、驱动流程、输出结果
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{DocumentSettings, EvaluationSettings, ExtractionSettings, LlmSettings};
pub use error::{AppError, AppResult, ErrorKind};
pub use models::{Dimension, EvaluationRecord, Report, ScoringRubric};
pub use orchestrator::{EvaluationApp, ExtractionApp};
pub use services::{ChatModel, DocumentAnalyzer};
pub use workflow::PromptEvaluator;
