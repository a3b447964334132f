pub mod document_service;
pub mod llm_service;
pub mod result_writer;

pub use document_service::{DocumentAnalyzer, DocumentService};
pub use llm_service::{ChatModel, LlmService};
pub use result_writer::ResultWriter;
