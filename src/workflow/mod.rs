pub mod page_extraction;
pub mod prompt_evaluator;

pub use page_extraction::{describe_page, extract_page_text};
pub use prompt_evaluator::{parse_score, PromptEvaluator};
