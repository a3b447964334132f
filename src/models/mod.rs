pub mod dimension;
pub mod document;
pub mod loaders;
pub mod record;
pub mod report;
pub mod rubric;

pub use dimension::Dimension;
pub use document::{AnalyzeResult, DocumentLine, DocumentPage};
pub use loaders::{load_rubric, load_rubric_or_default, TemplateLoader};
pub use record::{DimensionScores, EvaluationLog, EvaluationRecord};
pub use report::Report;
pub use rubric::{RubricOverrides, ScoringRubric};
