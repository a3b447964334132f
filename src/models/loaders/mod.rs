pub mod rubric_loader;
pub mod template_loader;

pub use rubric_loader::{load_rubric, load_rubric_or_default};
pub use template_loader::TemplateLoader;
