use std::path::PathBuf;

use tera::{Context, Tera};
use tracing::debug;

use crate::error::{AppError, AppResult, FileError};

/// 模板加载器
///
/// 按名称从模板目录读取模板并渲染（Jinja2 兼容语法）
pub struct TemplateLoader {
    template_dir: PathBuf,
    tera: Tera,
}

impl TemplateLoader {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            tera: Tera::default(),
        }
    }

    /// 使用空上下文渲染模板
    pub fn render(&mut self, template_name: &str) -> AppResult<String> {
        self.render_with(template_name, &Context::new())
    }

    /// 使用给定上下文渲染模板
    pub fn render_with(&mut self, template_name: &str, context: &Context) -> AppResult<String> {
        let path = self.template_dir.join(template_name);
        debug!("渲染模板: {}", path.display());

        if !path.is_file() {
            return Err(AppError::file_read_failed(
                path.display().to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "模板文件不存在"),
            ));
        }

        self.tera
            .add_template_file(&path, Some(template_name))
            .map_err(|e| template_failed(template_name, e))?;

        self.tera
            .render(template_name, context)
            .map_err(|e| template_failed(template_name, e))
    }
}

fn template_failed(name: &str, source: tera::Error) -> AppError {
    AppError::File(FileError::TemplateFailed {
        name: name.to_string(),
        source: Box::new(source),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_render_plain_and_with_context() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("plain.j2"), "You are a prompt reviewer.").unwrap();
        std::fs::write(
            dir.path().join("task.j2"),
            "Summarize {{ topic }}.{% if strict %} Be brief.{% endif %}",
        )
        .unwrap();

        let mut loader = TemplateLoader::new(dir.path());
        assert_eq!(loader.render("plain.j2").unwrap(), "You are a prompt reviewer.");

        let mut context = Context::new();
        context.insert("topic", "the report");
        context.insert("strict", &true);
        assert_eq!(
            loader.render_with("task.j2", &context).unwrap(),
            "Summarize the report. Be brief."
        );
    }

    #[test]
    fn test_missing_template_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = TemplateLoader::new(dir.path());
        let err = loader.render("absent.j2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}
