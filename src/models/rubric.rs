//! 评分规则
//!
//! 保存每个维度的评分指令模板以及"改写建议"指令模板

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::dimension::Dimension;

const PROMPT_PLACEHOLDER: &str = "{prompt}";

const DEFAULT_REVISION_INSTRUCTION: &str = "Suggest revised prompt for this prompt based on prompt engineering best practices. Do not perform the actual task asked in prompt. Just make the prompt itself better.:\n\nPrompt: {prompt}";

/// 评分规则
#[derive(Debug, Clone)]
pub struct ScoringRubric {
    instructions: BTreeMap<Dimension, String>,
    revision_instruction: String,
}

/// 评分规则覆盖文件（TOML）的内容，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RubricOverrides {
    pub clarity: Option<String>,
    pub relevance: Option<String>,
    pub completeness: Option<String>,
    pub role: Option<String>,
    pub context: Option<String>,
    pub examples: Option<String>,
    pub revision: Option<String>,
}

impl Default for ScoringRubric {
    fn default() -> Self {
        Self {
            instructions: Dimension::ALL
                .iter()
                .map(|d| (*d, d.default_instruction().to_string()))
                .collect(),
            revision_instruction: DEFAULT_REVISION_INSTRUCTION.to_string(),
        }
    }
}

impl ScoringRubric {
    /// 替换某个维度的评分指令
    pub fn with_instruction(mut self, dimension: Dimension, template: impl Into<String>) -> Self {
        self.instructions.insert(dimension, template.into());
        self
    }

    /// 替换改写建议指令
    pub fn with_revision_instruction(mut self, template: impl Into<String>) -> Self {
        self.revision_instruction = template.into();
        self
    }

    /// 在默认规则上应用覆盖项
    pub fn apply(self, overrides: RubricOverrides) -> Self {
        let RubricOverrides {
            clarity,
            relevance,
            completeness,
            role,
            context,
            examples,
            revision,
        } = overrides;

        let mut rubric = self;
        for (dimension, template) in [
            (Dimension::Clarity, clarity),
            (Dimension::Relevance, relevance),
            (Dimension::Completeness, completeness),
            (Dimension::Role, role),
            (Dimension::Context, context),
            (Dimension::Examples, examples),
        ] {
            if let Some(template) = template {
                rubric = rubric.with_instruction(dimension, template);
            }
        }
        if let Some(template) = revision {
            rubric = rubric.with_revision_instruction(template);
        }
        rubric
    }

    /// 生成某个维度的评分指令
    pub fn instruction_for(&self, dimension: Dimension, prompt: &str) -> String {
        let template = self
            .instructions
            .get(&dimension)
            .map(String::as_str)
            .unwrap_or_else(|| dimension.default_instruction());
        render(template, prompt)
    }

    /// 生成改写建议指令
    pub fn revision_instruction(&self, prompt: &str) -> String {
        render(&self.revision_instruction, prompt)
    }
}

fn render(template: &str, prompt: &str) -> String {
    template.replace(PROMPT_PLACEHOLDER, prompt)
}
