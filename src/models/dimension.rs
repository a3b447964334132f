//! 评分维度

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// 评分维度
///
/// 每个维度独立评分，评分顺序固定为 [`Dimension::ALL`] 的顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// 清晰度
    Clarity,
    /// 相关性
    Relevance,
    /// 完整性
    Completeness,
    /// 是否给出角色 / 身份
    Role,
    /// 是否给出上下文 / 依据数据
    Context,
    /// 是否给出示例
    Examples,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Clarity,
        Dimension::Relevance,
        Dimension::Completeness,
        Dimension::Role,
        Dimension::Context,
        Dimension::Examples,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Clarity => "clarity",
            Dimension::Relevance => "relevance",
            Dimension::Completeness => "completeness",
            Dimension::Role => "role",
            Dimension::Context => "context",
            Dimension::Examples => "examples",
        }
    }

    /// 默认评分指令，`{prompt}` 会被替换为待评估的提示词
    pub fn default_instruction(self) -> &'static str {
        match self {
            Dimension::Clarity => {
                "Rate the clarity of the following prompt on a scale of 1 to 10. Don't perform the task mentioned in prompt. Only rate it. Just return numeric answer, no text.:\n\n{prompt}"
            }
            Dimension::Relevance => {
                "Rate the relevance of the following prompt on a scale of 1 to 10. Just return numeric answer, no text.:\n\nPrompt: {prompt}"
            }
            Dimension::Completeness => {
                "Based on the content of the response, determine the completeness of the response in addressing the prompt. If the response is incomplete or does not fully address the prompt, the rating should be low. If the response is complete and fully addresses the prompt, rate the completeness accordingly. Just do the rating. Just return the numeric answer, no text.:\n\nPrompt: {prompt}"
            }
            Dimension::Role => {
                "Based on the content of the prompt, determine the availability of role or identity provided within it. If there is no role or identity, the rating should be 1. If there is role or identity, rate the availability accordingly. Just return the numeric answer, no text.:\n\nPrompt: {prompt}"
            }
            Dimension::Context => {
                "Based on the content of the prompt, determine the availability of context or grounding data provided within it. If there is no context or grounding data, the rating should be 1. If there is context or grounding data, rate the availability accordingly. Just return the numeric answer, no text.:\n\nPrompt: {prompt}"
            }
            Dimension::Examples => {
                "Based on the content of the prompt for GPT-4o, determine the availability of examples provided within it. If there are no examples, the rating should be 1. If there are examples, rate the availability accordingly. Just return the numeric answer, no text.:\n\nPrompt: {prompt}"
            }
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
