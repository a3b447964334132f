//! 提示词评估流程 - 流程层
//!
//! 核心职责：定义"评估一个提示词"的完整流程
//!
//! 流程顺序：
//! 1. 主评估（system prompt + 待评估提示词）→ 打印并写入结果文件
//! 2. 按固定顺序逐个维度评分
//! 3. （可选）请求改写建议
//! 4. 写入评估日志
//!
//! 任一步失败都会中止后续步骤，但仍会写入一条带错误信息的记录

use std::time::Instant;

use chrono::Utc;
use tracing::{error, info};

use crate::error::{AppResult, LlmError};
use crate::models::{
    Dimension, DimensionScores, EvaluationLog, EvaluationRecord, Report, ScoringRubric,
};
use crate::services::{ChatModel, ResultWriter};
use crate::utils::logging::truncate_text;

/// 评分时使用确定性采样
const SCORING_TEMPERATURE: f32 = 0.0;

/// 一次评估过程中已经拿到的结果，失败时用于保留失败点之前的分数
#[derive(Default)]
struct Progress {
    response: Option<String>,
    scores: DimensionScores,
    revised_prompt: Option<String>,
}

/// 提示词评估器
///
/// - 持有模型、评分规则和结果写入服务
/// - 持有只追加的评估日志
/// - 由调用方构造一次后按引用传递，不依赖全局状态
pub struct PromptEvaluator<M: ChatModel> {
    llm: M,
    rubric: ScoringRubric,
    result_writer: ResultWriter,
    suggest_revision: bool,
    log: EvaluationLog,
}

impl<M: ChatModel> PromptEvaluator<M> {
    /// 创建新的评估器
    pub fn new(llm: M, rubric: ScoringRubric, result_writer: ResultWriter) -> Self {
        Self {
            llm,
            rubric,
            result_writer,
            suggest_revision: false,
            log: EvaluationLog::new(),
        }
    }

    /// 是否在评分后额外请求改写建议
    pub fn with_revision(mut self, enabled: bool) -> Self {
        self.suggest_revision = enabled;
        self
    }

    pub fn log(&self) -> &EvaluationLog {
        &self.log
    }

    /// 评估一个提示词
    ///
    /// 成功时返回主评估的回复；失败时记录错误并返回 `None`，错误不会向上传播
    pub async fn evaluate(
        &mut self,
        evaluator_system_prompt: &str,
        prompt_to_evaluate: &str,
    ) -> Option<String> {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut progress = Progress::default();

        info!(
            "开始评估提示词: {}",
            truncate_text(prompt_to_evaluate, 60)
        );

        let outcome = self
            .run(evaluator_system_prompt, prompt_to_evaluate, &mut progress)
            .await;
        let duration = start.elapsed().as_secs_f64();

        let record = match outcome {
            Ok(()) => EvaluationRecord {
                evaluator_system_prompt: evaluator_system_prompt.to_string(),
                prompt_to_evaluate: prompt_to_evaluate.to_string(),
                response: progress.response,
                duration,
                error: None,
                error_kind: None,
                scores: progress.scores,
                revised_prompt: progress.revised_prompt,
                started_at,
            },
            Err(e) => {
                error!("Error: {} ({:?})", e, e.kind());
                EvaluationRecord {
                    evaluator_system_prompt: evaluator_system_prompt.to_string(),
                    prompt_to_evaluate: prompt_to_evaluate.to_string(),
                    response: None,
                    duration,
                    error: Some(e.to_string()),
                    error_kind: Some(e.kind()),
                    scores: progress.scores,
                    revised_prompt: None,
                    started_at,
                }
            }
        };

        let response = record.response.clone();
        self.log.append(record);
        response
    }

    async fn run(
        &self,
        evaluator_system_prompt: &str,
        prompt_to_evaluate: &str,
        progress: &mut Progress,
    ) -> AppResult<()> {
        let response = self
            .llm
            .send_to_llm(
                prompt_to_evaluate,
                Some(evaluator_system_prompt),
                Some(SCORING_TEMPERATURE),
            )
            .await?;

        println!("----Eval output start:---- ");
        println!("{}", response);
        self.result_writer.write(&response).await?;
        println!("----Eval output end:---- ");

        progress.response = Some(response);

        for dimension in Dimension::ALL {
            let score = self.score(dimension, prompt_to_evaluate).await?;
            progress.scores.set(dimension, score);
        }

        if self.suggest_revision {
            progress.revised_prompt = Some(self.suggest_revision(prompt_to_evaluate).await?);
        }

        Ok(())
    }

    /// 按维度评分
    ///
    /// 评分指令作为 system 消息，待评估提示词作为 user 消息；
    /// 回复去掉首尾空白后必须是一个数字，不做范围裁剪
    pub async fn score(&self, dimension: Dimension, prompt_to_evaluate: &str) -> AppResult<f64> {
        let instruction = self.rubric.instruction_for(dimension, prompt_to_evaluate);
        let reply = self
            .llm
            .send_to_llm(
                prompt_to_evaluate,
                Some(&instruction),
                Some(SCORING_TEMPERATURE),
            )
            .await?;

        info!("{} 评分回复: {}", dimension, reply.trim());
        parse_score(&reply)
    }

    pub async fn score_clarity(&self, prompt_to_evaluate: &str) -> AppResult<f64> {
        self.score(Dimension::Clarity, prompt_to_evaluate).await
    }

    pub async fn score_relevance(&self, prompt_to_evaluate: &str) -> AppResult<f64> {
        self.score(Dimension::Relevance, prompt_to_evaluate).await
    }

    pub async fn score_completeness(&self, prompt_to_evaluate: &str) -> AppResult<f64> {
        self.score(Dimension::Completeness, prompt_to_evaluate).await
    }

    pub async fn score_role(&self, prompt_to_evaluate: &str) -> AppResult<f64> {
        self.score(Dimension::Role, prompt_to_evaluate).await
    }

    pub async fn score_context(&self, prompt_to_evaluate: &str) -> AppResult<f64> {
        self.score(Dimension::Context, prompt_to_evaluate).await
    }

    pub async fn score_examples(&self, prompt_to_evaluate: &str) -> AppResult<f64> {
        self.score(Dimension::Examples, prompt_to_evaluate).await
    }

    /// 请求一个按提示词工程最佳实践改写后的版本
    pub async fn suggest_revision(&self, prompt_to_evaluate: &str) -> AppResult<String> {
        let instruction = self.rubric.revision_instruction(prompt_to_evaluate);
        let reply = self
            .llm
            .send_to_llm(
                prompt_to_evaluate,
                Some(&instruction),
                Some(SCORING_TEMPERATURE),
            )
            .await?;

        info!("改写建议: {}", truncate_text(reply.trim(), 80));
        Ok(reply.trim().to_string())
    }

    /// 基于当前日志计算报告
    pub fn report(&self) -> Report {
        Report::from_records(self.log.records())
    }

    /// 生成缩进的 JSON 报告
    pub fn generate_report(&self) -> serde_json::Result<String> {
        self.report().to_pretty_json()
    }
}

/// 把模型回复解析为分数
pub fn parse_score(reply: &str) -> AppResult<f64> {
    let trimmed = reply.trim();
    match trimmed.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(LlmError::ScoreParseFailed {
            response: trimmed.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ErrorKind};

    #[test]
    fn test_parse_score_bare_numbers() {
        assert_eq!(parse_score("7").unwrap(), 7.0);
        assert_eq!(parse_score("  8.5\n").unwrap(), 8.5);
        // 不做范围裁剪
        assert_eq!(parse_score("11").unwrap(), 11.0);
        assert_eq!(parse_score("-2").unwrap(), -2.0);
    }

    #[test]
    fn test_parse_score_rejects_text() {
        for reply in ["Score: 7", "7/10", "seven", "", "NaN", "inf"] {
            let err = parse_score(reply).unwrap_err();
            assert!(
                matches!(err, AppError::Llm(LlmError::ScoreParseFailed { .. })),
                "{reply:?} 应该解析失败"
            );
            assert_eq!(err.kind(), ErrorKind::MalformedOutput);
        }
    }
}
