//! 评估报告
//!
//! 根据当前的评估日志即时计算汇总统计，不修改日志

use serde::Serialize;

use crate::models::dimension::Dimension;
use crate::models::record::EvaluationRecord;

/// 汇总报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub average_duration: f64,
    pub average_clarity_score: f64,
    pub average_relevance_score: f64,
    pub average_completeness_score: f64,
    pub average_role_score: f64,
    pub average_context_score: f64,
    pub average_examples_score: f64,
    pub errors: Vec<String>,
    pub revised_prompts: Vec<String>,
}

impl Report {
    pub fn from_records(records: &[EvaluationRecord]) -> Self {
        let successful_requests = records.iter().filter(|r| r.is_success()).count();
        let score_average =
            |dimension: Dimension| mean(records.iter().filter_map(|r| r.scores.get(dimension)));

        Self {
            total_requests: records.len(),
            successful_requests,
            failed_requests: records.len() - successful_requests,
            average_duration: mean(records.iter().map(|r| r.duration)),
            average_clarity_score: score_average(Dimension::Clarity),
            average_relevance_score: score_average(Dimension::Relevance),
            average_completeness_score: score_average(Dimension::Completeness),
            average_role_score: score_average(Dimension::Role),
            average_context_score: score_average(Dimension::Context),
            average_examples_score: score_average(Dimension::Examples),
            errors: records.iter().filter_map(|r| r.error.clone()).collect(),
            revised_prompts: records
                .iter()
                .filter_map(|r| r.revised_prompt.clone())
                .collect(),
        }
    }

    /// 序列化为缩进 4 格的 JSON
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json 只会写出合法的 UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// 算术平均，没有数据时为 0
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
