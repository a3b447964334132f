//! 评估记录

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ErrorKind;
use crate::models::dimension::Dimension;

/// 六个维度的分数，缺失表示未评分（失败或中途中止）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DimensionScores {
    pub clarity_score: Option<f64>,
    pub relevance_score: Option<f64>,
    pub completeness_score: Option<f64>,
    pub role_score: Option<f64>,
    pub context_score: Option<f64>,
    pub examples_score: Option<f64>,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Clarity => self.clarity_score,
            Dimension::Relevance => self.relevance_score,
            Dimension::Completeness => self.completeness_score,
            Dimension::Role => self.role_score,
            Dimension::Context => self.context_score,
            Dimension::Examples => self.examples_score,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: f64) {
        let slot = match dimension {
            Dimension::Clarity => &mut self.clarity_score,
            Dimension::Relevance => &mut self.relevance_score,
            Dimension::Completeness => &mut self.completeness_score,
            Dimension::Role => &mut self.role_score,
            Dimension::Context => &mut self.context_score,
            Dimension::Examples => &mut self.examples_score,
        };
        *slot = Some(score);
    }

    /// 是否六个维度都有分数
    pub fn is_complete(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.get(*d).is_some())
    }
}

/// 一次评估的结果记录
///
/// 创建后不再修改，按追加顺序保存在评估日志中
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    pub evaluator_system_prompt: String,
    pub prompt_to_evaluate: String,
    pub response: Option<String>,
    /// 耗时（秒）
    pub duration: f64,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
    #[serde(flatten)]
    pub scores: DimensionScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// 评估日志（只追加）
#[derive(Debug, Default)]
pub struct EvaluationLog {
    records: Vec<EvaluationRecord>,
}

impl EvaluationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: EvaluationRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
