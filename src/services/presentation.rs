//! 展示状态推导
//!
//! 纯函数：只由分析结果计算，每次读取时重新计算，不做缓存。

use crate::models::EvaluationResult;

/// 高分档阈值（严格大于）
pub const HIGH_SCORE_THRESHOLD: f64 = 7.0;
/// 中分档阈值（严格大于）
pub const MEDIUM_SCORE_THRESHOLD: f64 = 4.0;

/// 分数档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    /// score > 7 为高，4 < score <= 7 为中，其余（含缺失）为低
    pub fn for_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s > HIGH_SCORE_THRESHOLD => ScoreBand::High,
            Some(s) if s > MEDIUM_SCORE_THRESHOLD => ScoreBand::Medium,
            _ => ScoreBand::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

/// 展示用的派生状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationState {
    /// 进度值，直接等于分数
    pub progress: f64,
    pub band: ScoreBand,
}

impl PresentationState {
    /// 进度条填充百分比，仅用于绘制
    pub fn fill_percent(&self) -> f64 {
        self.progress.clamp(0.0, 100.0)
    }
}

/// 由分析结果推导展示状态
pub fn derive(evaluation: &EvaluationResult) -> PresentationState {
    let score = evaluation.score.filter(|s| s.is_finite());
    PresentationState {
        progress: score.unwrap_or(0.0),
        band: ScoreBand::for_score(score),
    }
}
