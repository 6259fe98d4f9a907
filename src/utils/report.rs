//! 终端报告渲染
//!
//! 只做展示：分数、进度条、亮点、改进建议、提示。

use std::fmt::Write;

use crate::models::{EvaluationResult, Notice, NoticeKind};
use crate::services::presentation::{PresentationState, ScoreBand};

const BAR_WIDTH: usize = 20;

/// 渲染一份分析结果
pub fn render_evaluation(evaluation: &EvaluationResult, state: &PresentationState) -> String {
    let mut out = String::new();

    let score = evaluation
        .score
        .map(|s| format!("{}", s))
        .unwrap_or_else(|| "N/A".to_string());
    let _ = writeln!(out, "Resume Score: {} ({})", score, state.band.label());
    let _ = writeln!(out, "{}", progress_bar(state));

    if let Some(highlights) = &evaluation.highlights {
        let _ = writeln!(out, "\nHighlights:");
        for item in highlights {
            let _ = writeln!(out, "  {} {}", band_marker(ScoreBand::High), item);
        }
    }

    if let Some(recommendations) = &evaluation.recommendations {
        let _ = writeln!(out, "\nRecommendations:");
        for item in recommendations {
            let _ = writeln!(out, "  - {}", item);
        }
    }

    out
}

/// 渲染一条提示，错误和普通提示用不同前缀
pub fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Error => format!("✗ {}", notice.text),
        NoticeKind::Info => format!("ℹ {}", notice.text),
    }
}

fn progress_bar(state: &PresentationState) -> String {
    let filled = ((state.fill_percent() / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {}",
        band_marker(state.band).repeat(filled),
        "·".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
        state.band.label()
    )
}

fn band_marker(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::High => "✓",
        ScoreBand::Medium => "~",
        ScoreBand::Low => "✗",
    }
}
