//! 提交结果与用户提示

use crate::error::{AnalysisFailure, ValidationFailure};
use crate::models::evaluation::EvaluationResult;

/// 提示类型
///
/// 展示层按类型区分样式，不去猜测文案内容。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

/// 展示给用户的单条提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// 一次提交尝试的结果，每次尝试恰好产生一个
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(EvaluationResult),
    ValidationFailure(String),
    ServiceFailure(String),
    NetworkFailure(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn evaluation(&self) -> Option<&EvaluationResult> {
        match self {
            SubmissionOutcome::Success(evaluation) => Some(evaluation),
            _ => None,
        }
    }

    /// 失败时对应的错误提示；成功时没有提示
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SubmissionOutcome::Success(_) => None,
            SubmissionOutcome::ValidationFailure(message)
            | SubmissionOutcome::ServiceFailure(message)
            | SubmissionOutcome::NetworkFailure(message) => Some(Notice::error(message.clone())),
        }
    }
}

impl From<ValidationFailure> for SubmissionOutcome {
    fn from(failure: ValidationFailure) -> Self {
        SubmissionOutcome::ValidationFailure(failure.to_string())
    }
}

impl From<AnalysisFailure> for SubmissionOutcome {
    fn from(failure: AnalysisFailure) -> Self {
        match failure {
            AnalysisFailure::Service { message } => SubmissionOutcome::ServiceFailure(message),
            AnalysisFailure::Network { message } => SubmissionOutcome::NetworkFailure(message),
        }
    }
}
