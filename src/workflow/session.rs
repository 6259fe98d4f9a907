//! 分析会话上下文
//!
//! 集中保存一次分析会话中的全部可变状态：当前输入、最近一次成功的分析结果、
//! 当前提示、状态机所处状态。只有编排层可以修改，展示层只拿到 [`SessionView`]。

use crate::models::{Document, EvaluationResult, Notice, SubmissionInput, SubmissionOutcome};
use crate::services::presentation::{derive, PresentationState};

/// 终态的两种结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Success,
    Failure,
}

/// 提交状态机
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Normalizing,
    Displaying(Settled),
}

impl SubmissionState {
    /// 是否有提交正在进行（此时拒绝新的提交）
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionState::Validating | SubmissionState::Submitting | SubmissionState::Normalizing
        )
    }
}

/// 会话上下文
#[derive(Debug, Default)]
pub struct Session {
    input: SubmissionInput,
    state: SubmissionState,
    evaluation: Option<EvaluationResult>,
    notice: Option<Notice>,
    attempt: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn input(&self) -> &SubmissionInput {
        &self.input
    }

    pub fn evaluation(&self) -> Option<&EvaluationResult> {
        self.evaluation.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// 替换简历文件
    pub(crate) fn replace_document(&mut self, document: Option<Document>) {
        self.input = self.input.with_document(document);
        self.record_edit();
    }

    /// 替换职位描述
    pub(crate) fn replace_job_description(&mut self, job_description: String) {
        self.input = self.input.with_job_description(job_description);
        self.record_edit();
    }

    // 编辑总是清掉提示；没有提交在进行时回到 Idle
    fn record_edit(&mut self) {
        self.notice = None;
        if !self.state.is_in_flight() {
            self.state = SubmissionState::Idle;
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// 开始一次新的提交
    ///
    /// 已有提交在进行时返回 `None`；否则清掉旧提示、进入 Validating，
    /// 并返回本次尝试编号和输入快照。
    pub(crate) fn begin_attempt(&mut self) -> Option<(u64, SubmissionInput)> {
        if self.state.is_in_flight() {
            return None;
        }
        self.attempt += 1;
        self.state = SubmissionState::Validating;
        self.notice = None;
        Some((self.attempt, self.input.clone()))
    }

    /// 推进进行中的提交，过期的尝试不生效
    pub(crate) fn advance(&mut self, attempt: u64, state: SubmissionState) {
        if attempt == self.attempt && self.state.is_in_flight() {
            self.state = state;
        }
    }

    /// 落定一次提交
    ///
    /// 成功时覆盖分析结果并清掉提示；失败时只替换提示，保留之前的分析结果。
    /// 返回是否生效。
    pub(crate) fn settle(&mut self, attempt: u64, outcome: &SubmissionOutcome) -> bool {
        if attempt != self.attempt || !self.state.is_in_flight() {
            return false;
        }

        match outcome {
            SubmissionOutcome::Success(evaluation) => {
                self.evaluation = Some(evaluation.clone());
                self.notice = None;
                self.state = SubmissionState::Displaying(Settled::Success);
            }
            failure => {
                self.notice = failure.notice();
                self.state = SubmissionState::Displaying(Settled::Failure);
            }
        }
        true
    }

    /// 未落定就被放弃的提交（调用方取消了 future），回到 Idle
    pub(crate) fn abandon(&mut self, attempt: u64) {
        if attempt == self.attempt && self.state.is_in_flight() {
            self.state = SubmissionState::Idle;
        }
    }

    /// 只读快照
    pub fn view(&self) -> SessionView {
        SessionView {
            state: self.state,
            evaluation: self.evaluation.clone(),
            notice: self.notice.clone(),
            document_name: self.input.document.as_ref().map(|d| d.file_name.clone()),
            job_description: self.input.job_description.clone(),
        }
    }
}

/// 展示层看到的只读视图
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub state: SubmissionState,
    pub evaluation: Option<EvaluationResult>,
    pub notice: Option<Notice>,
    pub document_name: Option<String>,
    pub job_description: String,
}

impl SessionView {
    /// 每次读取都重新推导，不缓存
    pub fn presentation(&self) -> Option<PresentationState> {
        self.evaluation.as_ref().map(derive)
    }

    /// 至少成功过一次之后就可以导出
    pub fn export_available(&self) -> bool {
        self.evaluation.is_some()
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        !self.state.is_in_flight()
    }
}
