//! 提交编排器 - 编排层
//!
//! ## 职责
//!
//! 把输入校验、分析请求、结果规范化串成用户可见的完整流程：
//!
//! ```text
//! Idle → Validating → Submitting → Normalizing → Displaying(Success | Failure)
//! ```
//!
//! - 同一时刻只允许一个分析请求在进行，重复提交直接忽略
//! - 会话状态只在这里修改，锁从不跨越网络等待
//! - 导出是独立的旁路操作，不推进状态机，使用调用时刻的分析结果

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppResult, ExportFailure, ValidationFailure};
use crate::models::{Document, DocumentSource, Notice, SubmissionOutcome};
use crate::services::{normalize_outcome, AnalysisClient, ExportClient, InputValidator};
use crate::workflow::{Session, SessionView, SubmissionState};

/// 一次提交请求的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitDisposition {
    /// 完成了一次提交尝试
    Settled(SubmissionOutcome),
    /// 已有提交在进行，本次被忽略
    Ignored,
}

impl SubmitDisposition {
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        match self {
            SubmitDisposition::Settled(outcome) => Some(outcome),
            SubmitDisposition::Ignored => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, SubmitDisposition::Ignored)
    }
}

/// 提交编排器
///
/// 可以放进 `Arc` 在多个任务间共享。
pub struct SubmissionOrchestrator {
    validator: InputValidator,
    analysis: AnalysisClient,
    export: ExportClient,
    session: Mutex<Session>,
}

impl SubmissionOrchestrator {
    /// 根据配置创建，两个客户端共用一个连接池
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder().build()?;

        let analysis =
            AnalysisClient::with_client(http.clone(), config.analysis_url(), config.request_timeout());
        let export = ExportClient::with_client(
            http,
            config.export_url(),
            config.export_timeout(),
            &config.export_dir,
            &config.export_file_name,
        );

        Ok(Self::with_clients(analysis, export))
    }

    pub fn with_clients(analysis: AnalysisClient, export: ExportClient) -> Self {
        Self {
            validator: InputValidator::new(),
            analysis,
            export,
            session: Mutex::new(Session::new()),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 当前会话的只读视图
    pub fn view(&self) -> SessionView {
        self.session().view()
    }

    // ========== 输入编辑 ==========

    /// 选择简历文件（手动选择或拖拽）
    ///
    /// 非 PDF 文件会清空当前选择并显示错误提示。
    pub fn select_document(
        &self,
        document: Document,
        source: DocumentSource,
    ) -> Result<(), ValidationFailure> {
        match self.validator.accept_document(document, source) {
            Ok(document) => {
                info!("📎 已选择简历: {} ({} 字节)", document.file_name, document.len());
                self.session().replace_document(Some(document));
                Ok(())
            }
            Err(failure) => {
                warn!("⚠️ 文件被拒绝: {:?}", failure);
                let mut session = self.session();
                session.replace_document(None);
                session.set_notice(Notice::error(failure.to_string()));
                Err(failure)
            }
        }
    }

    /// 清空简历文件
    pub fn clear_document(&self) {
        self.session().replace_document(None);
    }

    /// 修改职位描述
    pub fn set_job_description(&self, job_description: impl Into<String>) {
        self.session().replace_job_description(job_description.into());
    }

    // ========== 提交 ==========

    /// 提交当前输入
    ///
    /// 已有提交在进行时返回 [`SubmitDisposition::Ignored`]，不发起任何请求。
    pub async fn submit(&self) -> SubmitDisposition {
        let started = self.session().begin_attempt();
        let Some((attempt, input)) = started else {
            info!("⏳ 已有分析请求在进行中，忽略本次提交");
            return SubmitDisposition::Ignored;
        };

        let mut guard = AttemptGuard {
            session: &self.session,
            attempt,
            settled: false,
        };

        // Validating
        if let Err(failure) = self.validator.validate(&input) {
            info!("✗ 输入校验未通过: {}", failure);
            let outcome = SubmissionOutcome::from(failure);
            guard.settle(&outcome);
            return SubmitDisposition::Settled(outcome);
        }

        // Submitting
        self.session().advance(attempt, SubmissionState::Submitting);
        info!("🔍 [第 {} 次提交] 正在分析简历...", attempt);

        let raw = match self.analysis.fetch(&input).await {
            Ok(raw) => raw,
            Err(failure) => {
                error!("[第 {} 次提交] ❌ 分析失败: {}", attempt, failure);
                let outcome = SubmissionOutcome::from(failure);
                guard.settle(&outcome);
                return SubmitDisposition::Settled(outcome);
            }
        };

        // Normalizing
        self.session().advance(attempt, SubmissionState::Normalizing);
        let outcome = normalize_outcome(raw);

        if let SubmissionOutcome::Success(evaluation) = &outcome {
            info!(
                "[第 {} 次提交] ✓ 分析完成，得分: {:?}",
                attempt, evaluation.score
            );
        }

        guard.settle(&outcome);
        SubmitDisposition::Settled(outcome)
    }

    // ========== 导出 ==========

    /// 导出最近一次成功的分析结果为 PDF 并保存到本地
    ///
    /// 使用调用时刻的分析结果；失败只替换提示，不影响已显示的分析结果。
    pub async fn export(&self) -> Result<PathBuf, ExportFailure> {
        let captured = self.session().evaluation().cloned();
        let Some(evaluation) = captured else {
            warn!("⚠️ 还没有可导出的分析结果");
            self.session()
                .set_notice(Notice::error(ExportFailure::NothingToExport.to_string()));
            return Err(ExportFailure::NothingToExport);
        };

        match self.export.export_and_save(&evaluation).await {
            Ok(path) => {
                self.session().set_notice(Notice::info(format!(
                    "Analysis exported to {}",
                    path.display()
                )));
                Ok(path)
            }
            Err(failure) => {
                error!("❌ 导出失败: {}", failure.detail());
                self.session().set_notice(Notice::error(failure.to_string()));
                Err(failure)
            }
        }
    }
}

/// 保证每次提交都会落定
///
/// 如果提交的 future 在途中被丢弃，会话回到 Idle，允许再次提交。
struct AttemptGuard<'a> {
    session: &'a Mutex<Session>,
    attempt: u64,
    settled: bool,
}

impl AttemptGuard<'_> {
    fn settle(&mut self, outcome: &SubmissionOutcome) {
        let mut session = self.session.lock().unwrap_or_else(|p| p.into_inner());
        session.settle(self.attempt, outcome);
        self.settled = true;
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("⚠️ 第 {} 次提交未完成即被取消", self.attempt);
            let mut session = self.session.lock().unwrap_or_else(|p| p.into_inner());
            session.abandon(self.attempt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PDF_MEDIA_TYPE;
    use crate::workflow::Settled;
    use std::time::Duration;

    fn offline_orchestrator() -> SubmissionOrchestrator {
        let http = reqwest::Client::new();
        SubmissionOrchestrator::with_clients(
            AnalysisClient::with_client(http.clone(), "http://127.0.0.1:9/upload", Duration::from_secs(1)),
            ExportClient::with_client(
                http,
                "http://127.0.0.1:9/download-analysis",
                Duration::from_secs(1),
                ".",
                "analysis_result.pdf",
            ),
        )
    }

    #[tokio::test]
    async fn test_validation_failure_without_network() {
        let orchestrator = offline_orchestrator();
        orchestrator.set_job_description("Rust engineer");

        let disposition = orchestrator.submit().await;
        assert_eq!(
            disposition,
            SubmitDisposition::Settled(SubmissionOutcome::ValidationFailure(
                "Please upload a PDF resume.".to_string()
            ))
        );

        let view = orchestrator.view();
        assert_eq!(view.state, SubmissionState::Displaying(Settled::Failure));
        assert!(view.notice.unwrap().is_error());
    }

    #[test]
    fn test_rejected_document_clears_selection() {
        let orchestrator = offline_orchestrator();
        orchestrator
            .select_document(
                Document::new("cv.pdf", PDF_MEDIA_TYPE, b"%PDF".to_vec()),
                DocumentSource::Picker,
            )
            .unwrap();
        assert_eq!(orchestrator.view().document_name.as_deref(), Some("cv.pdf"));

        let err = orchestrator
            .select_document(
                Document::new("cv.png", "image/png", vec![0x89]),
                DocumentSource::DragDrop,
            )
            .unwrap_err();

        let view = orchestrator.view();
        assert!(matches!(err, ValidationFailure::InvalidDocumentType { .. }));
        assert_eq!(view.document_name, None);
        assert_eq!(
            view.notice,
            Some(Notice::error("Please upload a valid PDF file."))
        );
    }

    #[test]
    fn test_edit_clears_notice() {
        let orchestrator = offline_orchestrator();
        let _ = orchestrator.select_document(
            Document::new("cv.txt", "text/plain", vec![]),
            DocumentSource::Picker,
        );
        assert!(orchestrator.view().notice.is_some());

        orchestrator.set_job_description("Platform engineer");
        assert!(orchestrator.view().notice.is_none());
    }

    #[tokio::test]
    async fn test_export_without_evaluation() {
        let orchestrator = offline_orchestrator();
        let err = orchestrator.export().await.unwrap_err();
        assert!(matches!(err, ExportFailure::NothingToExport));
        assert_eq!(
            orchestrator.view().notice,
            Some(Notice::error("No analysis result to export yet."))
        );
    }

    #[tokio::test]
    async fn test_dropped_submission_releases_slot() {
        let orchestrator = offline_orchestrator();
        orchestrator
            .select_document(
                Document::new("cv.pdf", PDF_MEDIA_TYPE, b"%PDF".to_vec()),
                DocumentSource::Picker,
            )
            .unwrap();
        orchestrator.set_job_description("Rust engineer");

        {
            let pending = orchestrator.submit();
            // 只轮询一次就丢弃
            let _ = tokio::time::timeout(Duration::from_millis(0), pending).await;
        }

        assert!(orchestrator.view().can_submit());
    }
}
