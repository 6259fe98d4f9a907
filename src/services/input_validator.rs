//! 输入校验服务 - 业务能力层
//!
//! 只负责"提交前检查输入"能力，不发起任何网络请求

use tracing::debug;

use crate::error::ValidationFailure;
use crate::models::{Document, DocumentSource, SubmissionInput, PDF_MEDIA_TYPE};

/// 输入校验
///
/// 职责：
/// - 检查简历文件是否存在、类型是否为 PDF
/// - 检查职位描述是否为空
/// - 手动选择和拖拽放入走同一条规则
#[derive(Debug, Default, Clone, Copy)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    /// 提交前的完整校验
    pub fn validate(&self, input: &SubmissionInput) -> Result<(), ValidationFailure> {
        let document = input
            .document
            .as_ref()
            .ok_or(ValidationFailure::MissingDocument)?;

        self.check_document_type(document)?;

        if input.job_description.trim().is_empty() {
            return Err(ValidationFailure::MissingJobDescription);
        }

        Ok(())
    }

    /// 选择文件时的校验
    pub fn accept_document(
        &self,
        document: Document,
        source: DocumentSource,
    ) -> Result<Document, ValidationFailure> {
        debug!(
            "收到文件 {} (来源: {:?}, 类型: {})",
            document.file_name, source, document.media_type
        );
        self.check_document_type(&document)?;
        Ok(document)
    }

    fn check_document_type(&self, document: &Document) -> Result<(), ValidationFailure> {
        if document.media_type == PDF_MEDIA_TYPE {
            Ok(())
        } else {
            Err(ValidationFailure::InvalidDocumentType {
                media_type: document.media_type.clone(),
            })
        }
    }
}
