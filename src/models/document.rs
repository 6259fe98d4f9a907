//! 简历文件与提交输入

use std::path::Path;

use crate::error::{AppResult, FileError};

/// 唯一接受的简历文件类型
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// 文件来源
///
/// 两种来源走同一套校验规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    /// 手动选择文件
    Picker,
    /// 拖拽放入
    DragDrop,
}

/// 带声明类型的二进制文件
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// 从磁盘读取文件，按扩展名声明类型
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| FileError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "resume".to_string());

        Ok(Self::new(file_name, media_type_for(path), bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// 内容可能有几 MB，调试输出只打印长度
impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// 根据扩展名推断声明类型
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// 一次提交的全部输入
///
/// 每次换文件或改职位描述都整体替换，不做局部修改。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionInput {
    pub document: Option<Document>,
    pub job_description: String,
}

impl SubmissionInput {
    pub fn new(document: Option<Document>, job_description: impl Into<String>) -> Self {
        Self {
            document,
            job_description: job_description.into(),
        }
    }

    pub fn with_document(&self, document: Option<Document>) -> Self {
        Self {
            document,
            job_description: self.job_description.clone(),
        }
    }

    pub fn with_job_description(&self, job_description: impl Into<String>) -> Self {
        Self {
            document: self.document.clone(),
            job_description: job_description.into(),
        }
    }
}
