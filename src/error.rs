use thiserror::Error;

// ========== 用户可见提示文案 ==========

pub const MSG_MISSING_DOCUMENT: &str = "Please upload a PDF resume.";
pub const MSG_INVALID_DOCUMENT_TYPE: &str = "Please upload a valid PDF file.";
pub const MSG_MISSING_JOB_DESCRIPTION: &str = "Please provide a job description.";
pub const MSG_ANALYSIS_REJECTED: &str = "Failed to analyze the resume. Please try again.";
pub const MSG_SERVER_ERROR: &str = "Server error. Please try again.";
pub const MSG_NO_RESPONSE: &str = "No response from server. Please check your connection.";
pub const MSG_UNEXPECTED: &str = "Error processing your request. Please try again.";
pub const MSG_EXPORT_FAILED: &str = "Failed to download the analysis result. Please try again.";
pub const MSG_NOTHING_TO_EXPORT: &str = "No analysis result to export yet.";

/// 应用程序错误类型
///
/// 只覆盖程序运行环境层面的错误（配置、文件、HTTP 客户端构建）。
/// 提交流程中的业务失败见下方各自的类型，它们在组件边界就被转换成用户提示。
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// HTTP 客户端构建失败
    #[error("HTTP客户端初始化失败: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 输入校验失败
///
/// `Display` 输出即为展示给用户的提示文案。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// 没有选择简历文件
    #[error("{}", MSG_MISSING_DOCUMENT)]
    MissingDocument,
    /// 文件类型不是 PDF
    #[error("{}", MSG_INVALID_DOCUMENT_TYPE)]
    InvalidDocumentType { media_type: String },
    /// 职位描述为空（或只有空白）
    #[error("{}", MSG_MISSING_JOB_DESCRIPTION)]
    MissingJobDescription,
}

/// 分析接口调用失败
///
/// 只有两类：服务端可达但拒绝/返回异常内容（Service），
/// 或者服务端不可达/超时（Network）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisFailure {
    #[error("{message}")]
    Service { message: String },
    #[error("{message}")]
    Network { message: String },
}

impl AnalysisFailure {
    pub fn service(message: impl Into<String>) -> Self {
        AnalysisFailure::Service {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        AnalysisFailure::Network {
            message: message.into(),
        }
    }

    /// 连接失败、DNS 失败、超时：统一的网络提示
    pub fn no_response() -> Self {
        Self::network(MSG_NO_RESPONSE)
    }

    /// 兜底的服务端失败
    pub fn unexpected() -> Self {
        Self::service(MSG_UNEXPECTED)
    }
}

/// 分析结果解析失败
#[derive(Debug, Error)]
pub enum ParseError {
    /// 成功响应中缺少 analysis 字段
    #[error("响应中缺少 analysis 字段")]
    MissingAnalysis,
    /// choices[0].message.content 不是合法的 JSON
    #[error("嵌套的分析内容无法解析为 JSON: {source}")]
    NestedContent {
        content: String,
        #[source]
        source: serde_json::Error,
    },
    /// 分析对象的字段类型不符合预期
    #[error("分析结果结构不合法: {0}")]
    Shape(#[source] serde_json::Error),
}

/// 导出 PDF 失败
///
/// 所有变体展示给用户的都是同一句重试提示（无结果可导出除外），
/// 具体原因只进入日志。
#[derive(Debug, Error)]
pub enum ExportFailure {
    /// 还没有任何分析结果
    #[error("{}", MSG_NOTHING_TO_EXPORT)]
    NothingToExport,
    /// 网络请求失败或超时
    #[error("{}", MSG_EXPORT_FAILED)]
    Network { detail: String },
    /// 导出接口返回错误
    #[error("{}", MSG_EXPORT_FAILED)]
    Service {
        status: u16,
        message: Option<String>,
    },
    /// 保存到本地失败
    #[error("{}", MSG_EXPORT_FAILED)]
    Save(#[source] FileError),
}

impl ExportFailure {
    /// 日志用的详细原因
    pub fn detail(&self) -> String {
        match self {
            ExportFailure::NothingToExport => MSG_NOTHING_TO_EXPORT.to_string(),
            ExportFailure::Network { detail } => format!("网络错误: {}", detail),
            ExportFailure::Service { status, message } => {
                format!("导出接口返回错误: status={}, message={:?}", status, message)
            }
            ExportFailure::Save(e) => e.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        assert_eq!(
            ValidationFailure::MissingDocument.to_string(),
            "Please upload a PDF resume."
        );
        assert_eq!(
            ValidationFailure::InvalidDocumentType {
                media_type: "image/png".to_string()
            }
            .to_string(),
            "Please upload a valid PDF file."
        );
        assert_eq!(
            ValidationFailure::MissingJobDescription.to_string(),
            "Please provide a job description."
        );
    }

    #[test]
    fn test_export_failure_hides_detail_from_user() {
        let failure = ExportFailure::Service {
            status: 500,
            message: Some("reportlab exploded".to_string()),
        };
        assert_eq!(failure.to_string(), MSG_EXPORT_FAILED);
        assert!(failure.detail().contains("reportlab exploded"));
    }
}
