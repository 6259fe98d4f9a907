//! 分析接口客户端 - 业务能力层
//!
//! 只负责"提交简历并拿到原始结果"能力：
//! - 构造 multipart 请求（`file` + `jobDescription`）
//! - 整个请求（发送 + 读取响应体）受固定超时约束
//! - 把所有失败归类为 Service / Network 两种，绝不向上抛出未处理的错误

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AnalysisFailure, AppResult, MSG_ANALYSIS_REJECTED, MSG_SERVER_ERROR};
use crate::models::response::message_field;
use crate::models::{AnalysisResponseBody, RawAnalysisResponse, SubmissionInput, SubmissionOutcome};
use crate::services::result_normalizer::normalize_outcome;
use crate::utils::logging::truncate_text;

/// 分析接口客户端
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl AnalysisClient {
    /// 根据配置创建客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(
            http,
            config.analysis_url(),
            config.request_timeout(),
        ))
    }

    /// 复用已有的 HTTP 客户端
    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 提交并规范化，返回一次完整的提交结果
    ///
    /// 调用方拿到的永远是 [`SubmissionOutcome`]，不会是错误。
    pub async fn submit(&self, input: &SubmissionInput) -> SubmissionOutcome {
        match self.fetch(input).await {
            Ok(raw) => normalize_outcome(raw),
            Err(failure) => failure.into(),
        }
    }

    /// 只做网络交互，返回未规范化的原始结果
    pub async fn fetch(&self, input: &SubmissionInput) -> Result<RawAnalysisResponse, AnalysisFailure> {
        let form = build_form(input)?;

        info!("📤 正在提交简历到分析服务: {}", self.endpoint);
        debug!(
            "职位描述: {}",
            truncate_text(input.job_description.trim(), 80)
        );

        match tokio::time::timeout(self.timeout, self.exchange(form)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("⏱️ 分析请求超时 ({} 秒)，放弃等待", self.timeout.as_secs_f64());
                Err(AnalysisFailure::no_response())
            }
        }
    }

    async fn exchange(&self, form: Form) -> Result<RawAnalysisResponse, AnalysisFailure> {
        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        debug!("分析服务响应状态: {}", status);

        let body = response.bytes().await.map_err(classify_transport_error)?;

        interpret_response(status, &body)
    }
}

/// 构造 multipart 请求体
fn build_form(input: &SubmissionInput) -> Result<Form, AnalysisFailure> {
    let document = input.document.as_ref().ok_or_else(|| {
        warn!("⚠️ 提交时没有简历文件");
        AnalysisFailure::unexpected()
    })?;

    let part = Part::bytes(document.bytes.clone())
        .file_name(document.file_name.clone())
        .mime_str(&document.media_type)
        .map_err(|e| {
            warn!("⚠️ 无法构造文件字段: {}", e);
            AnalysisFailure::unexpected()
        })?;

    Ok(Form::new()
        .part("file", part)
        .text("jobDescription", input.job_description.clone()))
}

/// 没有拿到响应的传输错误统一视为网络问题
fn classify_transport_error(err: reqwest::Error) -> AnalysisFailure {
    if err.is_builder() {
        warn!("⚠️ 请求构造失败: {}", err);
        AnalysisFailure::unexpected()
    } else {
        warn!("🌐 无法连接分析服务: {}", err);
        AnalysisFailure::no_response()
    }
}

/// 按状态码和响应体判定结果
fn interpret_response(status: StatusCode, body: &[u8]) -> Result<RawAnalysisResponse, AnalysisFailure> {
    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|v| message_field(&v));
        warn!("❌ 分析服务返回错误 {}: {:?}", status, message);
        return Err(AnalysisFailure::service(
            message.unwrap_or_else(|| MSG_SERVER_ERROR.to_string()),
        ));
    }

    match serde_json::from_slice::<AnalysisResponseBody>(body) {
        Ok(parsed) if parsed.success => {
            info!("✓ 分析服务返回成功");
            Ok(RawAnalysisResponse::from(parsed.analysis))
        }
        Ok(parsed) => {
            warn!("❌ 分析服务拒绝了请求: {:?}", parsed.message);
            Err(AnalysisFailure::service(
                parsed.message().unwrap_or(MSG_ANALYSIS_REJECTED),
            ))
        }
        Err(e) => {
            warn!("❌ 分析服务响应不是预期的 JSON: {}", e);
            Err(AnalysisFailure::service(MSG_ANALYSIS_REJECTED))
        }
    }
}
