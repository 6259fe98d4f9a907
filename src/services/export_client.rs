//! PDF 导出客户端 - 业务能力层
//!
//! 把当前分析结果发送给导出接口，收到 PDF 字节流后保存到本地。
//! 保存时不覆盖已有文件，依次尝试 `analysis_result (1).pdf`、`analysis_result (2).pdf` ...

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, ExportFailure, FileError};
use crate::models::response::message_field;
use crate::models::EvaluationResult;

/// 同名文件最多尝试的编号
const MAX_NAME_ATTEMPTS: usize = 1000;

/// PDF 导出客户端
pub struct ExportClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    export_dir: PathBuf,
    file_name: String,
}

impl ExportClient {
    /// 根据配置创建导出客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(
            http,
            config.export_url(),
            config.export_timeout(),
            &config.export_dir,
            &config.export_file_name,
        ))
    }

    /// 复用已有的 HTTP 客户端
    pub fn with_client(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        timeout: Duration,
        export_dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
            export_dir: export_dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// 请求导出接口，返回 PDF 字节
    pub async fn export_pdf(&self, evaluation: &EvaluationResult) -> Result<Vec<u8>, ExportFailure> {
        let payload = json!({ "analysis_result": evaluation });

        info!("📄 正在请求导出 PDF: {}", self.endpoint);

        match tokio::time::timeout(self.timeout, self.request(&payload)).await {
            Ok(result) => result,
            Err(_) => Err(ExportFailure::Network {
                detail: format!("导出请求超时 ({} 秒)", self.timeout.as_secs_f64()),
            }),
        }
    }

    async fn request(&self, payload: &Value) -> Result<Vec<u8>, ExportFailure> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| ExportFailure::Network {
                detail: e.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ExportFailure::Network {
            detail: e.to_string(),
        })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|v| message_field(&v));
            return Err(ExportFailure::Service {
                status: status.as_u16(),
                message,
            });
        }

        if !body.starts_with(b"%PDF") {
            warn!("⚠️ 导出接口返回的内容看起来不是 PDF ({} 字节)", body.len());
        }

        debug!("导出接口返回 {} 字节", body.len());
        Ok(body.to_vec())
    }

    /// 把字节保存到导出目录，返回实际写入的路径
    pub async fn save(&self, bytes: &[u8]) -> Result<PathBuf, ExportFailure> {
        let write_failed = |path: &Path, source: std::io::Error| {
            ExportFailure::Save(FileError::WriteFailed {
                path: path.display().to_string(),
                source,
            })
        };

        tokio::fs::create_dir_all(&self.export_dir)
            .await
            .map_err(|e| write_failed(&self.export_dir, e))?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self
                .export_dir
                .join(numbered_file_name(&self.file_name, attempt));

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(write_failed(&path, e)),
            };

            file.write_all(bytes).await.map_err(|e| write_failed(&path, e))?;
            file.flush().await.map_err(|e| write_failed(&path, e))?;

            info!("💾 已保存导出文件: {}", path.display());
            return Ok(path);
        }

        Err(write_failed(
            &self.export_dir,
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} 的可用文件名已耗尽", self.file_name),
            ),
        ))
    }

    /// 导出并保存
    pub async fn export_and_save(&self, evaluation: &EvaluationResult) -> Result<PathBuf, ExportFailure> {
        let bytes = self.export_pdf(evaluation).await?;
        self.save(&bytes).await
    }
}

/// `analysis_result.pdf` → `analysis_result (n).pdf`
fn numbered_file_name(file_name: &str, n: usize) -> String {
    if n == 0 {
        return file_name.to_string();
    }

    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());

    match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, n, ext.to_string_lossy()),
        None => format!("{} ({})", stem, n),
    }
}
