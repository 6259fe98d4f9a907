//! 集成测试用的本地模拟服务
//!
//! 在 127.0.0.1 随机端口上启动 `/upload` 和 `/download-analysis` 两个接口，
//! 记录收到的请求，按预设行为返回。

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use resume_analyzer::services::{AnalysisClient, ExportClient};
use resume_analyzer::{Document, DocumentSource, SubmissionOrchestrator};

/// 分析接口的预设行为
#[derive(Clone, Debug)]
pub enum AnalysisBehavior {
    /// 立即返回
    Respond(StatusCode, Value),
    /// 先挂起一段时间再返回
    Delayed(Duration, StatusCode, Value),
}

/// 导出接口的预设行为
#[derive(Clone, Debug)]
pub enum ExportBehavior {
    Pdf(Vec<u8>),
    DelayedPdf(Duration, Vec<u8>),
    Fail(StatusCode, Value),
}

/// 分析接口收到的上传内容
#[derive(Clone, Debug, Default)]
pub struct ReceivedUpload {
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_len: usize,
    pub job_description: Option<String>,
}

struct MockState {
    analysis: Vec<AnalysisBehavior>,
    export: ExportBehavior,
    analysis_calls: AtomicUsize,
    export_calls: AtomicUsize,
    uploads: Mutex<Vec<ReceivedUpload>>,
    export_bodies: Mutex<Vec<Value>>,
}

/// 已启动的模拟服务
pub struct MockService {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockService {
    pub fn analysis_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn export_url(&self) -> String {
        format!("{}/download-analysis", self.base_url)
    }

    pub fn analysis_calls(&self) -> usize {
        self.state.analysis_calls.load(Ordering::SeqCst)
    }

    pub fn export_calls(&self) -> usize {
        self.state.export_calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<ReceivedUpload> {
        self.state.uploads.lock().unwrap().clone()
    }

    pub fn export_bodies(&self) -> Vec<Value> {
        self.state.export_bodies.lock().unwrap().clone()
    }
}

/// 启动模拟服务
///
/// 第 n 次分析请求使用 `analysis[n]`，超出部分重复最后一个行为。
pub async fn spawn_service(analysis: Vec<AnalysisBehavior>, export: ExportBehavior) -> MockService {
    let state = Arc::new(MockState {
        analysis,
        export,
        analysis_calls: AtomicUsize::new(0),
        export_calls: AtomicUsize::new(0),
        uploads: Mutex::new(Vec::new()),
        export_bodies: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/upload", post(upload))
        .route("/download-analysis", post(download_analysis))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockService {
        base_url: format!("http://{}", addr),
        state,
    }
}

async fn upload(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Response {
    let call = state.analysis_calls.fetch_add(1, Ordering::SeqCst);

    let mut received = ReceivedUpload::default();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                received.file_name = field.file_name().map(str::to_string);
                received.file_type = field.content_type().map(str::to_string);
                received.file_len = field.bytes().await.map(|b| b.len()).unwrap_or(0);
            }
            Some("jobDescription") => {
                received.job_description = field.text().await.ok();
            }
            _ => {}
        }
    }
    state.uploads.lock().unwrap().push(received);

    let index = call.min(state.analysis.len().saturating_sub(1));
    match state.analysis[index].clone() {
        AnalysisBehavior::Respond(status, body) => (status, Json(body)).into_response(),
        AnalysisBehavior::Delayed(delay, status, body) => {
            tokio::time::sleep(delay).await;
            (status, Json(body)).into_response()
        }
    }
}

async fn download_analysis(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.export_calls.fetch_add(1, Ordering::SeqCst);
    state.export_bodies.lock().unwrap().push(body);

    match state.export.clone() {
        ExportBehavior::Pdf(bytes) => pdf_response(bytes),
        ExportBehavior::DelayedPdf(delay, bytes) => {
            tokio::time::sleep(delay).await;
            pdf_response(bytes)
        }
        ExportBehavior::Fail(status, body) => (status, Json(body)).into_response(),
    }
}

fn pdf_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "application/pdf")], bytes).into_response()
}

/// 一个没有服务监听的地址
pub fn dead_url(path: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, path)
}

/// 按给定地址组装编排器
pub fn orchestrator(
    analysis_url: &str,
    export_url: &str,
    timeout: Duration,
    export_dir: &std::path::Path,
) -> SubmissionOrchestrator {
    let http = reqwest::Client::new();
    SubmissionOrchestrator::with_clients(
        AnalysisClient::with_client(http.clone(), analysis_url, timeout),
        ExportClient::with_client(http, export_url, timeout, export_dir, "analysis_result.pdf"),
    )
}

pub fn pdf_resume() -> Document {
    Document::new("cv.pdf", "application/pdf", b"%PDF-1.7 resume".to_vec())
}

/// 填好合法输入
pub fn fill_valid_input(orchestrator: &SubmissionOrchestrator) {
    orchestrator
        .select_document(pdf_resume(), DocumentSource::Picker)
        .unwrap();
    orchestrator.set_job_description("Senior Rust engineer, async networking");
}
