//! # Resume Analyzer
//!
//! 简历分析客户端：提交简历（PDF）和职位描述到远程分析服务，
//! 展示评分、亮点和改进建议，并可导出为 PDF 报告。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 纯数据：文件、提交输入、分析结果、原始响应、提交结果
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只做一件事
//! - `InputValidator` - 提交前校验
//! - `AnalysisClient` - 调用分析接口，超时与失败分类
//! - `normalize` - 把两种响应形态收敛为统一的分析结果
//! - `derive` - 由分数推导进度和分档
//! - `ExportClient` - 导出 PDF 并保存到本地
//!
//! ### ③ 会话层（Workflow）
//! - `workflow/` - 会话上下文（输入、最近结果、提示、状态）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 状态机：validate → submit → normalize → display，导出为旁路操作
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Document, DocumentSource, EvaluationResult, Notice, NoticeKind, SubmissionOutcome};
pub use orchestrator::{SubmissionOrchestrator, SubmitDisposition};
pub use services::{derive, normalize, PresentationState, ScoreBand};
pub use workflow::{SessionView, Settled, SubmissionState};
