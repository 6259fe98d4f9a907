//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! app (终端前端：读取文件、渲染结果)
//!     ↓
//! orchestrator::SubmissionOrchestrator (状态机 + 会话)
//!     ↓
//! workflow::Session (会话上下文)
//!     ↓
//! services (能力层：validate / analyze / normalize / derive / export)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一入口**：会话状态只由编排器修改
//! 2. **错误不外溢**：所有失败在组件边界转换为提示
//! 3. **向下依赖**：编排层 → workflow → services → models

pub mod submission;

pub use submission::{SubmissionOrchestrator, SubmitDisposition};
