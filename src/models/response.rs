//! 分析接口的原始响应
//!
//! 响应在边界处只解码一次：外层是 `{ success, analysis, message }`，
//! `analysis` 又分为两种形态，由 [`RawAnalysisResponse`] 表示。

use serde::Deserialize;
use serde_json::Value;

use crate::models::evaluation::EvaluationResult;

/// 分析接口外层响应体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisResponseBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub analysis: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AnalysisResponseBody {
    /// 服务端给出的提示（空字符串视为没有）
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// 从任意 JSON 错误体中提取 `message` 字段
pub fn message_field(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

/// `analysis` 字段的两种形态
#[derive(Debug, Clone, PartialEq)]
pub enum RawAnalysisResponse {
    /// 直接就是分析对象
    Direct(Value),
    /// chat-completion 包装：`choices[0].message.content` 是 JSON 字符串
    Enveloped { content: String },
}

impl RawAnalysisResponse {
    /// 判定响应形态
    ///
    /// 只有 `choices[0].message.content` 是非空字符串时才算包装形态，
    /// 其余情况一律按直接形态处理。
    pub fn from_value(value: Value) -> Self {
        let content = value
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        match content {
            Some(content) => RawAnalysisResponse::Enveloped { content },
            None => RawAnalysisResponse::Direct(value),
        }
    }

    pub fn is_enveloped(&self) -> bool {
        matches!(self, RawAnalysisResponse::Enveloped { .. })
    }
}

impl From<Option<Value>> for RawAnalysisResponse {
    fn from(value: Option<Value>) -> Self {
        Self::from_value(value.unwrap_or(Value::Null))
    }
}

impl From<EvaluationResult> for RawAnalysisResponse {
    fn from(evaluation: EvaluationResult) -> Self {
        RawAnalysisResponse::Direct(serde_json::to_value(evaluation).unwrap_or_default())
    }
}
