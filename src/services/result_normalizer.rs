//! 结果规范化 - 业务能力层
//!
//! 唯一负责消解响应形态的地方：不管服务返回的是直接的分析对象，
//! 还是 chat-completion 包装里的 JSON 字符串，都收敛成 [`EvaluationResult`]。

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AnalysisFailure, ParseError};
use crate::models::{EvaluationResult, RawAnalysisResponse, SubmissionOutcome};

/// 将原始响应规范化为分析结果
pub fn normalize(raw: RawAnalysisResponse) -> Result<EvaluationResult, ParseError> {
    match raw {
        RawAnalysisResponse::Direct(value) => evaluation_from_value(value),
        RawAnalysisResponse::Enveloped { content } => {
            debug!("解析包装形态的分析内容，长度: {} 字符", content.len());
            let body = strip_code_fence(&content);
            let value: Value = match serde_json::from_str(body) {
                Ok(value) => value,
                Err(source) => return Err(ParseError::NestedContent { content, source }),
            };
            evaluation_from_value(value)
        }
    }
}

/// 规范化并转换成提交结果，解析失败按服务端失败处理
pub fn normalize_outcome(raw: RawAnalysisResponse) -> SubmissionOutcome {
    match normalize(raw) {
        Ok(evaluation) => SubmissionOutcome::Success(evaluation),
        Err(e) => {
            warn!("⚠️ 分析结果解析失败: {}", e);
            AnalysisFailure::unexpected().into()
        }
    }
}

fn evaluation_from_value(value: Value) -> Result<EvaluationResult, ParseError> {
    if value.is_null() {
        return Err(ParseError::MissingAnalysis);
    }
    serde_json::from_value(value).map_err(ParseError::Shape)
}

/// 去掉模型常见的 Markdown 代码块包裹
fn strip_code_fence(content: &str) -> &str {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    let fence = FENCE.get_or_init(|| Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*\s*(.*?)\s*```\s*$").ok());

    fence
        .as_ref()
        .and_then(|re| re.captures(content))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or_else(|| content.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_envelope_payload() {
        let raw = RawAnalysisResponse::from_value(json!({
            "choices": [{
                "message": {
                    "content": "{\"score\":8,\"highlights\":[\"a\"],\"recommendations\":[\"b\"]}"
                }
            }]
        }));

        let result = normalize(raw).unwrap();
        assert_eq!(
            result,
            EvaluationResult::new(Some(8.0), strings(&["a"]), strings(&["b"]))
        );
    }

    #[test]
    fn test_direct_payload() {
        let raw = RawAnalysisResponse::from_value(json!({
            "score": 72,
            "highlights": ["Led a team of 5"],
            "recommendations": ["Quantify impact"]
        }));

        let result = normalize(raw).unwrap();
        assert_eq!(result.score, Some(72.0));
        assert_eq!(result.highlights(), ["Led a team of 5".to_string()]);
    }

    #[test]
    fn test_idempotent_on_canonical() {
        let canonical = EvaluationResult::new(Some(5.0), strings(&["x", "y"]), None);
        let once = normalize(RawAnalysisResponse::from(canonical.clone())).unwrap();
        let twice = normalize(RawAnalysisResponse::from(once.clone())).unwrap();
        assert_eq!(once, canonical);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_unparseable_nested_content_is_error() {
        let raw = RawAnalysisResponse::Enveloped {
            content: "Sure! Here is the analysis: score 8".to_string(),
        };
        let err = normalize(raw).unwrap_err();
        assert!(matches!(err, ParseError::NestedContent { .. }));
    }

    #[test]
    fn test_fenced_nested_content() {
        let raw = RawAnalysisResponse::Enveloped {
            content: "```json\n{\"score\": 3, \"highlights\": []}\n```".to_string(),
        };
        let result = normalize(raw).unwrap();
        assert_eq!(result.score, Some(3.0));
        assert_eq!(result.highlights, Some(vec![]));
        assert_eq!(result.recommendations, None);
    }

    #[test]
    fn test_missing_lists_tolerated() {
        let result = normalize(RawAnalysisResponse::from_value(json!({"score": 9}))).unwrap();
        assert_eq!(result.highlights, None);
        assert_eq!(result.recommendations, None);
    }

    #[test]
    fn test_missing_analysis_is_error() {
        let err = normalize(RawAnalysisResponse::from(None)).unwrap_err();
        assert!(matches!(err, ParseError::MissingAnalysis));
    }

    #[test]
    fn test_parse_error_surfaces_as_service_failure() {
        let outcome = normalize_outcome(RawAnalysisResponse::Enveloped {
            content: "{not json".to_string(),
        });
        assert_eq!(
            outcome,
            SubmissionOutcome::ServiceFailure(
                "Error processing your request. Please try again.".to_string()
            )
        );
    }

    #[test]
    fn test_wrong_shape_is_error() {
        let err = normalize(RawAnalysisResponse::from_value(json!({"highlights": "one"})))
            .unwrap_err();
        assert!(matches!(err, ParseError::Shape(_)));
    }
}
