use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    ClassificationResult, Classifier, ClassifyError, CompletionClient, ContentCategory,
    classification_prompt,
};

/// Answer shape requested from the model. Categories stay strings here so an
/// unknown label is reported as such rather than as malformed JSON.
#[derive(Debug, Deserialize)]
struct RawClassification {
    primary: String,
    confidence: f64,
    #[serde(default)]
    secondary: Option<String>,
    #[serde(default)]
    secondary_confidence: Option<f64>,
}

/// Classifier backed by a text completion model.
pub struct LlmClassifier {
    client: Arc<dyn CompletionClient>,
}

impl LlmClassifier {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    #[instrument(skip_all, fields(content_len = content.len()))]
    async fn classify(&self, content: &str) -> Result<ClassificationResult, ClassifyError> {
        let prompt = classification_prompt(content);
        let response = self.client.complete(&prompt).await?;

        let raw: RawClassification = serde_json::from_str(strip_code_fences(&response))?;
        let primary: ContentCategory = raw.primary.parse()?;

        // An unrecognised secondary label is dropped rather than failing the
        // whole classification.
        let secondary = raw
            .secondary
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<ContentCategory>().ok());
        let secondary_confidence = secondary.and(raw.secondary_confidence);

        debug!(%primary, confidence = raw.confidence, "classified content");

        Ok(ClassificationResult {
            primary,
            confidence: raw.confidence,
            secondary,
            secondary_confidence,
        })
    }
}

/// Remove a Markdown code fence (```` ```json ... ``` ````) wrapped around the
/// answer.
fn strip_code_fences(s: &str) -> &str {
    let s = s.trim();
    if !s.starts_with("```") {
        return s;
    }

    let mut inner = match s.find('\n') {
        Some(idx) => &s[idx + 1..],
        None => s,
    };
    if let Some(idx) = inner.rfind("```") {
        inner = &inner[..idx];
    }
    inner.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{CompletionError, MockCompletionClient};

    fn classifier_returning(response: &'static str) -> LlmClassifier {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(move |_| Ok(response.to_string()));
        LlmClassifier::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_classify_categories() {
        let cases = [
            (
                r#"{"primary":"원리소개","confidence":0.92,"secondary":"기술소개","secondary_confidence":0.45}"#,
                ContentCategory::Principle,
                0.92,
            ),
            (
                r#"{"primary":"사용기","confidence":0.88,"secondary":"생각정리","secondary_confidence":0.3}"#,
                ContentCategory::Review,
                0.88,
            ),
            (r#"{"primary":"튜토리얼","confidence":0.95}"#, ContentCategory::Tutorial, 0.95),
            (
                r#"{"primary":"뉴스/분석","confidence":0.78,"secondary":"기술소개","secondary_confidence":0.55}"#,
                ContentCategory::News,
                0.78,
            ),
            (r#"{"primary":"생각정리","confidence":0.85}"#, ContentCategory::Opinion, 0.85),
            (r#"{"primary":"기술소개","confidence":0.90}"#, ContentCategory::TechIntro, 0.90),
        ];

        for (response, primary, confidence) in cases {
            let result = classifier_returning(response)
                .classify("some content")
                .await
                .unwrap();
            assert_eq!(result.primary, primary);
            assert_eq!(result.confidence, confidence);
        }
    }

    #[tokio::test]
    async fn test_secondary_category() {
        let result = classifier_returning(
            r#"{"primary":"원리소개","confidence":0.92,"secondary":"기술소개","secondary_confidence":0.45}"#,
        )
        .classify("some content")
        .await
        .unwrap();
        assert_eq!(result.secondary, Some(ContentCategory::TechIntro));
        assert_eq!(result.secondary_confidence, Some(0.45));

        let result = classifier_returning(
            r#"{"primary":"원리소개","confidence":0.9,"secondary":"other","secondary_confidence":0.2}"#,
        )
        .classify("some content")
        .await
        .unwrap();
        assert_eq!(result.secondary, None);
        assert_eq!(result.secondary_confidence, None);
    }

    #[tokio::test]
    async fn test_code_fenced_response() {
        let result = classifier_returning("```json\n{\"primary\":\"튜토리얼\",\"confidence\":0.8}\n```")
            .classify("some content")
            .await
            .unwrap();
        assert_eq!(result.primary, ContentCategory::Tutorial);
    }

    #[tokio::test]
    async fn test_invalid_category() {
        let err = classifier_returning(r#"{"primary":"unknown","confidence":0.9}"#)
            .classify("some content")
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidCategory(s) if s == "unknown"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let err = classifier_returning("not json")
            .classify("some content")
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Parse(_)));
    }

    #[tokio::test]
    async fn test_completion_error() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .returning(|_| Err(CompletionError::new("API error")));

        let err = LlmClassifier::new(Arc::new(client))
            .classify("some content")
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Completion(_)));
        assert_eq!(err.to_string(), "LLM classification failed: API error");
    }

    #[tokio::test]
    async fn test_prompt_carries_content() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|prompt| prompt.contains("How TCP handshakes work"))
            .returning(|_| Ok(r#"{"primary":"원리소개","confidence":0.9}"#.to_string()));

        let result = LlmClassifier::new(Arc::new(client))
            .classify("How TCP handshakes work")
            .await
            .unwrap();
        assert_eq!(result.primary, ContentCategory::Principle);
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}"), "{\"a\":1}");
    }
}
