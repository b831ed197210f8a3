use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::detector::{self, DetectError};
use crate::extractor::{
    ArticleExtractor, Extractor, NewsletterExtractor, PdfExtractor, TwitterExtractor,
    YouTubeExtractor,
    errors::ExtractError,
    model::{ExtractedContent, LinkType},
};

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("extraction cancelled")]
    Cancelled,
}

/// Registry of extractors by link type, with a fallback for unmapped types.
pub struct ExtractorRegistry {
    extractors: HashMap<LinkType, Arc<dyn Extractor>>,
    fallback: Arc<dyn Extractor>,
}

impl ExtractorRegistry {
    pub fn new(fallback: impl Extractor + 'static) -> Self {
        Self {
            extractors: HashMap::new(),
            fallback: Arc::new(fallback),
        }
    }

    /// All five extractors sharing one client, with articles as the fallback.
    pub fn with_defaults(client: Client) -> Self {
        let mut registry = Self::new(ArticleExtractor::new(client.clone()));
        registry.register(ArticleExtractor::new(client.clone()));
        registry.register(NewsletterExtractor::new(client.clone()));
        registry.register(PdfExtractor::new(client.clone()));
        registry.register(TwitterExtractor::new(client.clone()));
        registry.register(YouTubeExtractor::new(client));
        registry
    }

    /// Register an extractor under its own link type, replacing any previous one
    pub fn register<E: Extractor + 'static>(&mut self, extractor: E) {
        let link_type = extractor.link_type();
        self.extractors.insert(link_type, Arc::new(extractor));
    }

    /// Extractor for the given link type, or the fallback
    pub fn resolve(&self, link_type: LinkType) -> &dyn Extractor {
        match self.extractors.get(&link_type) {
            Some(extractor) => {
                debug!(%link_type, "resolved extractor");
                extractor.as_ref()
            }
            None => {
                warn!(%link_type, "no extractor registered, using fallback");
                self.fallback.as_ref()
            }
        }
    }

    /// Detect the link type of `url` and run the matching extractor
    pub async fn extract(&self, url: &str) -> Result<ExtractedContent, DispatchError> {
        let link_type = detector::detect(url)?;
        let content = self.resolve(link_type).extract(url).await?;
        Ok(content)
    }

    /// Like [`extract`](Self::extract), but gives up as soon as `cancel` fires.
    pub async fn extract_with_cancel(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<ExtractedContent, DispatchError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(url, "extraction cancelled");
                Err(DispatchError::Cancelled)
            }
            result = self.extract(url) => result,
        }
    }

    /// Get all link types with a registered extractor
    pub fn registered_types(&self) -> Vec<LinkType> {
        let mut types: Vec<LinkType> = self.extractors.keys().copied().collect();
        types.sort_by_key(|t| t.as_str());
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::LinkInfo;
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Clone)]
    struct StubExtractor {
        link_type: LinkType,
        label: &'static str,
    }

    #[async_trait]
    impl Extractor for StubExtractor {
        fn link_type(&self) -> LinkType {
            self.link_type
        }

        async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
            Ok(ExtractedContent {
                link_info: LinkInfo::new(url, self.link_type),
                content: self.label.to_string(),
            })
        }
    }

    #[derive(Clone)]
    struct SlowExtractor;

    #[async_trait]
    impl Extractor for SlowExtractor {
        fn link_type(&self) -> LinkType {
            LinkType::Article
        }

        async fn extract(&self, _url: &str) -> Result<ExtractedContent, ExtractError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err(ExtractError::NoContent("anything"))
        }
    }

    fn stub(link_type: LinkType, label: &'static str) -> StubExtractor {
        StubExtractor { link_type, label }
    }

    #[test]
    fn test_registry_registration() {
        let mut registry = ExtractorRegistry::new(stub(LinkType::Article, "fallback"));
        registry.register(stub(LinkType::Pdf, "pdf"));
        registry.register(stub(LinkType::YouTube, "youtube"));

        assert_eq!(registry.registered_types(), vec![LinkType::Pdf, LinkType::YouTube]);
    }

    #[test]
    fn test_with_defaults_registers_every_extractor() {
        let registry = ExtractorRegistry::with_defaults(Client::new());
        assert_eq!(
            registry.registered_types(),
            vec![
                LinkType::Article,
                LinkType::Newsletter,
                LinkType::Pdf,
                LinkType::Twitter,
                LinkType::YouTube,
            ]
        );
        assert_eq!(registry.resolve(LinkType::Unknown).link_type(), LinkType::Article);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = ExtractorRegistry::new(stub(LinkType::Article, "fallback"));
        registry.register(stub(LinkType::Pdf, "first"));
        registry.register(stub(LinkType::Pdf, "second"));
        assert_eq!(registry.registered_types(), vec![LinkType::Pdf]);
    }

    #[tokio::test]
    async fn test_extract_dispatches_by_detected_type() {
        let mut registry = ExtractorRegistry::new(stub(LinkType::Article, "fallback"));
        registry.register(stub(LinkType::Pdf, "pdf"));

        let content = registry.extract("https://example.com/paper.pdf").await.unwrap();
        assert_eq!(content.content, "pdf");
        assert_eq!(content.link_info.url, "https://example.com/paper.pdf");

        let content = registry.extract("https://x.com/user/status/1").await.unwrap();
        assert_eq!(content.content, "fallback");
    }

    #[tokio::test]
    async fn test_extract_rejects_invalid_url() {
        let registry = ExtractorRegistry::new(stub(LinkType::Article, "fallback"));
        let err = registry.extract("not a url").await.unwrap_err();
        assert!(matches!(err, DispatchError::Detect(_)));
    }

    #[tokio::test]
    async fn test_extract_with_cancel() {
        let registry = ExtractorRegistry::new(SlowExtractor);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = registry
            .extract_with_cancel("https://example.com/", &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Cancelled));
    }

    #[tokio::test]
    async fn test_extract_with_cancel_completes() {
        let registry = ExtractorRegistry::new(stub(LinkType::Article, "done"));
        let cancel = CancellationToken::new();

        let content = registry
            .extract_with_cancel("https://example.com/", &cancel)
            .await
            .unwrap();
        assert_eq!(content.content, "done");
    }
}
