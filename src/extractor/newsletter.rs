use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderMap};
use tracing::instrument;

use crate::extractor::{
    Extractor,
    cleaner::{extract_main_content, normalize_whitespace, strip_tags},
    errors::ExtractError,
    model::{ExtractedContent, LinkInfo, LinkType},
    paywall::{PAYWALL_NOTICE, is_paywalled},
    reader::{extract_block, extract_first_meta, extract_title},
};
use crate::fetcher;

/// Platform-specific article containers, tried in order.
const CONTAINERS: [(&str, &str); 4] = [
    // Substack
    (r#"<div class="body markup""#, "</div>"),
    (r#"<div class="post-content""#, "</div>"),
    // Medium
    ("<article", "</article>"),
    (r#"<div class="section-content""#, "</div>"),
];

/// Containers yielding this many characters or fewer are treated as misses.
const MIN_CONTAINER_CHARS: usize = 100;

const AUTHOR_PROPERTIES: [&str; 3] = ["author", "article:author", "og:site_name"];

/// Extractor for Substack, Medium and similar newsletter pages.
#[derive(Clone)]
pub struct NewsletterExtractor {
    client: Client,
}

impl NewsletterExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Extractor for NewsletterExtractor {
    fn link_type(&self) -> LinkType {
        LinkType::Newsletter
    }

    #[instrument(skip(self), fields(link_type = "newsletter"))]
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        let response = fetcher::get(&self.client, url, HeaderMap::new()).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ExtractError::unexpected_status(status, url));
        }

        let html = fetcher::read_text(response).await?;

        let mut content = extract_newsletter_content(&html)
            .unwrap_or_else(|| extract_main_content(&html));
        if content.is_empty() {
            return Err(ExtractError::NoContent("newsletter content"));
        }

        if is_paywalled(&html) {
            content.push_str(PAYWALL_NOTICE);
        }

        let link_info = LinkInfo::new(url, LinkType::Newsletter)
            .with_title(extract_title(&html))
            .with_author(extract_first_meta(&html, &AUTHOR_PROPERTIES));

        Ok(ExtractedContent { link_info, content })
    }
}

/// Text of the first platform container that yields enough text.
///
/// The first qualifying container wins even if a later one would give more.
pub fn extract_newsletter_content(html: &str) -> Option<String> {
    CONTAINERS.iter().find_map(|(open, close)| {
        let block = extract_block(html, open, close)?;
        let text = normalize_whitespace(&strip_tags(block)).trim().to_string();
        (text.len() > MIN_CONTAINER_CHARS).then_some(text)
    })
}
