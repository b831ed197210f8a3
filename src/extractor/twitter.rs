use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderMap};
use tracing::instrument;

use crate::extractor::{
    Extractor,
    cleaner::{extract_main_content, normalize_whitespace, strip_tags},
    errors::ExtractError,
    model::{ExtractedContent, LinkInfo, LinkType},
    reader::{extract_first_meta, extract_meta},
};
use crate::fetcher;

const AUTHOR_PROPERTIES: [&str; 2] = ["twitter:creator", "og:site_name"];

/// Extractor for twitter.com / x.com status pages.
///
/// Tweets are read from the Open Graph tags served to link previewers, with
/// the visible page text as a fallback.
#[derive(Clone)]
pub struct TwitterExtractor {
    client: Client,
}

impl TwitterExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Extractor for TwitterExtractor {
    fn link_type(&self) -> LinkType {
        LinkType::Twitter
    }

    #[instrument(skip(self), fields(link_type = "twitter"))]
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        let response = fetcher::get(&self.client, url, HeaderMap::new()).await?;

        let status = response.status();
        match status {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ExtractError::PrivateOrProtected { status });
            }
            _ => return Err(ExtractError::unexpected_status(status, url)),
        }

        let html = fetcher::read_text(response).await?;

        // Entity decoding can surface markup, so the description is stripped
        // after it is read.
        let description = extract_meta(&html, "og:description");
        let mut content = normalize_whitespace(&strip_tags(&description))
            .trim()
            .to_string();
        if content.is_empty() {
            content = extract_main_content(&html);
        }
        if content.is_empty() {
            return Err(ExtractError::NoContent(
                "tweet content (tweet may be private or protected)",
            ));
        }

        let link_info = LinkInfo::new(url, LinkType::Twitter)
            .with_title(extract_meta(&html, "og:title"))
            .with_author(extract_first_meta(&html, &AUTHOR_PROPERTIES));

        Ok(ExtractedContent { link_info, content })
    }
}
