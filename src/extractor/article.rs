use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderMap};
use tracing::instrument;

use crate::extractor::{
    Extractor,
    cleaner::extract_main_content,
    errors::ExtractError,
    model::{ExtractedContent, LinkInfo, LinkType},
    reader::extract_title,
};
use crate::fetcher;

/// Generic web page extractor; also the fallback for unmapped link types.
#[derive(Clone)]
pub struct ArticleExtractor {
    client: Client,
}

impl ArticleExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Extractor for ArticleExtractor {
    fn link_type(&self) -> LinkType {
        LinkType::Article
    }

    #[instrument(skip(self), fields(link_type = "article"))]
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        let response = fetcher::get(&self.client, url, HeaderMap::new()).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ExtractError::unexpected_status(status, url));
        }

        let html = fetcher::read_text(response).await?;

        let content = extract_main_content(&html);
        if content.is_empty() {
            return Err(ExtractError::NoContent("article content"));
        }

        Ok(ExtractedContent {
            link_info: LinkInfo::new(url, LinkType::Article).with_title(extract_title(&html)),
            content,
        })
    }
}
