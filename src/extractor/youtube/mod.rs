//! YouTube videos: transcript when captions are available, otherwise the
//! title, channel and description scraped from the watch page.

mod page;
mod transcript;

pub use page::{VideoMetadata, extract_captions_url};
pub use transcript::{parse_json3, parse_transcript, parse_xml, with_json3_format};

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue},
};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::extractor::{
    Extractor,
    errors::ExtractError,
    model::{ExtractedContent, LinkInfo, LinkType},
};
use crate::fetcher::{self, FetchError};

const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";
const WATCH_PAGE_LANGUAGES: &str = "en-US,en;q=0.9,ko;q=0.8";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VideoIdError {
    #[error("parsing URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("no video ID in short URL")]
    MissingShortId,

    #[error("no video ID found in YouTube URL")]
    MissingId,

    #[error("not a YouTube URL: {0}")]
    NotYouTube(String),
}

impl From<VideoIdError> for ExtractError {
    fn from(err: VideoIdError) -> Self {
        ExtractError::InvalidUrl(err.to_string())
    }
}

/// Video ID from `youtu.be/<id>`, `youtube.com/watch?v=<id>`,
/// `youtube.com/embed/<id>` or `youtube.com/v/<id>`.
pub fn extract_video_id(raw_url: &str) -> Result<String, VideoIdError> {
    let url = Url::parse(raw_url)?;
    let host = url.host_str().unwrap_or_default().to_lowercase();

    if host.contains("youtu.be") {
        let id = url.path().trim_start_matches('/');
        if id.is_empty() {
            return Err(VideoIdError::MissingShortId);
        }
        return Ok(id.to_string());
    }

    if host.contains("youtube.com") {
        if let Some((_, v)) = url.query_pairs().find(|(key, _)| *key == "v")
            && !v.is_empty()
        {
            return Ok(v.into_owned());
        }

        let mut segments = url.path().trim_start_matches('/').split('/');
        return match (segments.next(), segments.next()) {
            (Some("embed" | "v"), Some(id)) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(VideoIdError::MissingId),
        };
    }

    Err(VideoIdError::NotYouTube(host))
}

#[derive(Clone)]
pub struct YouTubeExtractor {
    client: Client,
    base_url: String,
}

impl YouTubeExtractor {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, YOUTUBE_BASE_URL)
    }

    /// Fetch watch pages from `base_url` instead of youtube.com.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(WATCH_PAGE_LANGUAGES));

        let page_url = format!("{}/watch?v={video_id}", self.base_url);
        let response = fetcher::get(&self.client, &page_url, headers).await?;
        fetcher::read_text(response).await
    }

    async fn fetch_transcript(&self, captions_url: &str) -> Result<String, FetchError> {
        let url = with_json3_format(captions_url);
        let response = fetcher::get(&self.client, &url, HeaderMap::new()).await?;
        let body = fetcher::read_text(response).await?;
        Ok(parse_transcript(&body))
    }
}

#[async_trait]
impl Extractor for YouTubeExtractor {
    fn link_type(&self) -> LinkType {
        LinkType::YouTube
    }

    #[instrument(skip(self), fields(link_type = "youtube"))]
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        let video_id = extract_video_id(url)?;
        let html = self.fetch_watch_page(&video_id).await?;

        let metadata = VideoMetadata::from_page(&html);
        let link_info = LinkInfo::new(url, LinkType::YouTube)
            .with_title(metadata.title.clone())
            .with_author(metadata.channel.clone());

        if let Some(captions_url) = extract_captions_url(&html) {
            match self.fetch_transcript(&captions_url).await {
                Ok(transcript) if !transcript.is_empty() => {
                    return Ok(ExtractedContent {
                        link_info,
                        content: transcript,
                    });
                }
                Ok(_) => debug!(%video_id, "caption track is empty"),
                Err(e) => debug!(%video_id, error = %e, "failed to fetch caption track"),
            }
        }

        Ok(ExtractedContent {
            link_info,
            content: metadata.to_content(),
        })
    }
}
