use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Content format of a link, as classified by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Article,
    #[serde(rename = "youtube")]
    YouTube,
    Pdf,
    Twitter,
    Newsletter,
    Unknown,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::YouTube => "youtube",
            Self::Pdf => "pdf",
            Self::Twitter => "twitter",
            Self::Newsletter => "newsletter",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link metadata produced alongside extracted text.
///
/// `url` is always the caller's input, never the post-redirect URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LinkInfo {
    pub url: String,
    pub link_type: LinkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Reserved; no extractor fills it today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl LinkInfo {
    pub fn new(url: impl Into<String>, link_type: LinkType) -> Self {
        Self {
            url: url.into(),
            link_type,
            title: None,
            author: None,
            date: None,
        }
    }

    /// Set the title, treating an empty string as absent.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    /// Set the author, treating an empty string as absent.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = non_empty(author.into());
        self
    }
}

/// Plain text pulled out of a link, plus the link's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractedContent {
    pub link_info: LinkInfo,
    pub content: String,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
