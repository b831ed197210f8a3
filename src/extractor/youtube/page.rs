//! Scraping of the YouTube watch page.

use regex::Regex;
use std::sync::LazyLock;

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta\s+property="og:title"\s+content="([^"]*)""#).unwrap());

static CHANNEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""ownerChannelName":"([^"]*)""#).unwrap());

static DESCRIPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""shortDescription":"((?:[^"\\]|\\.)*)""#).unwrap());

static CAPTION_TRACKS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""captionTracks":\[(\{[^\]]*\})\]"#).unwrap());

static BASE_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""baseUrl":"([^"]*)""#).unwrap());

const NO_CONTENT_TEXT: &str = "No content available for this video.";

/// Video metadata embedded in the watch page. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
    pub description: String,
}

impl VideoMetadata {
    pub fn from_page(html: &str) -> Self {
        Self {
            title: first_capture(&TITLE_REGEX, html).unwrap_or_default().to_string(),
            channel: first_capture(&CHANNEL_REGEX, html).unwrap_or_default().to_string(),
            description: first_capture(&DESCRIPTION_REGEX, html)
                .map(unescape_json_fragment)
                .unwrap_or_default(),
        }
    }

    /// Labelled text built from whatever metadata is present, used when no
    /// transcript can be had.
    pub fn to_content(&self) -> String {
        let mut parts = Vec::new();
        if !self.title.is_empty() {
            parts.push(format!("Title: {}", self.title));
        }
        if !self.channel.is_empty() {
            parts.push(format!("Channel: {}", self.channel));
        }
        if !self.description.is_empty() {
            parts.push(format!("Description:\n{}", self.description));
        }

        if parts.is_empty() {
            return NO_CONTENT_TEXT.to_string();
        }
        parts.join("\n\n")
    }
}

/// `baseUrl` of the first caption track, with `\u0026` turned back into `&`.
pub fn extract_captions_url(html: &str) -> Option<String> {
    let tracks = first_capture(&CAPTION_TRACKS_REGEX, html)?;
    let base_url = first_capture(&BASE_URL_REGEX, tracks)?;
    Some(base_url.replace(r"\u0026", "&"))
}

fn first_capture<'a>(re: &Regex, haystack: &'a str) -> Option<&'a str> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn unescape_json_fragment(raw: &str) -> String {
    raw.replace(r"\n", "\n")
        .replace(r#"\""#, "\"")
        .replace(r"\\", "\\")
}
