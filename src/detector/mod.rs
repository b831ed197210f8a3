//! URL type detection.
//!
//! Pure hostname/path matching; no network access. Rules are tested in a fixed
//! priority order, so a YouTube link whose path ends in `.pdf` is still a
//! YouTube link.

use thiserror::Error;
use url::Url;

use crate::extractor::model::LinkType;

/// Hosts served by known newsletter platforms.
const NEWSLETTER_HOSTS: [&str; 4] = ["substack.com", "medium.com", "beehiiv.com", "buttondown.email"];

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Classify a URL into a [`LinkType`]. Anything unrecognised is an article.
pub fn detect(raw_url: &str) -> Result<LinkType, DetectError> {
    let url = Url::parse(raw_url)?;

    let host = url.host_str().unwrap_or_default().to_lowercase();
    let path = url.path().to_lowercase();

    let link_type = if is_youtube(&host) {
        LinkType::YouTube
    } else if is_twitter(&host) {
        LinkType::Twitter
    } else if is_pdf(&path) {
        LinkType::Pdf
    } else if is_newsletter(&host) {
        LinkType::Newsletter
    } else {
        LinkType::Article
    };

    Ok(link_type)
}

fn is_youtube(host: &str) -> bool {
    host.contains("youtube.com") || host.contains("youtu.be")
}

fn is_twitter(host: &str) -> bool {
    host.contains("twitter.com") || host.contains("x.com")
}

fn is_pdf(path: &str) -> bool {
    path.ends_with(".pdf")
}

fn is_newsletter(host: &str) -> bool {
    NEWSLETTER_HOSTS.iter().any(|platform| host.contains(platform))
}
