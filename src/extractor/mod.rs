pub mod article;
pub mod cleaner;
pub mod errors;
pub mod model;
pub mod newsletter;
pub mod paywall;
pub mod pdf;
pub mod reader;
pub mod registry;
pub mod twitter;
pub mod youtube;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

pub use article::ArticleExtractor;
pub use errors::{ErrorKind, ExtractError};
pub use model::{ExtractedContent, LinkInfo, LinkType};
pub use newsletter::NewsletterExtractor;
pub use pdf::PdfExtractor;
pub use registry::{DispatchError, ExtractorRegistry};
pub use twitter::TwitterExtractor;
pub use youtube::YouTubeExtractor;

/// Turns a URL of one link type into plain text plus metadata.
///
/// Implementations hold only their HTTP client and are safe to share across
/// tasks. A successful result always carries non-empty `content`.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Link type this extractor is registered under.
    fn link_type(&self) -> LinkType;

    async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError>;
}
