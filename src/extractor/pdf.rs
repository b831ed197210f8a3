//! Text extraction from simple PDFs.
//!
//! Only literal, uncompressed content streams are understood: text is read
//! from `Tj` and `TJ` operators inside `BT ... ET` objects. Image-only,
//! encrypted and Flate-compressed documents yield no text and are reported as
//! such.

use async_trait::async_trait;
use regex::bytes::Regex;
use reqwest::{Client, StatusCode, header::HeaderMap};
use std::sync::LazyLock;
use tracing::instrument;

use crate::extractor::{
    Extractor,
    cleaner::normalize_whitespace,
    errors::ExtractError,
    model::{ExtractedContent, LinkInfo, LinkType},
};
use crate::fetcher::{self, FetchError};

/// Largest PDF body accepted, in bytes.
pub const MAX_PDF_SIZE: u64 = 10 * 1024 * 1024;

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)/Title\s*\(([^)]+)\)").unwrap());

static TEXT_OBJECT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s-u)BT\s(.*?)ET").unwrap());

static SHOW_STRING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)\(([^)]*)\)\s*Tj").unwrap());

static SHOW_ARRAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)\[([^\]]*)\]\s*TJ").unwrap());

static ARRAY_STRING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)\(([^)]*)\)").unwrap());

#[derive(Clone)]
pub struct PdfExtractor {
    client: Client,
}

impl PdfExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    fn link_type(&self) -> LinkType {
        LinkType::Pdf
    }

    #[instrument(skip(self), fields(link_type = "pdf"))]
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        let response = fetcher::get(&self.client, url, HeaderMap::new()).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ExtractError::unexpected_status(status, url));
        }

        let data = fetcher::read_limited(response, MAX_PDF_SIZE)
            .await
            .map_err(|e| match e {
                FetchError::BodyTooLarge { size, limit } => ExtractError::ExceedsMaxSize { size, limit },
                other => other.into(),
            })?;

        let text = extract_pdf_text(&data);
        if text.is_empty() {
            return Err(ExtractError::NoExtractableText);
        }

        Ok(ExtractedContent {
            link_info: LinkInfo::new(url, LinkType::Pdf).with_title(extract_pdf_title(&data)),
            content: text,
        })
    }
}

/// Best-effort `/Title (...)` from the document info dictionary.
pub fn extract_pdf_title(data: &[u8]) -> String {
    TITLE_REGEX
        .captures(data)
        .and_then(|caps| caps.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).trim().to_string())
        .unwrap_or_default()
}

/// Text shown by every `BT ... ET` object, one object per line.
pub fn extract_pdf_text(data: &[u8]) -> String {
    let blocks: Vec<String> = TEXT_OBJECT_REGEX
        .captures_iter(data)
        .filter_map(|caps| caps.get(1))
        .map(|block| extract_text_operators(block.as_bytes()))
        .filter(|text| !text.is_empty())
        .collect();

    normalize_whitespace(&blocks.join("\n")).trim().to_string()
}

/// Strings from `Tj` operators followed by strings from `TJ` arrays, joined
/// with no separator. Kerning numbers inside arrays are skipped.
fn extract_text_operators(block: &[u8]) -> String {
    let mut parts: Vec<String> = SHOW_STRING_REGEX
        .captures_iter(block)
        .filter_map(|caps| caps.get(1))
        .map(|m| decode_pdf_string(m.as_bytes()))
        .collect();

    for array in SHOW_ARRAY_REGEX.captures_iter(block).filter_map(|caps| caps.get(1)) {
        parts.extend(
            ARRAY_STRING_REGEX
                .captures_iter(array.as_bytes())
                .filter_map(|caps| caps.get(1))
                .map(|m| decode_pdf_string(m.as_bytes())),
        );
    }

    parts.concat()
}

/// Undo the basic escapes of a PDF literal string.
pub fn decode_pdf_string(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
        .replace("\\(", "(")
        .replace("\\)", ")")
        .replace("\\\\", "\\")
}


#[cfg(all(test, feature = "fuzz"))]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_pdf_text_never_panics(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let _ = extract_pdf_text(&data);
            let _ = extract_pdf_title(&data);
        }

        #[test]
        fn single_string_round_trips(text in "[A-Za-z0-9]{1,20}( [A-Za-z0-9]{1,20}){0,4}") {
            let data = format!("%PDF-1.4\nBT /F1 12 Tf ({text}) Tj ET\n%%EOF");
            prop_assert_eq!(extract_pdf_text(data.as_bytes()), text);
        }
    }
}
