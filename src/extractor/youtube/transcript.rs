//! Caption track parsing.
//!
//! Tracks are requested as `json3`; servers that ignore the format hint and
//! answer with the legacy XML format are handled too.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static XML_TEXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<text[^>]*>([^<]*)</text>").unwrap());

#[derive(Debug, Default, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Default, Deserialize)]
struct Json3Event {
    #[serde(default)]
    segs: Vec<Json3Segment>,
}

#[derive(Debug, Default, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Add `fmt=json3` unless the URL already names a format.
pub fn with_json3_format(captions_url: &str) -> String {
    if captions_url.contains("fmt=") {
        captions_url.to_string()
    } else if captions_url.contains('?') {
        format!("{captions_url}&fmt=json3")
    } else {
        format!("{captions_url}?fmt=json3")
    }
}

/// Transcript text from a caption body, trying `json3` first and falling
/// back to XML. May be empty.
pub fn parse_transcript(body: &str) -> String {
    parse_json3(body).unwrap_or_else(|| parse_xml(body))
}

/// Segment texts joined by single spaces. `None` when the body is not JSON
/// or carries no text.
pub fn parse_json3(body: &str) -> Option<String> {
    let transcript: Json3Transcript = serde_json::from_str(body).ok()?;

    let lines: Vec<&str> = transcript
        .events
        .iter()
        .flat_map(|event| &event.segs)
        .map(|seg| seg.utf8.trim())
        .filter(|text| !text.is_empty())
        .collect();

    (!lines.is_empty()).then(|| lines.join(" "))
}

pub fn parse_xml(body: &str) -> String {
    XML_TEXT_REGEX
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape_xml(m.as_str().trim()))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn unescape_xml(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_json3_format() {
        assert_eq!(
            with_json3_format("https://host/api/timedtext?v=abc"),
            "https://host/api/timedtext?v=abc&fmt=json3"
        );
        assert_eq!(with_json3_format("https://host/captions"), "https://host/captions?fmt=json3");
        assert_eq!(
            with_json3_format("https://host/api/timedtext?v=abc&fmt=srv3"),
            "https://host/api/timedtext?v=abc&fmt=srv3"
        );
    }

    #[test]
    fn test_parse_json3() {
        let body = r#"{"events":[{"segs":[{"utf8":"Hello "}]},{"segs":[{"utf8":"world"}]},{"segs":[{"utf8":"\n"}]}]}"#;
        assert_eq!(parse_json3(body).as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_parse_json3_events_without_segments() {
        let body = r#"{"events":[{"tStartMs":0},{"segs":[{"utf8":"only"},{"acAsrConf":0}]}]}"#;
        assert_eq!(parse_json3(body).as_deref(), Some("only"));
    }

    #[test]
    fn test_parse_json3_empty() {
        assert_eq!(parse_json3(r#"{"events":[]}"#), None);
        assert_eq!(parse_json3("<transcript/>"), None);
    }

    #[test]
    fn test_parse_xml() {
        let body = r#"<transcript><text start="0" dur="5">Hello</text><text start="5" dur="3">world &amp; friends</text></transcript>"#;
        assert_eq!(parse_xml(body), "Hello world & friends");
        assert_eq!(parse_xml("<transcript></transcript>"), "");
    }

    #[test]
    fn test_parse_transcript_falls_back_to_xml() {
        let body = r#"<transcript><text start="0">It&#39;s &quot;fine&quot;</text></transcript>"#;
        assert_eq!(parse_transcript(body), r#"It's "fine""#);
    }
}
