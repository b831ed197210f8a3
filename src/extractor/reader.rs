use regex::Regex;

/// Text of the first `<title>` element, trimmed. Empty when there is none.
pub fn extract_title(html: &str) -> String {
    let Some(open) = html.find("<title") else {
        return String::new();
    };
    let Some(tag_end) = html[open..].find('>') else {
        return String::new();
    };
    let start = open + tag_end + 1;

    match html[start..].find("</title>") {
        Some(end) => html[start..start + end].trim().to_string(),
        None => String::new(),
    }
}

/// Raw contents between an opening pattern and the next closing tag.
///
/// Matching is case-insensitive and does not track nesting: the first
/// `close_tag` after the opening tag ends the block, even if it belongs to a
/// nested element of the same name.
pub fn extract_block<'a>(html: &'a str, open_pattern: &str, close_tag: &str) -> Option<&'a str> {
    let lower = html.to_ascii_lowercase();

    let start = lower.find(&open_pattern.to_ascii_lowercase())?;
    let tag_end = html[start..].find('>')?;
    let content_start = start + tag_end + 1;

    let end = lower[content_start..].find(&close_tag.to_ascii_lowercase())?;
    Some(&html[content_start..content_start + end])
}

/// Value of a `<meta>` tag's `content` attribute, entity-decoded.
///
/// Three attribute layouts are tried in order: `property` then `content`,
/// `content` then `property`, and `name` then `content`. The first one that
/// matches wins. Empty when no layout matches.
pub fn extract_meta(html: &str, property: &str) -> String {
    let property = regex::escape(property);
    let patterns = [
        format!(r#"<meta\s+property="{property}"\s+content="([^"]*)""#),
        format!(r#"<meta\s+content="([^"]*)"\s+property="{property}""#),
        format!(r#"<meta\s+name="{property}"\s+content="([^"]*)""#),
    ];

    for pattern in &patterns {
        let re = Regex::new(pattern).expect("escaped meta pattern is valid");
        if let Some(value) = re.captures(html).and_then(|caps| caps.get(1)) {
            return decode_html_entities(value.as_str());
        }
    }

    String::new()
}

/// First non-empty value among several meta properties.
pub fn extract_first_meta(html: &str, properties: &[&str]) -> String {
    properties
        .iter()
        .map(|property| extract_meta(html, property))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Decode the handful of entities that show up in meta attributes.
pub fn decode_html_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}
