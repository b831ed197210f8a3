//! Boilerplate removal and plain-text conversion for fetched HTML.
//!
//! These are byte-scanning helpers, not an HTML parser. A `<` inside an
//! attribute value, or a block whose opening tag never closes, is handled
//! exactly as the scan dictates; callers rely on that behaviour.

/// Elements dropped wholesale (tag and contents) before text is taken.
const BOILERPLATE_TAGS: [&str; 5] = ["script", "style", "nav", "header", "footer"];

/// Pull readable text out of an HTML document.
///
/// Boilerplate blocks are removed, the `<body>` is isolated when present, the
/// remaining tags are stripped and whitespace is normalised.
pub fn extract_main_content(html: &str) -> String {
    let mut content = html.to_string();
    for tag in BOILERPLATE_TAGS {
        content = remove_blocks(&content, tag);
    }

    let body = isolate_body(&content);
    let text = strip_tags(body);

    normalize_whitespace(&text).trim().to_string()
}

/// Remove every `<tag ...>...</tag>` block, case-insensitively.
///
/// Removal stops at the first opening tag with no closing tag after it; that
/// block and everything following it stay in place.
pub fn remove_blocks(html: &str, tag: &str) -> String {
    let open_tag = format!("<{}", tag.to_ascii_lowercase());
    let close_tag = format!("</{}>", tag.to_ascii_lowercase());

    let mut result = html.to_string();
    loop {
        let lower = result.to_ascii_lowercase();
        let Some(start) = lower.find(&open_tag) else {
            break;
        };
        let Some(end) = lower[start..].find(&close_tag) else {
            break;
        };
        let end = start + end + close_tag.len();
        result.replace_range(start..end, "");
    }
    result
}

/// Slice out the contents of `<body ...>`.
///
/// Without a closing `</body>` the rest of the document after the opening tag
/// is used; without an opening tag the whole input is returned.
fn isolate_body(html: &str) -> &str {
    let lower = html.to_ascii_lowercase();
    let Some(open) = lower.find("<body") else {
        return html;
    };
    let Some(tag_end) = html[open..].find('>') else {
        return html;
    };
    let body_start = open + tag_end + 1;

    match lower[body_start..].find("</body>") {
        Some(end) => &html[body_start..body_start + end],
        None => &html[body_start..],
    }
}

/// Drop everything from each `<` up to the next `>`; keep the rest verbatim.
pub fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Collapse whitespace runs inside each line to one space and drop lines that
/// end up empty. Line breaks between non-empty lines are kept.
pub fn normalize_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
