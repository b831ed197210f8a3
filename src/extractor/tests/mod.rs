use std::fs;

use crate::extractor::{
    cleaner::extract_main_content,
    newsletter::extract_newsletter_content,
    paywall::{PAYWALL_NOTICE, is_paywalled},
    pdf::{extract_pdf_text, extract_pdf_title},
    reader::{extract_first_meta, extract_meta, extract_title},
};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_article() {
    let html = fixture("article.html");

    assert_eq!(extract_title(&html), "Sample Article | News Site");

    let text = extract_main_content(&html);
    assert!(text.contains("first paragraph"));
    assert!(text.contains("second paragraph, with a related link."));
    assert!(!text.contains("analytics"));
    assert!(!text.contains("console.log"));
    assert!(!text.contains("font-family"));
    assert!(!text.contains("World"));
    assert!(!text.contains("Copyright"));
    assert!(!text.contains('<'));
}

#[test]
fn test_article_lines_are_normalised() {
    let text = extract_main_content(&fixture("article.html"));
    for line in text.lines() {
        assert!(!line.trim().is_empty());
        assert_eq!(line, line.trim());
        assert!(!line.contains("  "));
    }
}

#[test]
fn test_boilerplate_only_page_is_empty() {
    let html = fixture("empty.html");
    assert_eq!(extract_title(&html), "Empty");
    assert_eq!(extract_main_content(&html), "");
}

#[test]
fn test_newsletter_pipeline() {
    let html = fixture("newsletter.html");

    let content = extract_newsletter_content(&html).expect("container should qualify");
    assert!(content.starts_with("Welcome back to the newsletter."));
    assert!(content.contains("parking the thread"));
    assert!(!content.contains("Home Archive"));

    assert!(is_paywalled(&html));
    assert!(PAYWALL_NOTICE.starts_with("\n\n---\n"));

    assert_eq!(extract_title(&html), "Weekly Notes #42");
    assert_eq!(
        extract_first_meta(&html, &["author", "article:author", "og:site_name"]),
        "Jane Writer"
    );
}

#[test]
fn test_tweet_metadata() {
    let html = fixture("tweet.html");

    assert_eq!(extract_meta(&html, "og:title"), "Ferris on X");
    assert_eq!(
        extract_meta(&html, "og:description"),
        "Shipping a new release today & it's fast!"
    );
    assert_eq!(
        extract_first_meta(&html, &["twitter:creator", "og:site_name"]),
        "@ferris"
    );
    assert_eq!(extract_main_content(&html), "");
}

#[test]
fn test_simple_pdf() {
    let data = fs::read("src/extractor/tests/fixtures/simple.pdf").expect("Failed to read test fixture");

    assert_eq!(extract_pdf_title(&data), "Test PDF Document");
    assert_eq!(extract_pdf_text(&data), "Hello from a test PDF.\nKerned text line");
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";

    assert_eq!(extract_title(html), "Broken");
    assert_eq!(extract_main_content(html), "Unclosed tagsMore content");
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_html_helpers_never_panic(html in ".*") {
            let _ = extract_title(&html);
            let _ = extract_main_content(&html);
            let _ = extract_newsletter_content(&html);
            let _ = extract_meta(&html, "og:title");
            let _ = is_paywalled(&html);
        }

        #[test]
        fn test_main_content_has_no_markup(text in "[a-zA-Z0-9 .,]{0,200}") {
            let html = format!("<html><body><script>x()</script><p>{text}</p></body></html>");
            let content = extract_main_content(&html);
            prop_assert!(!content.contains('<'));
            prop_assert!(!content.contains("x()"));
            prop_assert_eq!(content, text.split_whitespace().collect::<Vec<_>>().join(" "));
        }
    }
}
