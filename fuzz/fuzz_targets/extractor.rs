#![no_main]

use libfuzzer_sys::fuzz_target;

use linkscribe::extractor::{
    cleaner::{extract_main_content, strip_tags},
    newsletter::extract_newsletter_content,
    pdf::{extract_pdf_text, extract_pdf_title},
    reader::{extract_meta, extract_title},
};
use linkscribe::fetcher::pipeline::decode_body;

fuzz_target!(|data: &[u8]| {
    // PDF scanning works on raw bytes
    let _ = extract_pdf_text(data);
    let _ = extract_pdf_title(data);

    // HTML helpers see whatever the charset sniffing makes of the bytes
    let html = decode_body("", data);

    let stripped = strip_tags(&html);
    assert!(!stripped.contains('<'));

    let _ = extract_main_content(&html);
    let _ = extract_newsletter_content(&html);
    let _ = extract_title(&html);
    let _ = extract_meta(&html, "og:description");
});
