use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Number of leading bytes searched for an in-document charset declaration.
const SNIFF_LEN: usize = 4096;

/// Decode a response body to UTF-8.
///
/// Bytes that do not fit the chosen encoding are replaced rather than
/// reported; extraction always works on whatever text survives.
pub fn decode_body(content_type: &str, body: &[u8]) -> String {
    let encoding = detect_encoding(content_type, body);
    let (decoded, _encoding, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}

fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    // 1. Content-Type header
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    // 2. <meta charset> or <meta http-equiv> near the top of the document
    let search_bytes = &body[..body.len().min(SNIFF_LEN)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &search_str) {
        return encoding;
    }
    if let Some(encoding) = label_from(&META_HTTP_EQUIV_REGEX, &search_str) {
        return encoding;
    }

    // 3. Valid UTF-8 needs no guessing
    if std::str::from_utf8(body).is_ok() {
        return encoding_rs::UTF_8;
    }

    // 4. Heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    detector.guess(None, true)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_charset_from_content_type() {
        let body = b"<html><head><title>Test</title></head></html>";
        let encoding = detect_encoding("text/html; charset=utf-8", body);
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_detect_charset_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Test</title></head></html>";
        // ISO-8859-1 gets mapped to windows-1252 by encoding_rs since it's a superset
        assert_eq!(detect_encoding("text/html", body), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_detect_charset_from_meta_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"><title>Test</title></head></html>";
        assert_eq!(detect_encoding("text/html", body), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_decode_utf8_without_declaration() {
        let body = "Hello, 세계!".as_bytes();
        assert_eq!(decode_body("", body), "Hello, 세계!");
    }

    #[test]
    fn test_decode_euc_kr_from_header() {
        let (encoded, _, _) = encoding_rs::EUC_KR.encode("안녕하세요");
        let decoded = decode_body("text/html; charset=euc-kr", &encoded);
        assert_eq!(decoded, "안녕하세요");
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let body = [b'o', b'k', 0xFF];
        let decoded = decode_body("text/plain; charset=utf-8", &body);
        assert!(decoded.starts_with("ok"));
    }
}
