/// Phrases whose presence marks a page as (partly) behind a paywall.
const PAYWALL_INDICATORS: [&str; 7] = [
    "paywall",
    "subscribe to continue",
    "members-only",
    "premium content",
    "upgrade to read",
    "this post is for paid subscribers",
    "this post is for paying subscribers",
];

/// Appended to content taken from a paywalled page.
pub const PAYWALL_NOTICE: &str =
    "\n\n---\n[Note: This content may be partially extracted due to paywall restrictions]";

/// Case-insensitive check of the raw page for any paywall indicator.
pub fn is_paywalled(html: &str) -> bool {
    let lower = html.to_lowercase();
    PAYWALL_INDICATORS
        .iter()
        .any(|indicator| lower.contains(indicator))
}
