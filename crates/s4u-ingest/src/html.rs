//! Plain-text extraction from description HTML.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Entities decoded by [`clean_html`], applied in this order.
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#039;", "'"),
];

/// Strips tags, decodes the common entities, collapses whitespace runs to a
/// single space and trims.
///
/// Entities decode after tag stripping, so `&lt;b&gt;` survives as the text
/// `<b>`.
#[must_use]
pub fn clean_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut text = TAG_RE.replace_all(html, "").into_owned();
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
