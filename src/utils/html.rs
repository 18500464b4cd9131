//! Plain-text cleanup for provider descriptions.

use regex::Regex;
use std::sync::OnceLock;

static TAG_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn tag_regex() -> Option<&'static Regex> {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").ok()).as_ref()
}

/// Strip HTML tags, decode common entities and collapse whitespace
pub fn clean_html(html: &str) -> String {
    let stripped = match tag_regex() {
        Some(re) => re.replace_all(html, " ").into_owned(),
        None => html.to_string(),
    };

    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
