//! Link formatting applied to model replies

use std::sync::OnceLock;

use regex::Captures;
use regex::Regex;

/// Markdown links are matched first so they are left untouched
fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?P<markdown>\[[^\]]*\]\([^)\s]*\))|(?P<url>https?://[^\s<>()\[\]]+)|(?P<email>[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        )
        .expect("link pattern is a valid regex")
    })
}

/// Turn bare URLs and e-mail addresses into markdown links
///
/// Trailing sentence punctuation after a URL stays outside the link.
#[must_use]
pub fn format_links(reply: &str) -> String {
    link_pattern()
        .replace_all(reply, |caps: &Captures<'_>| {
            if let Some(markdown) = caps.name("markdown") {
                markdown.as_str().to_string()
            } else if let Some(url) = caps.name("url") {
                let raw = url.as_str();
                let trimmed = raw.trim_end_matches(['.', ',', ';', ':', '!', '?', '\'', '"']);
                let trailing = &raw[trimmed.len()..];
                format!("[{trimmed}]({trimmed}){trailing}")
            } else if let Some(email) = caps.name("email") {
                let address = email.as_str();
                format!("[{address}](mailto:{address})")
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}
