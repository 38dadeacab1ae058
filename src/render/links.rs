//! Bare URL detection and Markdown link rewriting.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

/// `http(s)://` followed by everything up to the next whitespace.
static RE_BARE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// Marker that precedes the target of an existing Markdown link.
const LINK_TARGET_OPEN: &str = "](";

/// Emphasis characters that may close around a URL.
const EMPHASIS_MARKERS: &[char] = &['*', '_'];

/// Rewrites every bare URL in `text` as `[label](url)`.
///
/// The label is the registrable domain of the URL host. Text around the
/// URL, including emphasis markers, is left untouched. URLs that already
/// sit inside a link target are skipped, so the rewrite is idempotent.
pub fn annotate_links(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for m in RE_BARE_URL.find_iter(text) {
        if text[..m.start()].ends_with(LINK_TARGET_OPEN) {
            continue;
        }

        let url = m.as_str().trim_end_matches(EMPHASIS_MARKERS);
        if url.ends_with("://") {
            continue;
        }

        output.push_str(&text[last..m.start()]);
        output.push('[');
        output.push_str(&link_label(url));
        output.push_str("](");
        output.push_str(url);
        output.push(')');
        last = m.start() + url.len();
    }

    output.push_str(&text[last..]);
    output
}

/// Returns the display label for a URL.
///
/// Falls back to the bare host when no registrable domain exists (IP
/// addresses, single-label hosts) and to the URL itself when no host can
/// be read.
pub fn link_label(url: &str) -> String {
    match url_host(url) {
        Some(host) => registrable_domain_of_host(&host).unwrap_or(host),
        None => url.to_string(),
    }
}

/// Returns the public-suffix-aware registrable domain of a URL.
///
/// `https://www.example.co.uk/path` yields `example.co.uk`.
pub fn registrable_domain(url: &str) -> Option<String> {
    url_host(url).and_then(|host| registrable_domain_of_host(&host))
}

fn registrable_domain_of_host(host: &str) -> Option<String> {
    if host.parse::<IpAddr>().is_ok() {
        return None;
    }
    psl::domain_str(host).map(str::to_string)
}

/// Extracts the lowercase host from an absolute URL.
fn url_host(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or(rest);
    let host_port = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };

    let host = if let Some(bracketed) = host_port.strip_prefix('[') {
        // IPv6 literal
        bracketed.split(']').next().unwrap_or(bracketed)
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
            _ => host_port,
        }
    };

    let host = host.trim_end_matches('.').to_lowercase();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_url_with_registrable_label() {
        assert_eq!(
            annotate_links("See https://www.example.co.uk/docs now"),
            "See [example.co.uk](https://www.example.co.uk/docs) now"
        );
    }

    #[test]
    fn test_multiple_links_left_to_right() {
        assert_eq!(
            annotate_links("a http://docs.rs/regex b https://github.com/rust-lang/rust c"),
            "a [docs.rs](http://docs.rs/regex) b [github.com](https://github.com/rust-lang/rust) c"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = annotate_links("Go to https://www.rust-lang.org/learn and https://crates.io");
        let twice = annotate_links(&once);
        assert_eq!(once, twice);
        assert_eq!(
            once,
            "Go to [rust-lang.org](https://www.rust-lang.org/learn) and [crates.io](https://crates.io)"
        );
    }

    #[test]
    fn test_emphasis_markers_preserved() {
        assert_eq!(
            annotate_links("**https://example.com/a**"),
            "**[example.com](https://example.com/a)**"
        );
        assert_eq!(
            annotate_links("_visit https://example.org_ later"),
            "_visit [example.org](https://example.org)_ later"
        );
    }

    #[test]
    fn test_url_terminated_by_whitespace_only() {
        assert_eq!(
            annotate_links("end https://example.com/x.\nnext"),
            "end [example.com](https://example.com/x.)\nnext"
        );
    }

    #[test]
    fn test_text_without_links_unchanged() {
        let text = "No links here, just **bold** and _italic_.";
        assert_eq!(annotate_links(text), text);
    }

    #[test]
    fn test_registrable_domain() {
        assert_eq!(
            registrable_domain("https://www.example.co.uk/path").as_deref(),
            Some("example.co.uk")
        );
        assert_eq!(
            registrable_domain("http://user:pw@sub.Example.COM:8080/x?q=1").as_deref(),
            Some("example.com")
        );
        assert_eq!(registrable_domain("http://192.168.0.1/admin"), None);
    }

    #[test]
    fn test_label_fallbacks() {
        assert_eq!(link_label("http://192.168.0.1/admin"), "192.168.0.1");
        assert_eq!(link_label("http://[::1]:3000/"), "::1");
        assert_eq!(link_label("https:///nohost"), "https:///nohost");
    }
}
