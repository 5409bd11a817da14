//! Link destination filtering
//!
//! Only plain web links and relative paths survive. Anything carrying a
//! scheme other than http(s) is refused, which covers `javascript:`,
//! `data:` and `vbscript:` destinations.

/// Check and trim a markdown link destination.
///
/// Returns the trimmed url when it is safe to emit as a hyperlink.
pub fn sanitize_url(url: &str) -> Option<&str> {
    let trimmed = url.trim();

    if is_web_url(trimmed) || trimmed.starts_with('/') {
        return Some(trimmed);
    }

    // Any colon at all counts as a scheme, even ":foo"
    if trimmed.contains(':') {
        return None;
    }

    Some(trimmed)
}

/// `^https?://`, ignoring ASCII case
fn is_web_url(url: &str) -> bool {
    starts_with_ignore_case(url, "http://") || starts_with_ignore_case(url, "https://")
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.as_bytes()
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
        .unwrap_or(false)
}
