//! Description annotation
//!
//! This module turns free-form entry descriptions into a flat list of
//! segments: plain text, line breaks, `#ABBR` cross references and
//! `[label](url)` links. Both kinds of markup are found by a single
//! leftmost-first regex scan, so matches never overlap and a markdown
//! link wins over a hashtag starting at the same position.
//!
//! Link urls stop at the first `)`. A destination like
//! `javascript:alert(1)` is therefore captured as `javascript:alert(1`
//! and the trailing `)` stays plain text.

pub mod sanitize;
pub mod segment;

use std::sync::OnceLock;

use regex_lite::{Captures, Regex};

pub use sanitize::sanitize_url;
pub use segment::{Segment, Spanned};

/// Markdown link first, then a bounded hashtag with a trailing word boundary
const MARKUP_PATTERN: &str = r"\[([^\]]+)\]\(([^)]+)\)|#([A-Z]{2,10})\b";

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MARKUP_PATTERN).expect("markup pattern is valid"))
}

/// Annotate text into segments
pub fn annotate(text: &str) -> Vec<Segment> {
    annotate_spanned(text)
        .into_iter()
        .map(|spanned| spanned.segment)
        .collect()
}

/// Annotate text, keeping the source byte range of every segment
pub fn annotate_spanned(text: &str) -> Vec<Spanned> {
    let mut spans = Vec::new();
    let mut last_end = 0;

    for cap in markup_regex().captures_iter(text) {
        let Some(whole) = cap.get(0) else {
            continue;
        };

        push_plain(&mut spans, &text[last_end..whole.start()], last_end);

        spans.push(Spanned {
            segment: markup_segment(&cap, whole.as_str()),
            range: whole.range(),
        });

        last_end = whole.end();
    }

    push_plain(&mut spans, &text[last_end..], last_end);

    spans
}

/// Build the segment for one markup match
fn markup_segment(cap: &Captures<'_>, matched: &str) -> Segment {
    if let (Some(label), Some(url)) = (cap.get(1), cap.get(2)) {
        return match sanitize_url(url.as_str()) {
            Some(url) => Segment::external(label.as_str(), url),
            None => Segment::rejected(matched),
        };
    }

    match cap.get(3) {
        Some(abbreviation) => Segment::internal(matched, abbreviation.as_str()),
        // The alternation always fills one branch; keep the text if not
        None => Segment::text(matched),
    }
}

/// Split a plain span on newlines.
///
/// A span with k newlines gives k+1 text runs (empty ones included)
/// separated by k line breaks. An empty span gives nothing.
fn push_plain(spans: &mut Vec<Spanned>, plain: &str, offset: usize) {
    if plain.is_empty() {
        return;
    }

    let mut pos = offset;
    for (i, line) in plain.split('\n').enumerate() {
        if i > 0 {
            spans.push(Spanned {
                segment: Segment::LineBreak,
                range: pos..pos + 1,
            });
            pos += 1;
        }

        spans.push(Spanned {
            segment: Segment::text(line),
            range: pos..pos + line.len(),
        });
        pos += line.len();
    }
}

/// Abbreviations referenced by `#ABBR` tags, in order of first appearance
pub fn referenced_abbreviations(segments: &[Segment]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for segment in segments {
        if let Segment::InternalLink { target, .. } = segment {
            if !found.contains(target) {
                found.push(target.clone());
            }
        }
    }
    found
}
