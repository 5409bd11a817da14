//! Output units of the annotator

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One unit of annotated text, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Literal text without markup
    TextRun { content: String },

    /// A `\n` from plain text
    LineBreak,

    /// Hashtag reference such as `#DOT`
    InternalLink {
        /// Matched text including the `#`
        label: String,
        /// Abbreviation without the prefix
        target: String,
    },

    /// Markdown link whose url passed sanitization
    ExternalLink { label: String, url: String },

    /// Markdown link whose url was refused; shown verbatim as text
    RejectedMarkup { content: String },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::TextRun {
            content: content.into(),
        }
    }

    pub fn internal(label: impl Into<String>, target: impl Into<String>) -> Self {
        Segment::InternalLink {
            label: label.into(),
            target: target.into(),
        }
    }

    pub fn external(label: impl Into<String>, url: impl Into<String>) -> Self {
        Segment::ExternalLink {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn rejected(content: impl Into<String>) -> Self {
        Segment::RejectedMarkup {
            content: content.into(),
        }
    }

    /// Text a reader sees for this segment (links by label)
    pub fn visible_text(&self) -> &str {
        match self {
            Segment::TextRun { content } => content,
            Segment::LineBreak => "\n",
            Segment::InternalLink { label, .. } => label,
            Segment::ExternalLink { label, .. } => label,
            Segment::RejectedMarkup { content } => content,
        }
    }

    /// Whether this segment renders as a link
    pub fn is_link(&self) -> bool {
        matches!(
            self,
            Segment::InternalLink { .. } | Segment::ExternalLink { .. }
        )
    }
}

/// A segment with its byte range in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub segment: Segment,
    pub range: Range<usize>,
}

impl Spanned {
    /// Check if the given byte position falls inside this segment
    pub fn contains(&self, byte_pos: usize) -> bool {
        byte_pos >= self.range.start && byte_pos < self.range.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_uses_labels() {
        assert_eq!(Segment::internal("#DOT", "DOT").visible_text(), "#DOT");
        assert_eq!(
            Segment::external("docs", "https://example.com").visible_text(),
            "docs"
        );
        assert_eq!(Segment::LineBreak.visible_text(), "\n");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Segment::internal("#AB", "AB")).unwrap();
        assert_eq!(json, r##"{"type":"internal_link","label":"#AB","target":"AB"}"##);

        let json = serde_json::to_string(&Segment::LineBreak).unwrap();
        assert_eq!(json, r#"{"type":"line_break"}"#);
    }
}
