//! HTML rendering for annotated text

use super::RenderOptions;
use crate::annotate::Segment;

/// Escape text for use in HTML content and quoted attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render segments as an HTML fragment
pub fn render_html(segments: &[Segment], options: &RenderOptions) -> String {
    let mut out = String::new();
    for segment in segments {
        render_segment(&mut out, segment, options);
    }
    out
}

/// Render one segment
fn render_segment(out: &mut String, segment: &Segment, options: &RenderOptions) {
    match segment {
        Segment::TextRun { content } | Segment::RejectedMarkup { content } => {
            out.push_str(&escape_html(content));
        }
        Segment::LineBreak => out.push_str("<br>"),
        Segment::InternalLink { label, target } => {
            out.push_str(&format!(
                r#"<a href="{}" class="{}">{}</a>"#,
                escape_html(&options.internal_href(target)),
                escape_html(&options.internal_link_class),
                escape_html(label),
            ));
        }
        Segment::ExternalLink { label, url } => {
            let target = if options.open_external_in_new_tab {
                r#" target="_blank""#
            } else {
                ""
            };
            out.push_str(&format!(
                r#"<a href="{}"{} rel="noopener noreferrer">{}</a>"#,
                escape_html(url),
                target,
                escape_html(label),
            ));
        }
    }
}
