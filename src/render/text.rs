//! Plain text rendering

use crate::annotate::Segment;

/// Render the visible text of segments, links shown by label
pub fn render_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::visible_text).collect()
}
