//! Segment rendering
//!
//! The annotator never escapes anything. Every renderer here treats text
//! runs and rejected markup as literal text.

pub mod html;
pub mod text;

use serde::{Deserialize, Serialize};

pub use html::{escape_html, render_html};
pub use text::render_text;

/// Options for link rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Prefix for internal links; `#DOT` links to `{base}DOT`
    pub internal_link_base: String,
    /// CSS class on internal links
    pub internal_link_class: String,
    /// Open external links in a new tab
    pub open_external_in_new_tab: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            internal_link_base: "/".to_string(),
            internal_link_class: "abbrev-link".to_string(),
            open_external_in_new_tab: true,
        }
    }
}

impl RenderOptions {
    /// Navigation path for an abbreviation
    pub fn internal_href(&self, target: &str) -> String {
        format!("{}{}", self.internal_link_base, target)
    }
}

/// Output format for annotated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Html,
    Json,
}

/// Render segments in the given format
pub fn render(
    segments: &[crate::annotate::Segment],
    format: Format,
    options: &RenderOptions,
) -> serde_json::Result<String> {
    match format {
        Format::Text => Ok(render_text(segments)),
        Format::Html => Ok(render_html(segments, options)),
        Format::Json => serde_json::to_string_pretty(segments),
    }
}
