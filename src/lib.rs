//! Abbrev - toolkit for a decentralized abbreviation registry
//!
//! Entry descriptions are free-form text that may reference other entries
//! as `#ABBR` and link out as `[label](url)`. [`annotate()`] turns such text
//! into segments that a renderer can display safely.

pub mod annotate;
pub mod app;
pub mod core;
pub mod registry;
pub mod render;

pub use annotate::{annotate, annotate_spanned, sanitize_url, Segment, Spanned};
