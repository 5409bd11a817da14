//! Core functionality for registry entries and configuration

pub mod config;
pub mod entry;
