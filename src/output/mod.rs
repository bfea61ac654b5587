//! Rendering of tool results.
//!
//! Label records render as comma-separated lines; every other report renders
//! as pretty-printed JSON with a 4-space indent.

pub mod csv;
pub mod json;

pub use csv::render_labels;
pub use json::render as render_json;
