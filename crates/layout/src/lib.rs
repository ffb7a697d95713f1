//! The report layout engine.
//!
//! A [`PageController`] owns the cursor for one render and is threaded
//! through every block renderer. Renderers measure first, reserve space with
//! [`PageController::ensure_space`], then draw, so the controller stays the
//! single source of truth for vertical position.

use issp_render_core::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
    #[error("Generic layout error: {0}")]
    Generic(String),
}

pub mod algorithms;
pub mod config;
pub mod controller;
pub mod document;
pub mod format;
pub mod image_block;
pub mod layouts;
pub mod painting;
pub mod table;
pub mod text;

pub use self::config::RenderConfig;
pub use self::controller::{Cursor, PageController};
pub use self::document::{RenderSummary, render_document};
pub use self::format::{NO_DATA, PLACEHOLDER, format_cell, format_key_label, format_value};
pub use self::image_block::{image_fallback_text, render_embedded_image};
pub use self::table::{GridOptions, GridTable, TableOutcome};

#[cfg(test)]
mod test_utils;
