//! Core rendering abstractions for the report engine.
//!
//! This crate provides the fundamental pieces every drawing backend shares:
//! - `DrawingSurface`, the trait the layout engine draws through
//! - Text styles, built-in Helvetica metrics and line wrapping
//! - `RecordingSurface`, a backend that keeps the instruction stream in memory
//! - Error types for rendering operations

mod error;
pub mod metrics;
pub mod recording;
mod traits;
mod types;
pub mod utils;
pub mod wrap;

pub use error::RenderError;
pub use recording::{DrawOp, RecordingSurface};
pub use traits::DrawingSurface;
pub use types::{
    FontWeight, ImageData, ImageFormat, PlacedLine, RectPaint, Stroke, TextAlign, TextFrame,
    TextStyle,
};
