pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{Margins, PageSize, Point, Rect, Size};
