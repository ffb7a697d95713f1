//! PDF drawing surface using lopdf.
//!
//! Pages are buffered as content-operation lists so earlier pages can be
//! revisited (page-number footers), then encoded in one pass by
//! [`LopdfSurface::finish`].

mod images;
mod renderer;
mod writer;

pub use renderer::LopdfSurface;
