//! Fixed table recipes built on the grid primitives and the controller.
//! None of them keep state beyond a single render call.

mod deployment;
mod investment;
mod label_value;
mod matrix;
mod numbered;

pub use deployment::render_deployment;
pub use investment::{NestedYearHeader, render_investment};
pub use label_value::render_label_value;
pub use matrix::{matrix_rows, render_matrix};
pub use numbered::render_numbered;
