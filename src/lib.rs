//! PDF report generation for Information Systems Strategic Plans.
//!
//! A saved record is read through [`RecordView`], assembled into a
//! [`Document`] with the builders, and rendered by [`ReportGenerator`]:
//! parts start on fresh pages, sections flow, tables replay their header
//! after every break and missing data renders as placeholders instead of
//! failing.

mod builder;
mod error;
mod generator;
pub mod normalize;
mod record;

pub use builder::{DocumentBuilder, PartBuilder, SectionBuilder};
pub use error::ReportError;
pub use generator::ReportGenerator;
pub use normalize::{FieldShape, normalize_rows};
pub use record::{RecordView, parse_data_uri};

pub use issp_idf::{
    Banner, Block, CellAlign, DeploymentTable, Document, HeaderGroup, ImageBlock, ImagePayload,
    InvestmentGroup, InvestmentTable, KeyValue, LabelValueRow, MatrixCell, MatrixRow, MatrixTable,
    NumberedItem, NumberedTable, Part, Record, Row, Section, SubRow, Table, TableColumn, Value,
};
pub use issp_layout::{LayoutError, RenderConfig, RenderSummary, render_document};
pub use issp_render_core::{DrawOp, DrawingSurface, RecordingSurface, RenderError};
pub use issp_render_lopdf::LopdfSurface;
pub use issp_types::{Color, Margins, PageSize, Size};
