//! Intermediate Document Format (IDF)
//!
//! The in-memory representation of a report after the caller has pulled the
//! relevant fields out of its record and before layout. Every value is owned
//! by the caller and treated as immutable by the engine; renderers only
//! derive display strings from it.

use issp_types::Size;

mod table;

pub use table::{
    CellAlign, DeploymentTable, HeaderGroup, InvestmentGroup, InvestmentTable, KeyValue,
    LabelValueRow, MatrixCell, MatrixRow, MatrixTable, NumberedItem, NumberedTable, Row, SubRow,
    Table, TableColumn,
};

/// A scalar, array or nested value taken from a business record.
pub type Value = serde_json::Value;

/// A single record (or table row) keyed by field name.
pub type Record = serde_json::Map<String, Value>;

/// The text repeated at the top of every page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Banner {
    pub title: String,
    /// Usually the plan's year-cycle label, e.g. `"ISSP 2024-2026"`.
    pub subtitle: String,
}

/// A complete report: the banner plus an ordered list of parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub banner: Banner,
    pub parts: Vec<Part>,
}

/// A top-level chapter. Every part begins on a fresh page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Part {
    pub title: String,
    pub sections: Vec<Section>,
}

/// A titled subdivision within a part. Sections flow continuously and only
/// break when their content does not fit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// One renderable unit inside a section.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Value),
    Bullet { label: String, value: Value },
    KeyValues(Vec<KeyValue>),
    Table(Table),
    LabelValue(Vec<LabelValueRow>),
    Numbered(NumberedTable),
    Matrix(MatrixTable),
    Deployment(DeploymentTable),
    Investment(InvestmentTable),
    Image(ImageBlock),
}

/// An embedded image as supplied by the caller: raw bytes plus the declared
/// mime type. The payload is only drawable when `mime` starts with `image/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePayload {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    pub fn declares_image(&self) -> bool {
        self.mime.trim().to_ascii_lowercase().starts_with("image/")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageBlock {
    /// Human name of the upload, used in the fallback line
    /// (`"No {label} uploaded"`).
    pub label: String,
    pub payload: Option<ImagePayload>,
    /// Bounding box override. `None` uses the configured default.
    pub max_size: Option<Size>,
}
