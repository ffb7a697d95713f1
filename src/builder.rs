//! Fluent builders for assembling a [`Document`] in code.
//!
//! ```
//! use issp_report::{DocumentBuilder, PartBuilder, SectionBuilder};
//! use serde_json::json;
//!
//! let document = DocumentBuilder::new("Information Systems Strategic Plan")
//!     .subtitle("ISSP 2024-2026")
//!     .part(
//!         PartBuilder::new("Part I. Organizational Profile")
//!             .section(SectionBuilder::new("Mission Statement").paragraph(json!("Serve students."))),
//!     )
//!     .build();
//! assert_eq!(document.parts.len(), 1);
//! ```

use issp_idf::{
    Banner, Block, DeploymentTable, Document, ImageBlock, ImagePayload, InvestmentTable, KeyValue,
    LabelValueRow, MatrixTable, NumberedTable, Part, Section, Table, Value,
};
use issp_types::Size;

#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    banner: Banner,
    parts: Vec<Part>,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            banner: Banner {
                title: title.into(),
                subtitle: String::new(),
            },
            parts: Vec::new(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.banner.subtitle = subtitle.into();
        self
    }

    pub fn part(mut self, part: PartBuilder) -> Self {
        self.parts.push(part.build());
        self
    }

    pub fn build(self) -> Document {
        Document {
            banner: self.banner,
            parts: self.parts,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PartBuilder {
    title: String,
    sections: Vec<Section>,
}

impl PartBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, section: SectionBuilder) -> Self {
        self.sections.push(section.build());
        self
    }

    pub fn build(self) -> Part {
        Part {
            title: self.title,
            sections: self.sections,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    title: String,
    blocks: Vec<Block>,
}

impl SectionBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn paragraph(self, value: impl Into<Value>) -> Self {
        self.block(Block::Paragraph(value.into()))
    }

    pub fn bullet(self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.block(Block::Bullet {
            label: label.into(),
            value: value.into(),
        })
    }

    pub fn key_values(self, entries: Vec<KeyValue>) -> Self {
        self.block(Block::KeyValues(entries))
    }

    pub fn table(self, table: Table) -> Self {
        self.block(Block::Table(table))
    }

    pub fn label_value(self, rows: Vec<LabelValueRow>) -> Self {
        self.block(Block::LabelValue(rows))
    }

    pub fn numbered(self, table: NumberedTable) -> Self {
        self.block(Block::Numbered(table))
    }

    pub fn matrix(self, matrix: MatrixTable) -> Self {
        self.block(Block::Matrix(matrix))
    }

    pub fn deployment(self, table: DeploymentTable) -> Self {
        self.block(Block::Deployment(table))
    }

    pub fn investment(self, table: InvestmentTable) -> Self {
        self.block(Block::Investment(table))
    }

    /// An image in the configured default box.
    pub fn image(self, label: impl Into<String>, payload: Option<ImagePayload>) -> Self {
        self.block(Block::Image(ImageBlock {
            label: label.into(),
            payload,
            max_size: None,
        }))
    }

    pub fn image_in(self, label: impl Into<String>, payload: Option<ImagePayload>, max_size: Size) -> Self {
        self.block(Block::Image(ImageBlock {
            label: label.into(),
            payload,
            max_size: Some(max_size),
        }))
    }

    pub fn build(self) -> Section {
        Section {
            title: self.title,
            blocks: self.blocks,
        }
    }
}
