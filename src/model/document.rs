//! Document structure and metadata.

use super::{Paragraph, Relationship, Table};
use serde::Serialize;

/// A complete document read from a DOCX package.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,
    /// Body blocks in declaration order
    pub body: Vec<Block>,
    /// Relationships of the main document part, in package order
    pub relationships: Vec<Relationship>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a paragraph to the body.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    /// Adds a table to the body.
    pub fn push_table(&mut self, table: Table) {
        self.body.push(Block::Table(table));
    }

    /// Returns the total number of body paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.body
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .count()
    }

    /// Returns the total number of body tables.
    pub fn table_count(&self) -> usize {
        self.body
            .iter()
            .filter(|b| matches!(b, Block::Table(_)))
            .count()
    }

    /// Returns the number of image relationships.
    pub fn image_count(&self) -> usize {
        self.relationships.iter().filter(|r| r.is_image()).count()
    }

    /// Returns an iterator over body paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Returns the plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        let mut result = Vec::new();
        for block in &self.body {
            match block {
                Block::Paragraph(p) => result.push(p.plain_text()),
                Block::Table(t) => {
                    for row in &t.rows {
                        for cell in &row.cells {
                            result.push(cell.plain_text());
                        }
                    }
                }
            }
        }
        result.join("\n")
    }
}

/// Document metadata from `docProps/core.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creation date (ISO 8601 format)
    pub created: Option<String>,
    /// Last modified date (ISO 8601 format)
    pub modified: Option<String>,
    /// Last editor
    pub last_modified_by: Option<String>,
}

/// A block-level content element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}
