//! Table structures for document model.

use super::Paragraph;
use serde::Serialize;

/// A table in the document. The first row is the header row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table of plain-text cells, one inner slice per row.
    pub fn from_text<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| TableRow {
                    cells: row.into_iter().map(TableCell::text).collect(),
                })
                .collect(),
        }
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Gets a cell at the specified position.
    pub fn get_cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }
}

/// A row in a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A cell in a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableCell {
    /// Content paragraphs within this cell
    pub content: Vec<Paragraph>,
}

impl TableCell {
    /// Creates a new empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Paragraph::text(text)],
        }
    }

    /// Creates a cell holding a single paragraph.
    pub fn paragraph(paragraph: Paragraph) -> Self {
        Self {
            content: vec![paragraph],
        }
    }

    /// Returns the first paragraph, which carries the cell's formatting.
    pub fn first_paragraph(&self) -> Option<&Paragraph> {
        self.content.first()
    }

    /// Returns the plain text content of this cell.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
