//! Paragraph and text run definitions.

use serde::Serialize;

/// Name of the default paragraph style.
pub const NORMAL_STYLE: &str = "Normal";

/// A text run with uniform formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Run {
    /// The text content
    pub text: String,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Drawings and legacy pictures anchored in this run
    pub drawings: Vec<Drawing>,
}

impl Run {
    /// Creates a new run without formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Creates a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Default::default()
        }
    }

    /// Creates an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            italic: true,
            ..Default::default()
        }
    }

    /// Creates a run holding a single embedded image.
    pub fn image(embed: impl Into<String>) -> Self {
        Self {
            drawings: vec![Drawing::embedded(embed)],
            ..Default::default()
        }
    }

    /// Returns true if this run anchors a drawing or picture.
    pub fn has_drawing(&self) -> bool {
        !self.drawings.is_empty()
    }

    /// Returns the resource ids of the images embedded in this run.
    pub fn embeds(&self) -> impl Iterator<Item = &str> {
        self.drawings.iter().filter_map(|d| d.embed.as_deref())
    }
}

/// A drawing (`w:drawing`) or legacy picture (`w:pict`) inside a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Drawing {
    /// Relationship id of the embedded blob, if the drawing has one.
    /// Charts and shapes carry no embed.
    pub embed: Option<String>,
}

impl Drawing {
    /// Creates a drawing that references an embedded resource.
    pub fn embedded(id: impl Into<String>) -> Self {
        Self {
            embed: Some(id.into()),
        }
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// A paragraph of runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    /// Display name of the paragraph style (e.g. "Normal", "Heading 2")
    pub style_name: String,
    /// Direct paragraph alignment
    pub alignment: Alignment,
    /// Runs in document order
    pub runs: Vec<Run>,
    /// Text used when the paragraph has no runs
    pub raw_text: String,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self {
            style_name: NORMAL_STYLE.to_string(),
            alignment: Alignment::default(),
            runs: Vec::new(),
            raw_text: String::new(),
        }
    }
}

impl Paragraph {
    /// Creates a new empty "Normal" paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty paragraph with the given style name.
    pub fn with_style(style_name: impl Into<String>) -> Self {
        Self {
            style_name: style_name.into(),
            ..Default::default()
        }
    }

    /// Creates a simple paragraph with one plain run.
    pub fn text(text: impl Into<String>) -> Self {
        let mut para = Self::new();
        para.runs.push(Run::new(text));
        para
    }

    /// Sets the alignment.
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Appends a run, builder style.
    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Returns the plain text content of this paragraph.
    pub fn plain_text(&self) -> String {
        if self.runs.is_empty() {
            return self.raw_text.clone();
        }
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Returns true if any run anchors a drawing or picture.
    pub fn has_drawing(&self) -> bool {
        self.runs.iter().any(Run::has_drawing)
    }

    /// Returns true if this paragraph has neither text nor drawings.
    pub fn is_empty(&self) -> bool {
        !self.has_drawing() && self.plain_text().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_joins_runs() {
        let para = Paragraph::new()
            .with_run(Run::bold("Hello"))
            .with_run(Run::new(", "))
            .with_run(Run::italic("world"));
        assert_eq!(para.plain_text(), "Hello, world");
    }

    #[test]
    fn test_plain_text_falls_back_to_raw_text() {
        let para = Paragraph {
            raw_text: "field result".to_string(),
            ..Default::default()
        };
        assert_eq!(para.plain_text(), "field result");
        assert!(!para.is_empty());
    }

    #[test]
    fn test_drawing_without_embed_counts() {
        let mut run = Run::new("");
        run.drawings.push(Drawing::default());
        assert!(run.has_drawing());
        assert_eq!(run.embeds().count(), 0);

        let para = Paragraph::new().with_run(run);
        assert!(para.has_drawing());
        assert!(!para.is_empty());
    }

    #[test]
    fn test_default_style_is_normal() {
        let para = Paragraph::default();
        assert_eq!(para.style_name, "Normal");
        assert_eq!(para.alignment, Alignment::Left);
        assert!(para.is_empty());
    }
}
