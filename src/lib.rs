//! # undocx
//!
//! Converts Word (`.docx`) documents into Markdown pages for a
//! documentation site: a front-matter block, headings, centered
//! paragraphs, pipe tables, hyperlinked URLs and extracted images.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undocx::{convert_file, RenderOptions};
//!
//! fn main() -> undocx::Result<()> {
//!     // Writes out/guide.md and out/img_guide/guide_imagen<N>.png
//!     let output = convert_file("guide.docx", "out", &RenderOptions::default())?;
//!     println!("{}", output.markdown_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `async`: Tokio wrappers in [`async_api`]

pub mod convert;
pub mod detect;
pub mod docx;
pub mod error;
pub mod model;
pub mod render;

#[cfg(feature = "async")]
pub mod async_api;

// Re-exports
pub use convert::{
    convert_directory, convert_file, BatchFailure, BatchOptions, BatchReport, ConversionOutput,
};
pub use detect::{detect_format, detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, Result};
pub use model::Document;
pub use render::{HeaderKind, RenderOptions};

use chrono::NaiveDate;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

/// Parses a document from a file path.
///
/// # Example
///
/// ```no_run
/// use undocx::parse_file;
///
/// let document = parse_file("guide.docx")?;
/// println!("Paragraphs: {}", document.paragraph_count());
/// # Ok::<(), undocx::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    match detect_format_from_path(path)? {
        FormatType::Docx => docx::DocxParser::open(path)?.parse(),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

/// Parses a document from a reader.
pub fn parse_reader<R: Read + Seek>(mut reader: R) -> Result<Document> {
    match detect::detect_format(&mut reader)? {
        FormatType::Docx => docx::DocxParser::from_reader(reader)?.parse(),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

/// Parses a document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    match detect_format_from_bytes(data)? {
        FormatType::Docx => docx::DocxParser::from_bytes(data.to_vec())?.parse(),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

/// Converts a document to Markdown with default options, without writing
/// anything to disk.
///
/// Image tags point at `img_<base>/<base>_imagen<N>.png`, where
/// [`convert_file`] would store them.
///
/// # Example
///
/// ```no_run
/// let markdown = undocx::to_markdown("guide.docx")?;
/// println!("{}", markdown);
/// # Ok::<(), undocx::Error>(())
/// ```
pub fn to_markdown(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let document = parse_file(path)?;
    let base_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    render::render_markdown(&document, &base_name, &RenderOptions::default())
}

/// Builder for configuring and running conversions.
///
/// # Example
///
/// ```no_run
/// use undocx::{HeaderKind, Undocx};
///
/// let report = Undocx::new()
///     .header_kind(HeaderKind::SubTopic)
///     .title("Installation")
///     .author("Docs team")
///     .convert_dir("manuals", "site/docs")?;
/// println!("{} converted, {} failed", report.succeeded.len(), report.failed.len());
/// # Ok::<(), undocx::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Undocx {
    render_options: RenderOptions,
    parallel: bool,
}

impl Default for Undocx {
    fn default() -> Self {
        Self::new()
    }
}

impl Undocx {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
            parallel: true,
        }
    }

    /// Selects the front-matter template.
    pub fn header_kind(mut self, kind: HeaderKind) -> Self {
        self.render_options = self.render_options.with_header_kind(kind);
        self
    }

    /// Sets the front-matter title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Sets the front-matter author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_author(author);
        self
    }

    /// Sets the front-matter description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_description(description);
        self
    }

    /// Pins the front-matter date.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.render_options = self.render_options.with_date(date);
        self
    }

    /// Omits the front-matter block.
    pub fn without_front_matter(mut self) -> Self {
        self.render_options = self.render_options.without_front_matter();
        self
    }

    /// Caps heading levels. Without a cap, deep headings keep their level.
    pub fn max_heading_level(mut self, level: usize) -> Self {
        self.render_options = self.render_options.with_max_heading_level(level);
        self
    }

    /// Converts batch documents one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Returns the configured render options.
    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Converts one document into `output_dir`.
    pub fn convert(
        &self,
        input: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<ConversionOutput> {
        convert_file(input, output_dir, &self.render_options)
    }

    /// Converts every document of `input_dir` into `output_dir`.
    pub fn convert_dir(
        &self,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<BatchReport> {
        convert_directory(input_dir, output_dir, &self.batch_options())
    }

    fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            render: self.render_options.clone(),
            parallel: self.parallel,
        }
    }
}

/// Output directory used when none is given: the input's own directory.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection_docx() {
        let data = [0x50, 0x4B, 0x03, 0x04, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), FormatType::Docx);
    }

    #[test]
    fn test_legacy_doc_rejected() {
        let mut data = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        data.resize(512, 0);
        assert!(matches!(
            parse_bytes(&data),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_corrupt_zip_is_error() {
        let data = [0x50, 0x4B, 0x03, 0x04, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
        assert!(parse_bytes(&data).is_err());
    }

    #[test]
    fn test_builder_options() {
        let builder = Undocx::new()
            .header_kind(HeaderKind::SubTopic)
            .title("Install")
            .author("Ana")
            .description("How to install")
            .without_front_matter()
            .max_heading_level(3)
            .sequential();

        let options = builder.render_options();
        assert_eq!(options.header_kind, HeaderKind::SubTopic);
        assert_eq!(options.front_matter.title, "Install");
        assert_eq!(options.front_matter.author, "Ana");
        assert_eq!(options.front_matter.description, "How to install");
        assert!(!options.include_front_matter);
        assert_eq!(options.max_heading_level, Some(3));
        assert!(!builder.batch_options().parallel);
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("docs/guide.docx")),
            PathBuf::from("docs")
        );
        assert_eq!(default_output_dir(Path::new("guide.docx")), PathBuf::from("."));
    }

    #[test]
    fn test_document_model_empty() {
        let doc = model::Document::new();
        assert!(doc.body.is_empty());
        assert!(doc.relationships.is_empty());
        assert!(doc.metadata.title.is_none());
    }
}
