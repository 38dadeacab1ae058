//! Markdown rendering for documents.
//!
//! Leaf-first: [`format`] renders runs, [`links`] rewrites bare URLs,
//! [`images`] stores blobs and builds the image lookup, [`block`] renders
//! paragraphs and tables, and [`MarkdownRenderer`] walks the body.

pub mod block;
pub mod format;
pub mod front_matter;
pub mod images;
pub mod links;
mod markdown;
mod options;

pub use block::{heading_level, render_paragraph, render_table};
pub use format::{format_run, paragraph_text};
pub use front_matter::{FrontMatterFields, HeaderKind};
pub use images::{extract_images, BlobSink, ExtractedImages, FsSink, ImageMap, MemorySink};
pub use links::{annotate_links, registrable_domain};
pub use markdown::{MarkdownRenderer, RenderedMarkdown};
pub use options::RenderOptions;

use crate::error::Result;
use crate::model::Document;
use std::path::Path;

/// Renders a document to Markdown, keeping extracted images in memory.
///
/// Image tags point at `img_<base_name>/<base_name>_imagen<N>.png`, the
/// layout [`crate::convert_file`] writes to disk.
pub fn render_markdown(
    document: &Document,
    base_name: &str,
    options: &RenderOptions,
) -> Result<String> {
    let mut sink = MemorySink::new(crate::convert::image_dir_name(base_name));
    let renderer = MarkdownRenderer::new(options.clone());
    let rendered = renderer.render(document, base_name, Path::new(""), &mut sink)?;
    Ok(rendered.markdown)
}

/// Renders a document to Markdown and writes it to a writer.
pub fn render_to_writer<W: std::io::Write>(
    document: &Document,
    base_name: &str,
    writer: &mut W,
    options: &RenderOptions,
) -> Result<()> {
    let content = render_markdown(document, base_name, options)?;
    writer.write_all(content.as_bytes())?;
    Ok(())
}
