//! Markdown renderer implementation.

use super::block::{render_paragraph, render_table};
use super::front_matter::front_matter_lines;
use super::images::{extract_images, BlobSink};
use super::RenderOptions;
use crate::error::Result;
use crate::model::{Block, Document};
use std::path::{Path, PathBuf};

/// Markdown text together with the images stored while producing it.
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    /// Assembled Markdown
    pub markdown: String,
    /// Image paths returned by the sink, in extraction order
    pub images: Vec<PathBuf>,
}

/// Markdown renderer.
#[derive(Debug)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Creates a new renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders a document to Markdown.
    ///
    /// Images are stored through `sink` as `<base_name>_imagen<N>.png`
    /// before the body is walked; their tags point at the stored files
    /// relative to `markdown_dir`, the directory the Markdown will live in.
    pub fn render(
        &self,
        document: &Document,
        base_name: &str,
        markdown_dir: &Path,
        sink: &mut dyn BlobSink,
    ) -> Result<RenderedMarkdown> {
        let mut lines: Vec<String> = Vec::new();

        if self.options.include_front_matter {
            let date = self
                .options
                .date
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            lines.extend(front_matter_lines(
                self.options.header_kind,
                &self.options.front_matter,
                date,
            ));
        }

        let extracted = extract_images(&document.relationships, base_name, markdown_dir, sink)?;
        tracing::debug!(images = extracted.written.len(), "Image extraction complete");

        for block in &document.body {
            match block {
                Block::Paragraph(para) => {
                    lines.extend(render_paragraph(para, &extracted.map, &self.options));
                }
                Block::Table(table) => {
                    lines.extend(render_table(table, &extracted.map));
                }
            }
        }

        tracing::debug!(blocks = document.body.len(), lines = lines.len(), "Body walk complete");

        Ok(RenderedMarkdown {
            markdown: lines.join("\n"),
            images: extracted.written,
        })
    }
}
