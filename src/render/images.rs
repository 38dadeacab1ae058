//! Image extraction and the image lookup table.
//!
//! Every image relationship of the document is stored through a
//! [`BlobSink`] under a deterministic name, and an [`ImageMap`] entry is
//! built holding the ready-to-emit Markdown tag. The map is complete
//! before any block is rendered.

use crate::error::{Error, Result};
use crate::model::Relationship;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Resource id → Markdown image tag (`![name](path)\n`).
pub type ImageMap = HashMap<String, String>;

/// Destination for extracted image blobs.
pub trait BlobSink {
    /// Stores `bytes` under `name` and returns the stored path.
    fn save_blob(&mut self, bytes: &[u8], name: &str) -> Result<PathBuf>;
}

/// Writes blobs into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct FsSink {
    dir: PathBuf,
    created: bool,
}

impl FsSink {
    /// Creates a sink rooted at `dir`. Nothing is created until the first blob.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            created: false,
        }
    }

    /// Returns the target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BlobSink for FsSink {
    fn save_blob(&mut self, bytes: &[u8], name: &str) -> Result<PathBuf> {
        if !self.created {
            std::fs::create_dir_all(&self.dir)
                .map_err(|e| Error::output_write(&self.dir, e))?;
            self.created = true;
        }

        let path = self.dir.join(name);
        std::fs::write(&path, bytes).map_err(|e| Error::output_write(&path, e))?;
        Ok(path)
    }
}

/// Keeps blobs in memory, reporting the paths they would have on disk.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    dir: PathBuf,
    blobs: Vec<(PathBuf, Vec<u8>)>,
}

impl MemorySink {
    /// Creates a sink that pretends to write into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            blobs: Vec::new(),
        }
    }

    /// Returns the stored blobs in save order.
    pub fn blobs(&self) -> &[(PathBuf, Vec<u8>)] {
        &self.blobs
    }
}

impl BlobSink for MemorySink {
    fn save_blob(&mut self, bytes: &[u8], name: &str) -> Result<PathBuf> {
        let path = self.dir.join(name);
        self.blobs.push((path.clone(), bytes.to_vec()));
        Ok(path)
    }
}

/// Result of the extraction pass.
#[derive(Debug, Clone, Default)]
pub struct ExtractedImages {
    /// Lookup used while rendering the body
    pub map: ImageMap,
    /// Stored paths, in extraction order
    pub written: Vec<PathBuf>,
}

/// Stored file name of the `index`-th image (1-based).
pub fn image_file_name(base_name: &str, index: usize) -> String {
    format!("{}_{}", base_name, image_label(index))
}

/// Alt text of the `index`-th image (1-based).
pub fn image_label(index: usize) -> String {
    format!("imagen{}.png", index)
}

/// Stores every image relationship and builds the lookup table.
///
/// The counter follows relationship order. Relationships whose type does
/// not mention "image" are ignored; image relationships without a blob
/// (external links, missing parts) are skipped without using a number.
pub fn extract_images(
    relationships: &[Relationship],
    base_name: &str,
    markdown_dir: &Path,
    sink: &mut dyn BlobSink,
) -> Result<ExtractedImages> {
    let mut extracted = ExtractedImages::default();
    let mut counter = 1;

    for rel in relationships.iter().filter(|r| r.is_image()) {
        let Some(data) = rel.data.as_deref() else {
            tracing::warn!(id = %rel.id, target = %rel.target, "Image relationship has no data, skipping");
            continue;
        };

        let file_name = image_file_name(base_name, counter);
        let stored = sink.save_blob(data, &file_name)?;
        let relative = relative_to(&stored, markdown_dir);

        tracing::debug!(id = %rel.id, path = %stored.display(), "Extracted image");

        extracted.map.insert(
            rel.id.clone(),
            format!("![{}]({})\n", image_label(counter), relative),
        );
        extracted.written.push(stored);
        counter += 1;
    }

    Ok(extracted)
}

/// Path of `target` relative to `base_dir`, with `/` separators.
fn relative_to(target: &Path, base_dir: &Path) -> String {
    let relative =
        pathdiff::diff_paths(target, base_dir).unwrap_or_else(|| target.to_path_buf());
    relative.to_string_lossy().replace('\\', "/")
}
