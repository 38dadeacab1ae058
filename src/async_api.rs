//! Async API for non-blocking conversions.
//!
//! Enable the `async` feature to use these APIs:
//!
//! ```toml
//! [dependencies]
//! undocx = { version = "0.1", features = ["async"] }
//! ```
//!
//! Conversions are CPU- and file-bound, so each call runs the synchronous
//! implementation on Tokio's blocking pool.

use crate::convert::{BatchOptions, BatchReport, ConversionOutput};
use crate::error::{Error, Result};
use crate::model::Document;
use crate::render::RenderOptions;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Runs a blocking closure on the Tokio blocking pool.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?
}

/// Asynchronously parses a document from a file path.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> undocx::Result<()> {
/// let document = undocx::async_api::parse_file("guide.docx").await?;
/// println!("Paragraphs: {}", document.paragraph_count());
/// # Ok(())
/// # }
/// ```
pub async fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_path_buf();
    blocking(move || crate::parse_file(path)).await
}

/// Asynchronously parses a document from an async reader.
pub async fn parse_reader<R: AsyncRead + Unpin>(mut reader: R) -> Result<Document> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).await?;
    blocking(move || crate::parse_bytes(&data)).await
}

/// Asynchronously converts one document into `output_dir`.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> undocx::Result<()> {
/// use undocx::RenderOptions;
///
/// let output = undocx::async_api::convert_file("guide.docx", "out", &RenderOptions::default()).await?;
/// println!("{}", output.markdown_path.display());
/// # Ok(())
/// # }
/// ```
pub async fn convert_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<ConversionOutput> {
    let input: PathBuf = input.as_ref().to_path_buf();
    let output_dir: PathBuf = output_dir.as_ref().to_path_buf();
    let options = options.clone();
    blocking(move || crate::convert_file(input, output_dir, &options)).await
}

/// Asynchronously converts every document of `input_dir`.
pub async fn convert_directory(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let input_dir = input_dir.as_ref().to_path_buf();
    let output_dir = output_dir.as_ref().to_path_buf();
    let options = options.clone();
    blocking(move || crate::convert_directory(input_dir, output_dir, &options)).await
}
