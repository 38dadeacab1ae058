//! File and directory conversion.
//!
//! A conversion reads one `.docx`, writes `<base>.md` into the output
//! directory and stores its images under `img_<base>/`. Batches convert
//! every document of a directory independently.

use crate::error::{Error, Result};
use crate::render::{FsSink, MarkdownRenderer, RenderOptions};
use rayon::prelude::*;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of convertible files, compared case-insensitively.
const DOCX_EXTENSION: &str = "docx";

/// Prefix Word uses for its lock files (`~$report.docx`).
const LOCK_FILE_PREFIX: &str = "~$";

/// Name of the image directory for a document base name.
pub fn image_dir_name(base_name: &str) -> String {
    format!("img_{}", base_name)
}

/// Files produced by one conversion.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// Source document
    pub input: PathBuf,
    /// Written Markdown file
    pub markdown_path: PathBuf,
    /// Written image files, in extraction order
    pub images: Vec<PathBuf>,
}

/// Options for directory conversion.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Options applied to every document
    pub render: RenderOptions,
    /// Convert documents on the rayon thread pool
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            parallel: true,
        }
    }
}

impl BatchOptions {
    /// Creates batch options around the given render options.
    pub fn new(render: RenderOptions) -> Self {
        Self {
            render,
            ..Default::default()
        }
    }

    /// Converts documents one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// A document that failed inside a batch.
#[derive(Debug)]
pub struct BatchFailure {
    /// Source document
    pub input: PathBuf,
    /// Why it failed
    pub error: Error,
}

/// Outcome of a directory conversion.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successful conversions, sorted by input path
    pub succeeded: Vec<ConversionOutput>,
    /// Failed conversions, sorted by input path
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of documents attempted.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Returns true if every document converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts one `.docx` file into `output_dir`.
///
/// Parse failures are reported as [`Error::InputAccess`]; directory or file
/// write failures as [`Error::OutputWrite`]. The Markdown file is written
/// in a single call once rendering has succeeded.
pub fn convert_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<ConversionOutput> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();
    let base_name = base_name(input)?;

    tracing::debug!(input = %input.display(), "Reading document");
    let document = crate::parse_file(input).map_err(|e| Error::input_access(input, e))?;

    std::fs::create_dir_all(output_dir).map_err(|e| Error::output_write(output_dir, e))?;

    let mut sink = FsSink::new(output_dir.join(image_dir_name(&base_name)));
    let renderer = MarkdownRenderer::new(options.clone());
    let rendered = renderer.render(&document, &base_name, output_dir, &mut sink)?;

    let markdown_path = output_dir.join(format!("{}.md", base_name));
    std::fs::write(&markdown_path, rendered.markdown.as_bytes())
        .map_err(|e| Error::output_write(&markdown_path, e))?;

    tracing::info!(
        input = %input.display(),
        output = %markdown_path.display(),
        images = rendered.images.len(),
        "Converted document"
    );

    Ok(ConversionOutput {
        input: input.to_path_buf(),
        markdown_path,
        images: rendered.images,
    })
}

/// Converts every `.docx` file directly inside `input_dir`.
///
/// A failing document is recorded in the report and does not stop the
/// others. Only an unreadable `input_dir` fails the whole call.
///
/// Inputs whose base names match case-insensitively would share one
/// Markdown file and image directory. The first in path order is
/// converted; the others fail with [`Error::OutputWrite`].
pub fn convert_directory(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();
    let inputs = list_documents(input_dir)?;

    tracing::debug!(
        dir = %input_dir.display(),
        documents = inputs.len(),
        parallel = options.parallel,
        "Starting batch"
    );

    // Lowercased base name -> first input that claims it.
    let mut claimed: HashMap<String, &Path> = HashMap::new();
    let jobs: Vec<(&Path, Option<&Path>)> = inputs
        .iter()
        .map(|input| {
            let owner = base_name(input).ok().and_then(|base| {
                let owner = *claimed.entry(base.to_lowercase()).or_insert(input.as_path());
                (owner != input.as_path()).then_some(owner)
            });
            (input.as_path(), owner)
        })
        .collect();

    let convert = |&(input, owner): &(&Path, Option<&Path>)| {
        let result = match owner {
            Some(owner) => Err(output_collision(input, owner, output_dir)),
            None => convert_file(input, output_dir, &options.render),
        };
        result.map_err(|error| BatchFailure {
            input: input.to_path_buf(),
            error,
        })
    };

    let results: Vec<std::result::Result<ConversionOutput, BatchFailure>> = if options.parallel {
        jobs.par_iter().map(convert).collect()
    } else {
        jobs.iter().map(convert).collect()
    };

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(output) => report.succeeded.push(output),
            Err(failure) => {
                tracing::warn!(
                    input = %failure.input.display(),
                    error = %failure.error,
                    "Conversion failed"
                );
                report.failed.push(failure);
            }
        }
    }

    tracing::info!(
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "Batch complete"
    );
    Ok(report)
}

/// Lists convertible documents in `dir`, sorted by path.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::input_access(dir, e.into()))?;

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::input_access(dir, e.into()))?.path();
        if path.is_file() && is_document(&path) {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

/// Error for an input whose outputs were already claimed by `owner`.
fn output_collision(input: &Path, owner: &Path, output_dir: &Path) -> Error {
    let markdown_path = base_name(input)
        .map(|base| output_dir.join(format!("{}.md", base)))
        .unwrap_or_else(|_| output_dir.to_path_buf());
    Error::output_write(
        markdown_path,
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("output name already used by {}", owner.display()),
        ),
    )
}

fn is_document(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(DOCX_EXTENSION));
    let is_lock_file = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(LOCK_FILE_PREFIX));

    has_extension && !is_lock_file
}

fn base_name(input: &Path) -> Result<String> {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::InputAccess {
            path: input.to_path_buf(),
            reason: "file name is not valid UTF-8".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_image_dir_name() {
        assert_eq!(image_dir_name("report"), "img_report");
    }

    #[test]
    fn test_is_document() {
        assert!(is_document(Path::new("a/report.docx")));
        assert!(is_document(Path::new("REPORT.DOCX")));
        assert!(!is_document(Path::new("~$report.docx")));
        assert!(!is_document(Path::new("report.doc")));
        assert!(!is_document(Path::new("report.md")));
        assert!(!is_document(Path::new("docx")));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("dir/My Guide.docx")).unwrap(), "My Guide");
        assert_eq!(base_name(Path::new("notes.v2.docx")).unwrap(), "notes.v2");
    }

    #[test]
    fn test_list_documents_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["b.docx", "a.DOCX", "~$a.docx", "c.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.docx")).unwrap();

        let names: Vec<String> = list_documents(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.DOCX", "b.docx"]);
    }

    #[test]
    fn test_missing_input_file_is_input_access() {
        let out = TempDir::new().unwrap();
        let result = convert_file(
            out.path().join("missing.docx"),
            out.path(),
            &RenderOptions::default(),
        );
        assert!(matches!(result, Err(Error::InputAccess { .. })));
        assert!(!out.path().join("missing.md").exists());
    }

    #[test]
    fn test_missing_input_dir_is_input_access() {
        let out = TempDir::new().unwrap();
        let result = convert_directory(
            out.path().join("nowhere"),
            out.path(),
            &BatchOptions::default(),
        );
        assert!(matches!(result, Err(Error::InputAccess { .. })));
    }

    #[test]
    fn test_colliding_base_names_fail_instead_of_overwriting() {
        let dir = TempDir::new().unwrap();
        for name in ["guide.docx", "guide.DOCX", "Guide.docx"] {
            std::fs::write(dir.path().join(name), b"not a zip").unwrap();
        }

        let report =
            convert_directory(dir.path(), dir.path(), &BatchOptions::default().sequential())
                .unwrap();

        assert_eq!(report.total(), 3);
        assert!(report.succeeded.is_empty());
        let outcomes: Vec<(String, bool)> = report
            .failed
            .iter()
            .map(|f| {
                (
                    f.input.file_name().unwrap().to_string_lossy().into_owned(),
                    matches!(f.error, Error::OutputWrite { .. }),
                )
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ("Guide.docx".to_string(), false),
                ("guide.DOCX".to_string(), true),
                ("guide.docx".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_empty_directory_report() {
        let dir = TempDir::new().unwrap();
        let report =
            convert_directory(dir.path(), dir.path(), &BatchOptions::default().sequential())
                .unwrap();
        assert_eq!(report.total(), 0);
        assert!(report.is_success());
    }
}
