//! Package relationships (embedded resources).

use serde::Serialize;

/// Relationship type URI fragment shared by all image relationships.
pub const IMAGE_REL_MARKER: &str = "image";

/// A named link from the document part to another resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    /// Relationship id (e.g. "rId5")
    pub id: String,
    /// Full relationship type URI
    pub rel_type: String,
    /// Target as written in the package (resolved to a package path for
    /// internal targets)
    pub target: String,
    /// True for `TargetMode="External"` targets (hyperlinks, linked images)
    pub external: bool,
    /// Binary data of the target part, when it is inside the package
    #[serde(skip)]
    pub data: Option<Vec<u8>>,
}

impl Relationship {
    /// Creates an internal relationship carrying its blob.
    pub fn new(
        id: impl Into<String>,
        rel_type: impl Into<String>,
        target: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            rel_type: rel_type.into(),
            target: target.into(),
            external: false,
            data: Some(data),
        }
    }

    /// Creates an image relationship with the standard OOXML type.
    pub fn image(id: impl Into<String>, target: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(
            id,
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image",
            target,
            data,
        )
    }

    /// Returns true if the relationship type names an image.
    pub fn is_image(&self) -> bool {
        self.rel_type.contains(IMAGE_REL_MARKER)
    }

    /// Returns the size of the blob in bytes (0 when absent).
    pub fn size(&self) -> usize {
        self.data.as_ref().map(Vec::len).unwrap_or(0)
    }
}
