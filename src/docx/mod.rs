//! DOCX (WordprocessingML) package reader.
//!
//! DOCX files are ZIP archives. The main document part is located through
//! the package relationships, then its styles, relationships and body are
//! read into the unified document model.

mod body;
mod container;
mod rels;
mod styles;
mod xml;

pub use container::DocxContainer;
pub use styles::StyleMap;

use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Relationship};
use container::paths;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use std::path::Path;
use xml::{local_name, local_name_end};

/// Relationship type suffix of the styles part.
const STYLES_REL: &str = "/styles";

/// DOCX document parser.
pub struct DocxParser {
    container: DocxContainer,
}

impl DocxParser {
    /// Opens a DOCX document from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = DocxContainer::open(path)?;
        Ok(Self { container })
    }

    /// Opens a DOCX document from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let container = DocxContainer::from_reader(reader)?;
        Ok(Self { container })
    }

    /// Opens a DOCX document from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = DocxContainer::from_bytes(data)?;
        Ok(Self { container })
    }

    /// Parses the document into the unified document model.
    pub fn parse(&mut self) -> Result<Document> {
        let mut document = Document::new();

        let document_path = self.main_document_path()?;
        tracing::debug!(part = %document_path, "Main document part located");

        document.metadata = self.parse_metadata()?;

        let mut relationships = self.parse_relationships(&document_path)?;
        let styles = self.parse_styles(&relationships)?;

        let body_xml = self.container.read_file(&document_path)?;
        document.body = body::parse_body(&body_xml, &styles)?;

        self.load_images(&mut relationships);
        document.relationships = relationships;

        tracing::debug!(
            blocks = document.body.len(),
            relationships = document.relationships.len(),
            "Package read"
        );
        Ok(document)
    }

    /// Finds the main document part, falling back to `word/document.xml`.
    fn main_document_path(&mut self) -> Result<String> {
        if self.container.file_exists(paths::PACKAGE_RELS) {
            let xml = self.container.read_file(paths::PACKAGE_RELS)?;
            if let Some(path) = rels::main_document_path(&xml)? {
                return Ok(path);
            }
        }

        if self.container.file_exists(paths::DEFAULT_DOCUMENT) {
            Ok(paths::DEFAULT_DOCUMENT.to_string())
        } else {
            Err(Error::MissingComponent(paths::DEFAULT_DOCUMENT.to_string()))
        }
    }

    /// Parses `docProps/core.xml`. The part is optional.
    fn parse_metadata(&mut self) -> Result<Metadata> {
        if !self.container.file_exists(paths::CORE_PROPERTIES) {
            return Ok(Metadata::default());
        }
        let xml = self.container.read_file(paths::CORE_PROPERTIES)?;
        parse_core_properties(&xml)
    }

    /// Parses the relationships of the main document part.
    fn parse_relationships(&mut self, document_path: &str) -> Result<Vec<Relationship>> {
        let rels_path = rels::rels_path_for(document_path);
        if !self.container.file_exists(&rels_path) {
            tracing::debug!(part = %rels_path, "Document has no relationships part");
            return Ok(Vec::new());
        }
        let xml = self.container.read_file(&rels_path)?;
        rels::parse_relationships(&xml, rels::part_dir(document_path))
    }

    /// Parses the styles part. A missing part yields the default map.
    fn parse_styles(&mut self, relationships: &[Relationship]) -> Result<StyleMap> {
        let Some(styles_path) = relationships
            .iter()
            .find(|r| !r.external && r.rel_type.ends_with(STYLES_REL))
            .map(|r| r.target.clone())
        else {
            return Ok(StyleMap::default());
        };

        match self.container.read_file(&styles_path) {
            Ok(xml) => styles::parse_styles(&xml),
            Err(Error::MissingComponent(_)) => {
                tracing::warn!(part = %styles_path, "Styles part missing, using defaults");
                Ok(StyleMap::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Loads the blobs of internal image relationships.
    fn load_images(&mut self, relationships: &mut [Relationship]) {
        for rel in relationships.iter_mut() {
            if rel.external || !rel.is_image() {
                continue;
            }
            match self.container.read_binary(&rel.target) {
                Ok(data) => rel.data = Some(data),
                Err(e) => {
                    tracing::warn!(id = %rel.id, target = %rel.target, error = %e, "Image part unreadable");
                }
            }
        }
    }
}

/// Parses Dublin Core properties from `docProps/core.xml`.
fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut metadata = Metadata::default();
    let mut field: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                field = Some(local_name(&e));
                text.clear();
            }
            Ok(Event::Text(t)) if field.is_some() => {
                let s = t.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                text.push_str(&s);
            }
            Ok(Event::End(e)) => {
                let name = local_name_end(&e);
                if field.as_deref() == Some(name.as_str()) {
                    let value = text.trim();
                    let value = (!value.is_empty()).then(|| value.to_string());
                    match name.as_str() {
                        "title" => metadata.title = value,
                        "creator" => metadata.author = value,
                        "subject" => metadata.subject = value,
                        "created" => metadata.created = value,
                        "modified" => metadata.modified = value,
                        "lastModifiedBy" => metadata.last_modified_by = value,
                        _ => {}
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(metadata)
}
