//! Style name lookup from `word/styles.xml`.

use super::xml::{attr, is_on, local_name, local_name_end};
use crate::error::{Error, Result};
use crate::model::NORMAL_STYLE;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// Maps paragraph style ids to display names.
#[derive(Debug, Clone)]
pub struct StyleMap {
    names: HashMap<String, String>,
    default_paragraph: String,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self {
            names: HashMap::new(),
            default_paragraph: NORMAL_STYLE.to_string(),
        }
    }
}

impl StyleMap {
    /// Resolves a `w:pStyle` value to a display name.
    ///
    /// Missing or unknown ids fall back to the default paragraph style.
    pub fn resolve(&self, style_id: Option<&str>) -> String {
        style_id
            .and_then(|id| self.names.get(id))
            .unwrap_or(&self.default_paragraph)
            .clone()
    }

    /// Name of the default paragraph style.
    pub fn default_paragraph(&self) -> &str {
        &self.default_paragraph
    }

    /// Number of known styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no styles were read.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Style being read between `<w:style>` and `</w:style>`.
#[derive(Default)]
struct PendingStyle {
    id: Option<String>,
    name: Option<String>,
    paragraph: bool,
    default: bool,
}

/// Parses `word/styles.xml`.
pub fn parse_styles(xml: &str) -> Result<StyleMap> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut map = StyleMap::default();
    let mut current: Option<PendingStyle> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match local_name(&e).as_str() {
                "style" => {
                    current = Some(PendingStyle {
                        id: attr(&e, "styleId"),
                        name: None,
                        paragraph: attr(&e, "type").map_or(true, |t| t == "paragraph"),
                        default: attr(&e, "default").is_some_and(|v| is_on(&v)),
                    });
                }
                "name" => {
                    if let Some(style) = current.as_mut() {
                        style.name = attr(&e, "val");
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => {
                if local_name_end(&e) == "style" {
                    if let Some(style) = current.take() {
                        map.insert(style);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(styles = map.len(), default = %map.default_paragraph(), "Styles parsed");
    Ok(map)
}

impl StyleMap {
    fn insert(&mut self, style: PendingStyle) {
        let Some(id) = style.id else {
            return;
        };
        let name = style
            .name
            .map(|n| builtin_display_name(&n))
            .unwrap_or_else(|| id.clone());

        if style.paragraph && style.default {
            self.default_paragraph = name.clone();
        }
        self.names.insert(id, name);
    }
}

/// Word stores built-in names in lowercase (`heading 1`, `title`).
fn builtin_display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => name.to_string(),
    }
}
