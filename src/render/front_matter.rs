//! Static front-matter templates for documentation sites.
//!
//! Two layouts exist: a top-level topic page (with a `last_updated` block)
//! and a sub-topic page (nested under `menu.main`). Both are literal
//! templates; nothing is derived from the document content.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Date format used by the `last_updated.date` field.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Default title placeholder.
pub const DEFAULT_TITLE: &str = "Titulo da sua documentação";

/// Default author placeholder.
pub const DEFAULT_AUTHOR: &str = "Seu nome";

/// Default description placeholder.
pub const DEFAULT_DESCRIPTION: &str = "Descrição da sua documentação";

/// Front-matter template selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum HeaderKind {
    /// Top-level page: `last_updated` with date and author, `sidebar_position`.
    #[default]
    Topic,
    /// Nested page: `menu.main.sidebar_position` and a `description`.
    SubTopic,
}

impl HeaderKind {
    /// Maps a user-facing selector to a template.
    ///
    /// `"indice"`, `"topico"` and `"topic"` (any case) select [`HeaderKind::Topic`];
    /// every other value selects [`HeaderKind::SubTopic`].
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_lowercase().as_str() {
            "indice" | "topico" | "tópico" | "topic" => HeaderKind::Topic,
            _ => HeaderKind::SubTopic,
        }
    }
}

impl FromStr for HeaderKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_selector(s))
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderKind::Topic => write!(f, "topic"),
            HeaderKind::SubTopic => write!(f, "sub-topic"),
        }
    }
}

/// Placeholder values substituted into the templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterFields {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl Default for FrontMatterFields {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// Builds the front-matter lines for `kind`.
///
/// The last line is `"---\n"`, so joining the output with `"\n"` leaves a
/// blank line before the body.
pub fn front_matter_lines(
    kind: HeaderKind,
    fields: &FrontMatterFields,
    date: NaiveDate,
) -> Vec<String> {
    let title = format!("title: \"{}\"", escape_yaml(&fields.title));
    match kind {
        HeaderKind::Topic => vec![
            "---".to_string(),
            title,
            "type: docs".to_string(),
            "last_updated: ".to_string(),
            format!("\tdate: \"{}\"", date.format(DATE_FORMAT)),
            format!("\tauthor: \"{}\"", escape_yaml(&fields.author)),
            "sidebar_position: 1".to_string(),
            "---\n".to_string(),
        ],
        HeaderKind::SubTopic => vec![
            "---".to_string(),
            title,
            "type: docs".to_string(),
            "menu: ".to_string(),
            "\tmain:".to_string(),
            "\t\tsidebar_position: 1".to_string(),
            format!("description: \"{}\"", escape_yaml(&fields.description)),
            "---\n".to_string(),
        ],
    }
}

/// Escapes special characters for YAML strings.
fn escape_yaml(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_topic_template() {
        let lines = front_matter_lines(HeaderKind::Topic, &FrontMatterFields::default(), date());
        assert_eq!(
            lines.join("\n"),
            "---\n\
             title: \"Titulo da sua documentação\"\n\
             type: docs\n\
             last_updated: \n\
             \tdate: \"03/07/2024\"\n\
             \tauthor: \"Seu nome\"\n\
             sidebar_position: 1\n\
             ---\n"
        );
    }

    #[test]
    fn test_sub_topic_template() {
        let lines =
            front_matter_lines(HeaderKind::SubTopic, &FrontMatterFields::default(), date());
        assert_eq!(
            lines.join("\n"),
            "---\n\
             title: \"Titulo da sua documentação\"\n\
             type: docs\n\
             menu: \n\
             \tmain:\n\
             \t\tsidebar_position: 1\n\
             description: \"Descrição da sua documentação\"\n\
             ---\n"
        );
    }

    #[test]
    fn test_sub_topic_has_no_date() {
        let lines =
            front_matter_lines(HeaderKind::SubTopic, &FrontMatterFields::default(), date());
        assert!(!lines.iter().any(|l| l.contains("03/07/2024")));
    }

    #[test]
    fn test_selector_mapping() {
        assert_eq!(HeaderKind::from_selector("indice"), HeaderKind::Topic);
        assert_eq!(HeaderKind::from_selector("Topico"), HeaderKind::Topic);
        assert_eq!(HeaderKind::from_selector("topic"), HeaderKind::Topic);
        assert_eq!(HeaderKind::from_selector("Sub-Topico"), HeaderKind::SubTopic);
        assert_eq!(HeaderKind::from_selector("anything"), HeaderKind::SubTopic);
        assert_eq!("INDICE".parse::<HeaderKind>().unwrap(), HeaderKind::Topic);
    }

    #[test]
    fn test_fields_are_escaped() {
        let fields = FrontMatterFields {
            title: "Say \"hi\"".to_string(),
            ..Default::default()
        };
        let lines = front_matter_lines(HeaderKind::Topic, &fields, date());
        assert_eq!(lines[1], "title: \"Say \\\"hi\\\"\"");
    }
}
