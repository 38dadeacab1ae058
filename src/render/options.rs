//! Rendering options for Markdown output.

use super::front_matter::{FrontMatterFields, HeaderKind};
use chrono::NaiveDate;

/// Options for Markdown rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Which front-matter template to emit.
    pub header_kind: HeaderKind,

    /// Placeholder values substituted into the front-matter template.
    pub front_matter: FrontMatterFields,

    /// Whether to prefix the output with the front-matter block.
    pub include_front_matter: bool,

    /// Date written into the `Topic` template.
    /// If None, today's local date is used.
    pub date: Option<NaiveDate>,

    /// Optional cap on heading levels.
    /// If None, a heading renders with as many `#` as its style level.
    pub max_heading_level: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            header_kind: HeaderKind::default(),
            front_matter: FrontMatterFields::default(),
            include_front_matter: true,
            date: None,
            max_heading_level: None,
        }
    }
}

impl RenderOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the front-matter template.
    pub fn with_header_kind(mut self, kind: HeaderKind) -> Self {
        self.header_kind = kind;
        self
    }

    /// Sets the front-matter title placeholder.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.front_matter.title = title.into();
        self
    }

    /// Sets the front-matter author placeholder.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.front_matter.author = author.into();
        self
    }

    /// Sets the front-matter description placeholder.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.front_matter.description = description.into();
        self
    }

    /// Pins the front-matter date instead of using today.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Disables the front-matter block.
    pub fn without_front_matter(mut self) -> Self {
        self.include_front_matter = false;
        self
    }

    /// Caps heading levels; a cap below 1 is raised to 1.
    pub fn with_max_heading_level(mut self, level: usize) -> Self {
        self.max_heading_level = Some(level.max(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.header_kind, HeaderKind::Topic);
        assert!(options.include_front_matter);
        assert!(options.date.is_none());
        assert_eq!(options.max_heading_level, None);
    }

    #[test]
    fn test_max_heading_level_is_opt_in() {
        assert_eq!(
            RenderOptions::default().with_max_heading_level(0).max_heading_level,
            Some(1)
        );
        assert_eq!(
            RenderOptions::default().with_max_heading_level(10).max_heading_level,
            Some(10)
        );
        assert_eq!(
            RenderOptions::default().with_max_heading_level(4).max_heading_level,
            Some(4)
        );
    }

    #[test]
    fn test_builder_chain() {
        let options = RenderOptions::new()
            .with_header_kind(HeaderKind::SubTopic)
            .with_title("Guide")
            .with_author("Docs Team")
            .with_description("How-to")
            .without_front_matter();

        assert_eq!(options.header_kind, HeaderKind::SubTopic);
        assert_eq!(options.front_matter.title, "Guide");
        assert_eq!(options.front_matter.author, "Docs Team");
        assert_eq!(options.front_matter.description, "How-to");
        assert!(!options.include_front_matter);
    }
}
