//! Paragraph and table transcoding.

use super::format::{paragraph_text, render_run};
use super::images::ImageMap;
use super::links::annotate_links;
use super::RenderOptions;
use crate::model::{Alignment, Paragraph, Table, TableCell, NORMAL_STYLE};

/// Prefix shared by all heading style names.
const HEADING_STYLE_PREFIX: &str = "Heading";

/// Delimiter cell under each header column.
const TABLE_DELIMITER: &str = "---";

/// Parses the heading level from a style name.
///
/// `"Heading 2"` yields `Some(2)`. Names that do not start with `Heading`,
/// carry no digits, or carry a zero level yield `None`.
pub fn heading_level(style_name: &str) -> Option<usize> {
    let rest = style_name.strip_prefix(HEADING_STYLE_PREFIX)?;
    let digits: String = rest
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(level) => Some(level),
    }
}

/// Renders one paragraph into Markdown lines.
///
/// A paragraph that anchors any drawing renders only its images, in run
/// order; its text is dropped. Every emitted line ends with `\n`.
pub fn render_paragraph(
    paragraph: &Paragraph,
    images: &ImageMap,
    options: &RenderOptions,
) -> Vec<String> {
    if paragraph.has_drawing() {
        return paragraph_images(paragraph, images)
            .map(str::to_string)
            .collect();
    }

    let text = annotate_links(&paragraph_text(paragraph));
    let style = paragraph.style_name.as_str();

    if style.starts_with(HEADING_STYLE_PREFIX) {
        match heading_level(style) {
            Some(level) => {
                let level = options.max_heading_level.map_or(level, |cap| level.min(cap));
                return vec![format!("{} {}\n", "#".repeat(level), text)];
            }
            None => {
                tracing::warn!(style = %style, "Heading style without level, rendering as paragraph");
            }
        }
    } else if style == NORMAL_STYLE && paragraph.alignment == Alignment::Center {
        return vec![format!("<p align='center'>{}</p>\n", text)];
    }

    vec![format!("{}\n", text)]
}

/// Renders one table into Markdown lines, framed by blank lines.
///
/// The header row uses plain cell text; body cells use the first
/// paragraph's formatted runs with images spliced in and links rewritten.
/// Rows are emitted as-is, without padding ragged ones.
pub fn render_table(table: &Table, images: &ImageMap) -> Vec<String> {
    let Some((header, body)) = table.rows.split_first() else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 3);
    lines.push(String::new());

    let headers: Vec<String> = header
        .cells
        .iter()
        .map(|cell| single_line(cell.plain_text().trim()))
        .collect();
    lines.push(table_row(&headers));
    lines.push(table_row(&vec![TABLE_DELIMITER.to_string(); headers.len()]));

    for row in body {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| render_cell(cell, images))
            .collect();
        lines.push(table_row(&cells));
    }

    lines.push(String::new());
    lines
}

/// Image tags for every embed of the paragraph found in the map.
fn paragraph_images<'a>(
    paragraph: &'a Paragraph,
    images: &'a ImageMap,
) -> impl Iterator<Item = &'a str> {
    paragraph
        .runs
        .iter()
        .flat_map(|run| run.embeds())
        .filter_map(|id| images.get(id).map(String::as_str))
}

fn render_cell(cell: &TableCell, images: &ImageMap) -> String {
    let Some(paragraph) = cell.first_paragraph() else {
        return String::new();
    };

    let mut text = String::new();
    if paragraph.runs.is_empty() {
        text.push_str(&paragraph.raw_text);
    }
    for run in &paragraph.runs {
        text.push_str(&render_run(run));
        for id in run.embeds() {
            if let Some(tag) = images.get(id) {
                text.push_str(tag.trim_end());
            }
        }
    }

    single_line(annotate_links(&text).trim())
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Keeps a cell on one line.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Drawing, Run, TableRow};
    use pretty_assertions::assert_eq;

    fn image_map() -> ImageMap {
        let mut map = ImageMap::new();
        map.insert(
            "rId5".to_string(),
            "![imagen1.png](./img/imagen1.png)\n".to_string(),
        );
        map.insert(
            "rId6".to_string(),
            "![imagen2.png](./img/imagen2.png)\n".to_string(),
        );
        map
    }

    fn render(paragraph: &Paragraph) -> Vec<String> {
        render_paragraph(paragraph, &ImageMap::new(), &RenderOptions::default())
    }

    #[test]
    fn test_heading_level_parsing() {
        assert_eq!(heading_level("Heading 1"), Some(1));
        assert_eq!(heading_level("Heading 2"), Some(2));
        assert_eq!(heading_level("Heading2"), Some(2));
        assert_eq!(heading_level("Heading 12"), Some(12));
        assert_eq!(heading_level("Heading 300"), Some(300));
        assert_eq!(heading_level("Heading"), None);
        assert_eq!(heading_level("Heading 0"), None);
        assert_eq!(heading_level("Heading Custom"), None);
        assert_eq!(heading_level("Normal"), None);
        assert_eq!(heading_level("Title 1"), None);
    }

    #[test]
    fn test_heading_paragraph() {
        let para = Paragraph::with_style("Heading 2").with_run(Run::new("Setup"));
        assert_eq!(render(&para), vec!["## Setup\n"]);
    }

    #[test]
    fn test_heading_keeps_run_formatting() {
        let para = Paragraph::with_style("Heading 1")
            .with_run(Run::new("Install "))
            .with_run(Run::bold("now"));
        assert_eq!(render(&para), vec!["# Install **now**\n"]);
    }

    #[test]
    fn test_deep_heading_is_not_capped_by_default() {
        let para = Paragraph::with_style("Heading 8").with_run(Run::new("Deep"));
        assert_eq!(render(&para), vec!["######## Deep\n"]);
    }

    #[test]
    fn test_heading_level_capped_by_options() {
        let para = Paragraph::with_style("Heading 8").with_run(Run::new("Deep"));
        let options = RenderOptions::default().with_max_heading_level(4);
        assert_eq!(
            render_paragraph(&para, &ImageMap::new(), &options),
            vec!["#### Deep\n"]
        );
    }

    #[test]
    fn test_heading_without_digits_is_plain() {
        let para = Paragraph::with_style("Heading").with_run(Run::new("Oops"));
        assert_eq!(render(&para), vec!["Oops\n"]);
    }

    #[test]
    fn test_centered_normal_paragraph() {
        let para = Paragraph::text("Hello").aligned(Alignment::Center);
        assert_eq!(render(&para), vec!["<p align='center'>Hello</p>\n"]);
    }

    #[test]
    fn test_centered_non_normal_style_is_plain() {
        let para = Paragraph::with_style("Quote")
            .with_run(Run::new("Cited"))
            .aligned(Alignment::Center);
        assert_eq!(render(&para), vec!["Cited\n"]);
    }

    #[test]
    fn test_plain_paragraph_with_link() {
        let para = Paragraph::text("See https://www.example.co.uk/docs now");
        assert_eq!(
            render(&para),
            vec!["See [example.co.uk](https://www.example.co.uk/docs) now\n"]
        );
    }

    #[test]
    fn test_empty_paragraph_is_blank_line() {
        assert_eq!(render(&Paragraph::new()), vec!["\n"]);
    }

    #[test]
    fn test_image_paragraph_emits_only_image() {
        let para = Paragraph::new().with_run(Run::image("rId5"));
        assert_eq!(
            render_paragraph(&para, &image_map(), &RenderOptions::default()),
            vec!["![imagen1.png](./img/imagen1.png)\n"]
        );
    }

    #[test]
    fn test_image_suppresses_paragraph_text() {
        let para = Paragraph::with_style("Heading 1")
            .with_run(Run::new("Caption text"))
            .with_run(Run::image("rId6"))
            .with_run(Run::image("rId5"));
        assert_eq!(
            render_paragraph(&para, &image_map(), &RenderOptions::default()),
            vec![
                "![imagen2.png](./img/imagen2.png)\n",
                "![imagen1.png](./img/imagen1.png)\n",
            ]
        );
    }

    #[test]
    fn test_unmapped_drawing_emits_nothing() {
        let mut run = Run::new("chart");
        run.drawings.push(Drawing::default());
        let para = Paragraph::new()
            .with_run(run)
            .with_run(Run::image("rId99"));
        assert!(render_paragraph(&para, &image_map(), &RenderOptions::default()).is_empty());
    }

    #[test]
    fn test_simple_table() {
        let table = Table::from_text([["A", "B"], ["1", "2"]]);
        let lines = render_table(&table, &ImageMap::new());
        assert_eq!(
            lines.join("\n"),
            "\n| A | B |\n| --- | --- |\n| 1 | 2 |\n"
        );
    }

    #[test]
    fn test_header_is_plain_and_trimmed() {
        let header = TableRow {
            cells: vec![
                TableCell::paragraph(Paragraph::new().with_run(Run::bold("  Name "))),
                TableCell {
                    content: vec![Paragraph::text("Two"), Paragraph::text("lines")],
                },
            ],
        };
        let table = Table {
            rows: vec![header],
        };
        let lines = render_table(&table, &ImageMap::new());
        assert_eq!(lines[1], "| Name | Two lines |");
        assert_eq!(lines[2], "| --- | --- |");
    }

    #[test]
    fn test_body_cells_formatted_with_images_and_links() {
        let mut table = Table::from_text([["Item", "Preview", "Link"]]);
        table.rows.push(TableRow {
            cells: vec![
                TableCell::paragraph(
                    Paragraph::new()
                        .with_run(Run::bold("Logo"))
                        .with_run(Run::new(" ")),
                ),
                TableCell::paragraph(
                    Paragraph::new()
                        .with_run(Run::new("see "))
                        .with_run(Run::image("rId5")),
                ),
                TableCell {
                    content: vec![
                        Paragraph::text("https://docs.example.com/start"),
                        Paragraph::text("ignored second paragraph"),
                    ],
                },
            ],
        });

        let lines = render_table(&table, &image_map());
        assert_eq!(
            lines[3],
            "| **Logo** | see ![imagen1.png](./img/imagen1.png) | [example.com](https://docs.example.com/start) |"
        );
    }

    #[test]
    fn test_ragged_rows_emitted_as_is() {
        let mut table = Table::from_text([["A", "B", "C"]]);
        table.rows.push(TableRow {
            cells: vec![TableCell::text("only one")],
        });
        table.rows.push(TableRow {
            cells: vec![TableCell::new(), TableCell::text("x")],
        });
        let lines = render_table(&table, &ImageMap::new());
        assert_eq!(lines[3], "| only one |");
        assert_eq!(lines[4], "|  | x |");
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert!(render_table(&Table::new(), &ImageMap::new()).is_empty());
    }
}
