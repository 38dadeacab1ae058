//! Run-level emphasis markup.

use crate::model::{Paragraph, Run};

/// Wraps `text` in Markdown emphasis according to the run flags.
///
/// Bold and italic together use `___text___`, bold alone `**text**`,
/// italic alone `_text_`. Whitespace-only text is returned unchanged so
/// spacing runs never turn into empty-looking markers.
pub fn format_run(text: &str, bold: bool, italic: bool) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    match (bold, italic) {
        (true, true) => format!("___{}___", text),
        (true, false) => format!("**{}**", text),
        (false, true) => format!("_{}_", text),
        (false, false) => text.to_string(),
    }
}

/// Formats a single run.
pub fn render_run(run: &Run) -> String {
    format_run(&run.text, run.bold, run.italic)
}

/// Concatenates the formatted runs of a paragraph in order.
///
/// A paragraph without runs falls back to its raw text, unformatted.
pub fn paragraph_text(paragraph: &Paragraph) -> String {
    if paragraph.runs.is_empty() {
        return paragraph.raw_text.clone();
    }
    paragraph.runs.iter().map(render_run).collect()
}
