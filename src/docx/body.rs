//! Body parsing for `word/document.xml`.

use super::styles::StyleMap;
use super::xml::{attr, local_name, local_name_end, on_off, prefixed_attr, skip_element};
use crate::error::{Error, Result};
use crate::model::{Alignment, Block, Drawing, Paragraph, Run, Table, TableCell, TableRow};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Containers whose children are read as if they sat in the parent.
const TRANSPARENT: &[&str] = &[
    "document",
    "body",
    "sdt",
    "sdtContent",
    "customXml",
    "hyperlink",
    "fldSimple",
    "ins",
    "moveTo",
    "smartTag",
    "dir",
    "bdo",
    "AlternateContent",
    "Choice",
];

/// Parses the body of the main document part into blocks.
pub fn parse_body(xml: &str, styles: &StyleMap) -> Result<Vec<Block>> {
    let mut parser = BodyParser::new(xml, styles);
    parser.parse()
}

/// Cell as written in the XML, before merges are expanded.
struct RawCell {
    cell: TableCell,
    grid_span: usize,
    continues_merge: bool,
}

/// Body parser state machine.
struct BodyParser<'a> {
    reader: Reader<&'a [u8]>,
    styles: &'a StyleMap,
}

impl<'a> BodyParser<'a> {
    fn new(xml: &'a str, styles: &'a StyleMap) -> Self {
        Self {
            reader: Reader::from_str(xml),
            styles,
        }
    }

    fn parse(&mut self) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = local_name(&e);
                    buf.clear();

                    match name.as_str() {
                        "p" => blocks.push(Block::Paragraph(self.parse_paragraph()?)),
                        "tbl" => blocks.push(Block::Table(self.parse_table()?)),
                        n if TRANSPARENT.contains(&n) => {}
                        _ => skip_element(&mut self.reader)?,
                    }
                }
                Ok(Event::Empty(e)) => {
                    if local_name(&e) == "p" {
                        blocks.push(Block::Paragraph(self.empty_paragraph()));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(blocks)
    }

    fn empty_paragraph(&self) -> Paragraph {
        Paragraph::with_style(self.styles.resolve(None))
    }

    /// Parses a `<w:p>` element. Call right after its Start event.
    fn parse_paragraph(&mut self) -> Result<Paragraph> {
        let mut style_id = None;
        let mut alignment = Alignment::Left;
        let mut runs = Vec::new();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = local_name(&e);
                    buf.clear();

                    match name.as_str() {
                        "pPr" => self.parse_paragraph_properties(&mut style_id, &mut alignment)?,
                        "r" => runs.push(self.parse_run()?),
                        n if TRANSPARENT.contains(&n) => {}
                        // del, moveFrom, oMath, sdtPr, ...
                        _ => skip_element(&mut self.reader)?,
                    }
                }
                Ok(Event::End(e)) => {
                    if local_name_end(&e) == "p" {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        let mut paragraph = Paragraph::with_style(self.styles.resolve(style_id.as_deref()));
        paragraph.alignment = alignment;
        paragraph.runs = runs;
        Ok(paragraph)
    }

    fn parse_paragraph_properties(
        &mut self,
        style_id: &mut Option<String>,
        alignment: &mut Alignment,
    ) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) => match local_name(&e).as_str() {
                    "pStyle" => *style_id = attr(&e, "val"),
                    "jc" => *alignment = parse_alignment(attr(&e, "val").as_deref()),
                    _ => {}
                },
                Ok(Event::Start(e)) => {
                    let name = local_name(&e);
                    match name.as_str() {
                        "pStyle" => *style_id = attr(&e, "val"),
                        "jc" => *alignment = parse_alignment(attr(&e, "val").as_deref()),
                        _ => {}
                    }
                    buf.clear();
                    // rPr, pPrChange, sectPr, numPr, ...
                    skip_element(&mut self.reader)?;
                }
                Ok(Event::End(e)) => {
                    if local_name_end(&e) == "pPr" {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Parses a `<w:r>` element. Call right after its Start event.
    fn parse_run(&mut self) -> Result<Run> {
        let mut run = Run::default();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = local_name(&e);
                    buf.clear();

                    match name.as_str() {
                        "rPr" => self.parse_run_properties(&mut run)?,
                        "t" => {
                            let text = self.read_text("t")?;
                            run.text.push_str(&text);
                        }
                        "drawing" | "pict" | "object" => {
                            run.drawings.extend(self.scan_drawing()?);
                        }
                        "AlternateContent" | "Choice" => {}
                        "tab" | "br" | "cr" | "noBreakHyphen" => {
                            push_special(&mut run.text, &name);
                            skip_element(&mut self.reader)?;
                        }
                        // Fallback, instrText, delText, ruby, ...
                        _ => skip_element(&mut self.reader)?,
                    }
                }
                Ok(Event::Empty(e)) => {
                    push_special(&mut run.text, &local_name(&e));
                }
                Ok(Event::End(e)) => {
                    if local_name_end(&e) == "r" {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(run)
    }

    fn parse_run_properties(&mut self, run: &mut Run) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) => match local_name(&e).as_str() {
                    "b" => run.bold = on_off(&e),
                    "i" => run.italic = on_off(&e),
                    _ => {}
                },
                Ok(Event::Start(e)) => {
                    match local_name(&e).as_str() {
                        "b" => run.bold = on_off(&e),
                        "i" => run.italic = on_off(&e),
                        _ => {}
                    }
                    buf.clear();
                    skip_element(&mut self.reader)?;
                }
                Ok(Event::End(e)) => {
                    if local_name_end(&e) == "rPr" {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Collects text until the end tag `end`.
    fn read_text(&mut self, end: &str) -> Result<String> {
        let mut text = String::new();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Text(t)) => {
                    let s = t.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                    text.push_str(&s);
                }
                Ok(Event::CData(c)) => text.push_str(&String::from_utf8_lossy(&c)),
                Ok(Event::End(e)) => {
                    if local_name_end(&e) == end {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(text)
    }

    /// Scans a `w:drawing`, `w:pict` or `w:object` subtree for image
    /// references. Always yields at least one drawing.
    fn scan_drawing(&mut self) -> Result<Vec<Drawing>> {
        let mut drawings = Vec::new();
        let mut depth = 1;
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if local_name(&e) == "Fallback" {
                        buf.clear();
                        skip_element(&mut self.reader)?;
                    } else {
                        if let Some(id) = image_reference(&e) {
                            drawings.push(Drawing::embedded(id));
                        }
                        depth += 1;
                    }
                }
                Ok(Event::Empty(e)) => {
                    if let Some(id) = image_reference(&e) {
                        drawings.push(Drawing::embedded(id));
                    }
                }
                Ok(Event::End(_)) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        if drawings.is_empty() {
            drawings.push(Drawing::default());
        }
        Ok(drawings)
    }

    /// Parses a `<w:tbl>` element. Call right after its Start event.
    fn parse_table(&mut self) -> Result<Table> {
        let mut table = Table::new();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = local_name(&e);
                    buf.clear();

                    match name.as_str() {
                        "tr" => {
                            let raw = self.parse_row()?;
                            let row = expand_row(raw, table.rows.last());
                            table.rows.push(row);
                        }
                        "sdt" | "sdtContent" | "customXml" => {}
                        // tblPr, tblGrid, sdtPr, ...
                        _ => skip_element(&mut self.reader)?,
                    }
                }
                Ok(Event::End(e)) => {
                    if local_name_end(&e) == "tbl" {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(table)
    }

    fn parse_row(&mut self) -> Result<Vec<RawCell>> {
        let mut cells = Vec::new();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = local_name(&e);
                    buf.clear();

                    match name.as_str() {
                        "tc" => cells.push(self.parse_cell()?),
                        "sdt" | "sdtContent" | "customXml" => {}
                        _ => skip_element(&mut self.reader)?,
                    }
                }
                Ok(Event::Empty(e)) => {
                    if local_name(&e) == "tc" {
                        cells.push(RawCell {
                            cell: TableCell::new(),
                            grid_span: 1,
                            continues_merge: false,
                        });
                    }
                }
                Ok(Event::End(e)) => {
                    if local_name_end(&e) == "tr" {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(cells)
    }

    fn parse_cell(&mut self) -> Result<RawCell> {
        let mut raw = RawCell {
            cell: TableCell::new(),
            grid_span: 1,
            continues_merge: false,
        };
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = local_name(&e);
                    buf.clear();

                    match name.as_str() {
                        "p" => raw.cell.content.push(self.parse_paragraph()?),
                        "tcPr" => self.parse_cell_properties(&mut raw)?,
                        "sdt" | "sdtContent" | "customXml" => {}
                        // Nested tables are not rendered
                        _ => skip_element(&mut self.reader)?,
                    }
                }
                Ok(Event::Empty(e)) => {
                    if local_name(&e) == "p" {
                        raw.cell.content.push(self.empty_paragraph());
                    }
                }
                Ok(Event::End(e)) => {
                    if local_name_end(&e) == "tc" {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(raw)
    }

    fn parse_cell_properties(&mut self, raw: &mut RawCell) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) => match local_name(&e).as_str() {
                    "gridSpan" => {
                        raw.grid_span = attr(&e, "val")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(1)
                            .max(1);
                    }
                    "vMerge" => {
                        raw.continues_merge = attr(&e, "val").map_or(true, |v| v == "continue");
                    }
                    _ => {}
                },
                Ok(Event::Start(_)) => {
                    buf.clear();
                    skip_element(&mut self.reader)?;
                }
                Ok(Event::End(e)) => {
                    if local_name_end(&e) == "tcPr" {
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }
}

fn parse_alignment(value: Option<&str>) -> Alignment {
    match value {
        Some("center") => Alignment::Center,
        Some("right") | Some("end") => Alignment::Right,
        Some("both") | Some("distribute") => Alignment::Justify,
        _ => Alignment::Left,
    }
}

/// Appends the text of an empty run-content element.
fn push_special(text: &mut String, name: &str) {
    match name {
        "tab" => text.push('\t'),
        "br" | "cr" => text.push('\n'),
        "noBreakHyphen" => text.push('-'),
        _ => {}
    }
}

/// Relationship id of a DrawingML blip or a VML image.
fn image_reference(e: &quick_xml::events::BytesStart) -> Option<String> {
    match local_name(e).as_str() {
        "blip" => prefixed_attr(e, "embed"),
        "imagedata" => prefixed_attr(e, "id"),
        _ => None,
    }
}

/// Expands horizontal spans and vertical merge continuations so every
/// grid column holds a cell.
fn expand_row(raw: Vec<RawCell>, above: Option<&TableRow>) -> TableRow {
    let mut cells: Vec<TableCell> = Vec::with_capacity(raw.len());

    for raw_cell in raw {
        let cell = if raw_cell.continues_merge {
            above
                .and_then(|row| row.cells.get(cells.len()))
                .cloned()
                .unwrap_or(raw_cell.cell)
        } else {
            raw_cell.cell
        };

        for _ in 1..raw_cell.grid_span {
            cells.push(cell.clone());
        }
        cells.push(cell);
    }

    TableRow { cells }
}
