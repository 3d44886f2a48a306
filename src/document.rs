//! A small cell based page builder on top of `lopdf`.
//!
//! Coordinates are millimetres measured from the top left corner of an A4
//! portrait page. Cells are laid out left to right from a cursor; `ln` moves
//! the cursor back to the left margin and down. The placed cells are kept as
//! a display list and only turned into PDF objects when the document is
//! encoded.

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::error::RenderError;
use crate::fonts::{self, Font, Style};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 10.0;
const BOTTOM_MARGIN: f32 = 2.0 * MARGIN;
const CELL_PADDING: f32 = MARGIN / 10.0;
const LINE_WIDTH: f32 = 0.2;

const PT_PER_MM: f32 = 72.0 / 25.4;

fn pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Border {
    None,
    Frame,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Cell {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
    pub font: Font,
    pub border: Border,
    pub align: Align,
}

impl Cell {
    /// Horizontal distance from the left edge of the cell to the text.
    pub fn text_offset(&self) -> f32 {
        match self.align {
            Align::Left => CELL_PADDING,
            Align::Center => {
                (self.width - self.font.text_width(&self.text) / PT_PER_MM)
                    / 2.0
            }
        }
    }

    pub fn is_past_bottom(&self) -> bool {
        self.y + self.height > PAGE_HEIGHT - BOTTOM_MARGIN
    }

    /// Distance from the top of the page to the text baseline.
    pub fn baseline(&self) -> f32 {
        self.y + 0.5 * self.height + 0.3 * self.font.size / PT_PER_MM
    }

    fn operations(&self) -> Vec<Operation> {
        let mut ops = Vec::new();

        if self.border == Border::Frame {
            ops.push(Operation::new(
                "re",
                vec![
                    pt(self.x).into(),
                    pt(PAGE_HEIGHT - self.y - self.height).into(),
                    pt(self.width).into(),
                    pt(self.height).into(),
                ],
            ));
            ops.push(Operation::new("S", vec![]));
        }

        if !self.text.is_empty() {
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![self.font.style.resource().into(), self.font.size.into()],
            ));
            ops.push(Operation::new(
                "Td",
                vec![
                    pt(self.x + self.text_offset()).into(),
                    pt(PAGE_HEIGHT - self.baseline()).into(),
                ],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(fonts::win_ansi(&self.text))],
            ));
            ops.push(Operation::new("ET", vec![]));
        }

        ops
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Page {
    cells: Vec<Cell>,
}

impl Page {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn content(&self) -> Content {
        let mut operations =
            vec![Operation::new("w", vec![pt(LINE_WIDTH).into()])];
        operations.extend(self.cells.iter().flat_map(Cell::operations));
        Content { operations }
    }
}

#[derive(Debug)]
pub struct Document {
    pages: Vec<Page>,
    font: Font,
    x: f32,
    y: f32,
}

impl Document {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            font: Font::default(),
            x: MARGIN,
            y: MARGIN,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Start a new page with the cursor at the top left margin.
    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.x = MARGIN;
        self.y = MARGIN;
    }

    pub fn set_font(&mut self, style: Style, size: f32) {
        self.font = Font::new(style, size);
    }

    /// Place a cell at the cursor and move the cursor to its right edge.
    pub fn cell(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        border: Border,
        align: Align,
    ) {
        if self.pages.is_empty() {
            self.add_page();
        }

        let cell = Cell {
            x: self.x,
            y: self.y,
            width,
            height,
            text: text.to_string(),
            font: self.font,
            border,
            align,
        };
        if let Some(page) = self.pages.last_mut() {
            page.cells.push(cell);
        }
        self.x += width;
    }

    /// Number of rows, across all pages, that reach past the bottom margin.
    pub fn rows_past_bottom(&self) -> usize {
        let mut rows = 0;
        for page in self.pages().iter() {
            let mut row_y = None;
            for cell in page.cells().iter().filter(|c| c.is_past_bottom()) {
                if row_y != Some(cell.y) {
                    rows += 1;
                    row_y = Some(cell.y);
                }
            }
        }
        rows
    }

    /// Move the cursor to the left margin, `height` further down.
    pub fn ln(&mut self, height: f32) {
        self.x = MARGIN;
        self.y += height;
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RenderError> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for style in Style::iter() {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => Object::Name(style.to_string().into_bytes()),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(style.resource(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in self.pages.iter() {
            let content = page.content().encode()?;
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            pt(PAGE_WIDTH).into(),
            pt(PAGE_HEIGHT).into(),
        ];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Encode the document and write it to `path` in a single write.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "document written");
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn cursor_moves_right_then_down() {
        let mut doc = Document::new();
        doc.add_page();
        doc.cell(70.0, 10.0, "a", Border::Frame, Align::Left);
        doc.cell(30.0, 10.0, "b", Border::Frame, Align::Center);
        doc.ln(10.0);
        doc.cell(40.0, 10.0, "c", Border::None, Align::Left);

        let cells = doc.pages()[0].cells();
        assert_eq!((cells[0].x, cells[0].y), (MARGIN, MARGIN));
        assert_eq!((cells[1].x, cells[1].y), (MARGIN + 70.0, MARGIN));
        assert_eq!((cells[2].x, cells[2].y), (MARGIN, MARGIN + 10.0));
    }

    #[test]
    fn cell_without_page_starts_one() {
        let mut doc = Document::new();
        doc.cell(40.0, 10.0, "Factura", Border::None, Align::Left);
        assert_eq!(doc.pages().len(), 1);
        assert_eq!(doc.pages()[0].cells().len(), 1);
    }

    #[test]
    fn cells_keep_the_font_they_were_placed_with() {
        let mut doc = Document::new();
        doc.set_font(Style::Bold, 16.0);
        doc.cell(40.0, 10.0, "Factura", Border::None, Align::Left);
        doc.set_font(Style::Regular, 12.0);
        doc.cell(40.0, 10.0, "Cliente", Border::None, Align::Left);

        let cells = doc.pages()[0].cells();
        assert_eq!(cells[0].font, Font::new(Style::Bold, 16.0));
        assert_eq!(cells[1].font, Font::new(Style::Regular, 12.0));
    }

    #[test]
    fn text_alignment() {
        let mut doc = Document::new();
        doc.cell(40.0, 10.0, "Total", Border::Frame, Align::Left);
        doc.cell(40.0, 10.0, "Total", Border::Frame, Align::Center);
        let cells = doc.pages()[0].cells();

        assert!(approx(cells[0].text_offset(), CELL_PADDING));

        let text_width = cells[1].font.text_width("Total") / PT_PER_MM;
        let offset = cells[1].text_offset();
        assert!(approx(offset * 2.0 + text_width, 40.0));
    }

    #[test]
    fn baseline_is_vertically_centred() {
        let mut doc = Document::new();
        doc.cell(40.0, 10.0, "x", Border::None, Align::Left);
        let cell = &doc.pages()[0].cells()[0];
        let font_mm = 12.0 / PT_PER_MM;
        assert!(approx(cell.baseline(), MARGIN + 5.0 + 0.3 * font_mm));
    }

    #[test]
    fn counts_rows_past_the_bottom_margin() {
        let mut doc = Document::new();
        doc.add_page();
        doc.ln(PAGE_HEIGHT - BOTTOM_MARGIN - MARGIN - 10.0);
        doc.cell(40.0, 10.0, "last", Border::Frame, Align::Left);
        doc.cell(40.0, 10.0, "fits", Border::Frame, Align::Left);
        assert_eq!(doc.rows_past_bottom(), 0);

        doc.ln(10.0);
        doc.cell(40.0, 10.0, "a", Border::Frame, Align::Left);
        doc.cell(40.0, 10.0, "b", Border::Frame, Align::Left);
        doc.ln(10.0);
        doc.cell(40.0, 10.0, "c", Border::Frame, Align::Left);
        assert_eq!(doc.rows_past_bottom(), 2);
    }

    #[test]
    fn empty_unbordered_cell_draws_nothing() {
        let mut doc = Document::new();
        doc.cell(70.0, 10.0, "", Border::None, Align::Left);
        assert!(doc.pages()[0].cells()[0].operations().is_empty());
    }

    #[test]
    fn bordered_cell_draws_a_rectangle() {
        let mut doc = Document::new();
        doc.cell(40.0, 10.0, "Total", Border::Frame, Align::Center);
        let ops = doc.pages()[0].cells()[0].operations();
        let operators: Vec<&str> =
            ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["re", "S", "BT", "Tf", "Td", "Tj", "ET"]);
    }

    #[test]
    fn encodes_a_readable_pdf() {
        let mut doc = Document::new();
        doc.add_page();
        doc.set_font(Style::Bold, 16.0);
        doc.cell(40.0, 10.0, "Factura", Border::None, Align::Left);

        let bytes = doc.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factura.pdf");
        fs::write(&path, b"stale").unwrap();

        let mut doc = Document::new();
        doc.cell(40.0, 10.0, "Factura", Border::None, Align::Left);
        doc.save(&path).unwrap();

        let written = fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("factura.pdf");

        let result = Document::new().save(&path);
        assert!(matches!(result, Err(RenderError::Io { .. })));
    }
}
