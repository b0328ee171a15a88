//! PDF report
//!
//! Layout is planned first as plain positioned text ([`plan_report`]), then
//! drawn with `printpdf`. Coordinates are millimetres from the bottom-left
//! corner of an A4 page.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::error::{BookstoreError, BookstoreResult};
use crate::models::Book;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;

const TITLE_Y: f32 = PAGE_HEIGHT_MM - 20.0;
const HEADER_Y: f32 = PAGE_HEIGHT_MM - 30.0;
/// Where rows resume on continuation pages
const CONTINUATION_Y: f32 = PAGE_HEIGHT_MM - 20.0;
const ROW_STEP: f32 = 7.0;
const BOTTOM_MARGIN: f32 = 20.0;

/// Helvetica averages roughly half an em per glyph; 1pt = 0.3528mm
const AVG_GLYPH_MM_PER_PT: f32 = 0.5 * 0.3528;

struct Column {
    label: &'static str,
    x: f32,
    /// Free-text columns are cut to this width; numeric ones are never altered
    truncate_at: Option<f32>,
}

const COLUMNS: [Column; 5] = [
    Column { label: "ID", x: 20.0, truncate_at: None },
    Column { label: "Title", x: 40.0, truncate_at: Some(60.0) },
    Column { label: "Author", x: 100.0, truncate_at: Some(50.0) },
    Column { label: "Year", x: 150.0, truncate_at: None },
    Column { label: "Price", x: 170.0, truncate_at: None },
];

/// A single run of text on a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
}

/// Everything drawn on one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub items: Vec<TextItem>,
}

impl ReportPage {
    /// Number of book rows on this page (the header row excluded)
    pub fn row_count(&self) -> usize {
        let first_column = COLUMNS[0].x;
        self.items
            .iter()
            .filter(|item| !item.bold && item.x == first_column)
            .count()
    }
}

/// Lay the books out over as many pages as needed
pub fn plan_report(title: &str, books: &[Book]) -> Vec<ReportPage> {
    let mut pages = Vec::new();
    let mut page = ReportPage::default();

    let title_width = title.chars().count() as f32 * TITLE_SIZE * AVG_GLYPH_MM_PER_PT;
    page.items.push(TextItem {
        text: title.to_string(),
        x: ((PAGE_WIDTH_MM - title_width) / 2.0).max(0.0),
        y: TITLE_Y,
        size: TITLE_SIZE,
        bold: true,
    });

    for column in &COLUMNS {
        page.items.push(TextItem {
            text: column.label.to_string(),
            x: column.x,
            y: HEADER_Y,
            size: BODY_SIZE,
            bold: true,
        });
    }

    let mut y = HEADER_Y - ROW_STEP;
    for book in books {
        if y < BOTTOM_MARGIN {
            pages.push(std::mem::take(&mut page));
            y = CONTINUATION_Y;
        }

        let cells = [
            book.id.to_string(),
            book.title.clone(),
            book.author.clone(),
            book.year_label(),
            book.price_label(),
        ];
        for (column, text) in COLUMNS.iter().zip(cells) {
            page.items.push(TextItem {
                text: match column.truncate_at {
                    Some(width) => fit_to_width(&text, width, BODY_SIZE),
                    None => text,
                },
                x: column.x,
                y,
                size: BODY_SIZE,
                bold: false,
            });
        }

        y -= ROW_STEP;
    }

    pages.push(page);
    pages
}

/// Draw a planned report into a PDF file
pub fn write_report_pdf(title: &str, pages: &[ReportPage], path: &Path) -> BookstoreResult<()> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(report_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(report_error)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page_index).get_layer(layer_index);
        }
        draw_page(&layer, page, &regular, &bold);
    }

    let file = File::create(path).map_err(|e| {
        BookstoreError::Report(format!("Failed to create {}: {}", path.display(), e))
    })?;
    doc.save(&mut BufWriter::new(file)).map_err(report_error)?;

    Ok(())
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &ReportPage,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for item in &page.items {
        let font = if item.bold { bold } else { regular };
        layer.use_text(item.text.as_str(), item.size, Mm(item.x), Mm(item.y), font);
    }
}

/// Truncate `text` so it stays inside a column, marking the cut with "..."
fn fit_to_width(text: &str, width_mm: f32, size: f32) -> String {
    let max_chars = (width_mm / (size * AVG_GLYPH_MM_PER_PT)).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn report_error(err: impl std::fmt::Display) -> BookstoreError {
    BookstoreError::Report(err.to_string())
}
