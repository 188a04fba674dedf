//! Printable invoice document.
//!
//! Composition and painting are split: [`InvoiceLayout::compose`] decides
//! everything structural (blocks, rows, pagination, footers) as a pure
//! function, and the painter here puts that model onto A4 pages with
//! `printpdf`. Rendering the same invoice and profile twice therefore
//! produces the same document.

mod layout;

pub use layout::{InvoiceLayout, Page, TABLE_COLUMNS, TableRow, TotalsBlock};

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};

use crate::core::{BusinessProfile, FactureError, Invoice};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 10.0;

// Items table: Description, Qté, Prix unitaire, TVA %, Total HT.
const COL_WIDTHS: [f32; 5] = [80.0, 20.0, 30.0, 25.0, 35.0];
const HEADER_ROW_H: f32 = 7.0;
const ROW_H: f32 = 6.0;
/// Top of the items table on the first page (header blocks above it).
const TABLE_TOP_FIRST: f32 = 205.0;
/// Top of the items table on continuation pages.
const TABLE_TOP_CONT: f32 = 270.0;

/// Approximate Helvetica glyph advance per point of font size, in mm.
/// Used for right-aligned and centered cells; built-in fonts carry no
/// metrics at this layer.
const CHAR_W_PER_PT: f32 = 0.18;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

/// Default artifact name: `Facture_{id}_{issue-date}.pdf`.
///
/// The issue date (not the wall clock) keeps the name reproducible.
pub fn default_file_name(invoice: &Invoice) -> String {
    format!("Facture_{}_{}.pdf", invoice.id, invoice.date.format("%Y%m%d"))
}

/// Render the invoice document and write it to `path`, or to the default
/// file name in the current directory. Returns the path written.
pub fn render_to_file(
    invoice: &Invoice,
    profile: &BusinessProfile,
    path: Option<&Path>,
) -> Result<PathBuf, FactureError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_file_name(invoice)));

    let doc = paint(&InvoiceLayout::compose(invoice, profile))?;
    let file = File::create(&path)
        .map_err(|e| FactureError::Render(format!("failed to create {}: {e}", path.display())))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| FactureError::Render(format!("failed to save PDF: {e}")))?;
    Ok(path)
}

/// Render the invoice document in memory.
pub fn render_bytes(
    invoice: &Invoice,
    profile: &BusinessProfile,
) -> Result<Vec<u8>, FactureError> {
    let doc = paint(&InvoiceLayout::compose(invoice, profile))?;
    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| FactureError::Render(format!("failed to save PDF: {e}")))?;
    writer
        .into_inner()
        .map_err(|e| FactureError::Render(format!("failed to flush PDF buffer: {e}")))
}

fn paint(layout: &InvoiceLayout) -> Result<PdfDocumentReference, FactureError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(&layout.title, Mm(PAGE_W), Mm(PAGE_H), "calque");

    let fonts = Fonts {
        regular: builtin(&doc, BuiltinFont::Helvetica)?,
        bold: builtin(&doc, BuiltinFont::HelveticaBold)?,
        oblique: builtin(&doc, BuiltinFont::HelveticaOblique)?,
    };

    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "calque");
            doc.get_page(p).get_layer(l)
        };
        layer.set_outline_color(Color::Rgb(Rgb::new(0.4, 0.4, 0.4, None)));
        layer.set_outline_thickness(0.2);

        let table_top = if index == 0 {
            paint_header_blocks(&layer, &fonts, layout);
            TABLE_TOP_FIRST
        } else {
            TABLE_TOP_CONT
        };

        paint_table(&layer, &fonts, page, table_top);

        if index == layout.pages.len() - 1 {
            let table_bottom = table_top - HEADER_ROW_H - page.rows.len() as f32 * ROW_H;
            paint_trailer(&layer, &fonts, layout, table_bottom - 10.0);
        }

        let footer_x = (PAGE_W - text_width(&page.footer, 8.0)) / 2.0;
        layer.use_text(&page.footer, 8.0, Mm(footer_x), Mm(8.0), &fonts.oblique);
    }

    Ok(doc)
}

fn builtin(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, FactureError> {
    doc.add_builtin_font(font)
        .map_err(|e| FactureError::Render(format!("failed to load builtin font: {e}")))
}

fn paint_header_blocks(layer: &PdfLayerReference, fonts: &Fonts, layout: &InvoiceLayout) {
    // Title band
    layer.use_text(&layout.title, 16.0, Mm(88.0), Mm(280.0), &fonts.bold);
    layer.use_text(&layout.numero, 12.0, Mm(150.0), Mm(281.0), &fonts.bold);

    // Company block
    let mut y = 270.0;
    for (i, line) in layout.company.iter().enumerate() {
        if i == 0 {
            layer.use_text(line, 12.0, Mm(MARGIN), Mm(y), &fonts.bold);
            y -= 6.0;
        } else {
            layer.use_text(line, 10.0, Mm(MARGIN), Mm(y), &fonts.regular);
            y -= 5.0;
        }
    }

    // Client block
    layer.use_text("CLIENT:", 11.0, Mm(MARGIN), Mm(240.0), &fonts.bold);
    let mut y = 234.0;
    for line in &layout.client {
        layer.use_text(line, 10.0, Mm(MARGIN), Mm(y), &fonts.regular);
        y -= 5.0;
    }

    // Date block
    layer.use_text(&layout.dates.0, 10.0, Mm(MARGIN), Mm(214.0), &fonts.regular);
    layer.use_text(&layout.dates.1, 10.0, Mm(110.0), Mm(214.0), &fonts.regular);
}

fn paint_table(layer: &PdfLayerReference, fonts: &Fonts, page: &Page, top: f32) {
    let left = MARGIN;
    let right = MARGIN + COL_WIDTHS.iter().sum::<f32>();
    let bottom = top - HEADER_ROW_H - page.rows.len() as f32 * ROW_H;

    // Header band
    layer.set_fill_color(Color::Rgb(Rgb::new(0.78, 0.86, 1.0, None)));
    layer.add_rect(
        Rect::new(Mm(left), Mm(top - HEADER_ROW_H), Mm(right), Mm(top))
            .with_mode(PaintMode::Fill),
    );
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

    let mut x = left;
    for (i, header) in TABLE_COLUMNS.iter().enumerate() {
        let center = x + COL_WIDTHS[i] / 2.0;
        layer.use_text(
            *header,
            10.0,
            Mm(center - text_width(header, 10.0) / 2.0),
            Mm(top - HEADER_ROW_H + 2.0),
            &fonts.bold,
        );
        x += COL_WIDTHS[i];
    }

    // Rows
    for (i, row) in page.rows.iter().enumerate() {
        let row_top = top - HEADER_ROW_H - i as f32 * ROW_H;
        if row.shaded {
            layer.set_fill_color(Color::Rgb(Rgb::new(0.93, 0.93, 0.93, None)));
            layer.add_rect(
                Rect::new(Mm(left), Mm(row_top - ROW_H), Mm(right), Mm(row_top))
                    .with_mode(PaintMode::Fill),
            );
            layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        }

        let baseline = row_top - ROW_H + 1.8;
        let mut x = left;
        // Description, left-aligned
        layer.use_text(&row.description, 10.0, Mm(x + 2.0), Mm(baseline), &fonts.regular);
        x += COL_WIDTHS[0];
        // Qté, centered
        layer.use_text(
            &row.quantity,
            10.0,
            Mm(x + COL_WIDTHS[1] / 2.0 - text_width(&row.quantity, 10.0) / 2.0),
            Mm(baseline),
            &fonts.regular,
        );
        x += COL_WIDTHS[1];
        // Prix unitaire, right-aligned
        layer.use_text(
            &row.unit_price,
            10.0,
            Mm(x + COL_WIDTHS[2] - 2.0 - text_width(&row.unit_price, 10.0)),
            Mm(baseline),
            &fonts.regular,
        );
        x += COL_WIDTHS[2];
        // TVA %, centered
        layer.use_text(
            &row.tva_rate,
            10.0,
            Mm(x + COL_WIDTHS[3] / 2.0 - text_width(&row.tva_rate, 10.0) / 2.0),
            Mm(baseline),
            &fonts.regular,
        );
        x += COL_WIDTHS[3];
        // Total HT, right-aligned
        layer.use_text(
            &row.total_ht,
            10.0,
            Mm(x + COL_WIDTHS[4] - 2.0 - text_width(&row.total_ht, 10.0)),
            Mm(baseline),
            &fonts.regular,
        );
    }

    // Frame: header rules, closing rule, column separators
    hline(layer, left, right, top);
    hline(layer, left, right, top - HEADER_ROW_H);
    hline(layer, left, right, bottom);
    let mut x = left;
    for width in COL_WIDTHS {
        vline(layer, x, bottom, top);
        x += width;
    }
    vline(layer, right, bottom, top);
}

fn paint_trailer(layer: &PdfLayerReference, fonts: &Fonts, layout: &InvoiceLayout, top: f32) {
    let value_right = MARGIN + COL_WIDTHS.iter().sum::<f32>();
    let label_right = value_right - 40.0;

    // Totals block, TTC emphasized
    let mut y = top;
    for (label, value) in [
        ("Total HT:", &layout.totals.total_ht),
        ("TVA:", &layout.totals.tva_amount),
    ] {
        layer.use_text(
            label,
            11.0,
            Mm(label_right - text_width(label, 11.0)),
            Mm(y),
            &fonts.bold,
        );
        layer.use_text(
            value,
            11.0,
            Mm(value_right - text_width(value, 11.0)),
            Mm(y),
            &fonts.bold,
        );
        y -= 7.0;
    }
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.4, 0.0, None)));
    layer.use_text(
        "Total TTC:",
        12.0,
        Mm(label_right - text_width("Total TTC:", 12.0)),
        Mm(y),
        &fonts.bold,
    );
    layer.use_text(
        &layout.totals.total_ttc,
        12.0,
        Mm(value_right - text_width(&layout.totals.total_ttc, 12.0)),
        Mm(y),
        &fonts.bold,
    );
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    y -= 12.0;

    // Payment information
    for (i, line) in layout.payment.iter().enumerate() {
        let font = if i == 0 { &fonts.bold } else { &fonts.regular };
        let size = if i == 0 { 10.0 } else { 9.0 };
        layer.use_text(line, size, Mm(MARGIN), Mm(y), font);
        y -= 5.0;
    }

    // Notes
    if let Some(notes) = &layout.notes {
        y -= 4.0;
        layer.use_text(notes, 9.0, Mm(MARGIN), Mm(y), &fonts.oblique);
    }
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * CHAR_W_PER_PT
}

fn hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn vline(layer: &PdfLayerReference, x: f32, y1: f32, y2: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x), Mm(y1)), false),
            (Point::new(Mm(x), Mm(y2)), false),
        ],
        is_closed: false,
    });
}
