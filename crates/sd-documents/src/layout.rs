//! Cursor-driven page layout
//!
//! A [`PageComposer`] tracks a vertical cursor from the top margin down.
//! Before a block is drawn, `ensure_space` checks the remaining height
//! and starts a fresh page (border redrawn, cursor reset) if the block
//! would overflow. Table rendering splits rows across pages itself and
//! leaves the cursor below the last row drawn.

use image::DynamicImage;
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
    Rgb, TextMatrix,
};
use std::io::BufWriter;

use crate::error::DocumentError;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 15.0;
/// Border drawn a little inside the margin on every page
const BORDER_INSET_MM: f32 = 8.0;
const ROW_HEIGHT_MM: f32 = 7.0;
const TABLE_HEADER_HEIGHT_MM: f32 = 8.0;

/// Rough advance width of builtin Helvetica, enough for right alignment
fn text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5 * 0.3528
}

pub struct PageComposer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    y: f32,
}

impl PageComposer {
    pub fn new(title: &str) -> Result<Self, DocumentError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DocumentError::Pdf(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DocumentError::Pdf(e.to_string()))?;

        let composer = Self {
            doc,
            layer,
            font,
            font_bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        };
        composer.draw_border();

        Ok(composer)
    }

    pub fn cursor(&self) -> f32 {
        self.y
    }

    pub fn content_width(&self) -> f32 {
        PAGE_WIDTH_MM - 2.0 * MARGIN_MM
    }

    /// Start a new page if `height` millimeters would overflow this one.
    pub fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN_MM {
            self.new_page();
        }
    }

    pub fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        self.draw_border();
    }

    fn draw_border(&self) {
        let inset = BORDER_INSET_MM;
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.2, 0.2, 0.2, None)));
        self.layer.set_outline_thickness(0.8);

        let points = vec![
            (Point::new(Mm(inset), Mm(inset)), false),
            (Point::new(Mm(PAGE_WIDTH_MM - inset), Mm(inset)), false),
            (
                Point::new(Mm(PAGE_WIDTH_MM - inset), Mm(PAGE_HEIGHT_MM - inset)),
                false,
            ),
            (Point::new(Mm(inset), Mm(PAGE_HEIGHT_MM - inset)), false),
        ];
        self.layer.add_line(Line {
            points,
            is_closed: true,
        });
    }

    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    pub fn text(&self, content: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(content, size, Mm(x), Mm(y), &self.font);
    }

    pub fn text_bold(&self, content: &str, size: f32, x: f32, y: f32) {
        self.layer
            .use_text(content, size, Mm(x), Mm(y), &self.font_bold);
    }

    /// Right-aligned against `right_edge`
    pub fn text_right(&self, content: &str, size: f32, right_edge: f32, y: f32, bold: bool) {
        let x = right_edge - text_width_mm(content, size);
        let font = if bold { &self.font_bold } else { &self.font };
        self.layer.use_text(content, size, Mm(x), Mm(y), font);
    }

    pub fn hline(&self, x1: f32, x2: f32, y: f32) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    /// A centered heading line at the cursor.
    pub fn heading(&mut self, content: &str, size: f32) {
        self.ensure_space(size * 0.6);
        let x = (PAGE_WIDTH_MM - text_width_mm(content, size)) / 2.0;
        self.text_bold(content, size, x, self.y);
        self.advance(size * 0.6);
    }

    /// A labelled line of body text at the cursor.
    pub fn field_line(&mut self, label: &str, value: &str) {
        self.ensure_space(6.0);
        self.text_bold(label, 10.0, MARGIN_MM, self.y);
        self.text(value, 10.0, MARGIN_MM + 40.0, self.y);
        self.advance(6.0);
    }

    /// Draw a table with proportional column widths. Text columns are
    /// left-aligned, `right_align` columns against their right edge.
    /// Rows split across pages; the header is repeated on each page and
    /// the cursor ends below the final row.
    pub fn table(&mut self, headers: &[&str], fractions: &[f32], right_align: &[bool], rows: &[Vec<String>]) {
        let width = self.content_width();
        let mut x_positions = Vec::with_capacity(fractions.len());
        let mut x = MARGIN_MM;
        for fraction in fractions {
            x_positions.push(x);
            x += width * fraction;
        }

        self.ensure_space(TABLE_HEADER_HEIGHT_MM + ROW_HEIGHT_MM);
        self.draw_table_header(headers, &x_positions, fractions, right_align);

        for row in rows {
            if self.y - ROW_HEIGHT_MM < MARGIN_MM {
                self.new_page();
                self.draw_table_header(headers, &x_positions, fractions, right_align);
            }
            for (i, cell) in row.iter().enumerate() {
                if right_align.get(i).copied().unwrap_or(false) {
                    let right_edge = x_positions[i] + self.content_width() * fractions[i] - 2.0;
                    self.text_right(cell, 9.0, right_edge, self.y - 5.0, false);
                } else {
                    self.text(cell, 9.0, x_positions[i] + 2.0, self.y - 5.0);
                }
            }
            self.hline(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, self.y - ROW_HEIGHT_MM);
            self.advance(ROW_HEIGHT_MM);
        }
    }

    fn draw_table_header(&mut self, headers: &[&str], x_positions: &[f32], fractions: &[f32], right_align: &[bool]) {
        self.hline(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, self.y);
        for (i, header) in headers.iter().enumerate() {
            if right_align.get(i).copied().unwrap_or(false) {
                let right_edge = x_positions[i] + self.content_width() * fractions[i] - 2.0;
                self.text_right(header, 9.5, right_edge, self.y - 5.5, true);
            } else {
                self.text_bold(header, 9.5, x_positions[i] + 2.0, self.y - 5.5);
            }
        }
        self.hline(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, self.y - TABLE_HEADER_HEIGHT_MM);
        self.advance(TABLE_HEADER_HEIGHT_MM);
    }

    /// Fixed-position rotated stamp. Light grey stands in for alpha;
    /// printpdf's builtin-font path has no transparency state.
    pub fn watermark(&self, content: &str) {
        self.layer.begin_text_section();
        self.layer.set_font(&self.font_bold, 64.0);
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.85, 0.85, 0.85, None)));
        self.layer.set_text_matrix(TextMatrix::TranslateRotate(
            Mm(55.0).into(),
            Mm(130.0).into(),
            35.0,
        ));
        self.layer.write_text(content, &self.font_bold);
        self.layer.end_text_section();
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }

    /// Embed an image with its top-left corner at (x, y), scaled to
    /// `width_mm` preserving aspect ratio.
    pub fn embed_image(&self, image: &DynamicImage, x: f32, y: f32, width_mm: f32) {
        let rgb = image.to_rgb8();
        let (px_w, px_h) = rgb.dimensions();
        let raw_pixels = rgb.into_raw();

        let xobject = Image::from(ImageXObject {
            width: Px(px_w as usize),
            height: Px(px_h as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: raw_pixels,
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI chosen so the pixel width maps onto width_mm
        let dpi = px_w as f32 / (width_mm / 25.4);
        let height_mm = width_mm * px_h as f32 / px_w as f32;

        xobject.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(y - height_mm)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    /// Serialize the finished document.
    pub fn finish(self) -> Result<Vec<u8>, DocumentError> {
        let mut buffer = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buffer)
            .map_err(|e| DocumentError::Pdf(e.to_string()))?;

        buffer
            .into_inner()
            .map_err(|e| DocumentError::Pdf(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_at_top_margin() {
        let composer = PageComposer::new("Test").unwrap();
        assert_eq!(composer.cursor(), PAGE_HEIGHT_MM - MARGIN_MM);
    }

    #[test]
    fn test_ensure_space_breaks_page() {
        let mut composer = PageComposer::new("Test").unwrap();
        composer.advance(PAGE_HEIGHT_MM - MARGIN_MM - 20.0);
        assert!(composer.cursor() < 25.0);

        composer.ensure_space(40.0);
        assert_eq!(composer.cursor(), PAGE_HEIGHT_MM - MARGIN_MM);
    }

    #[test]
    fn test_table_splits_across_pages() {
        let mut composer = PageComposer::new("Test").unwrap();
        let rows: Vec<Vec<String>> = (0..60)
            .map(|i| vec![format!("Item {}", i), "1".to_string(), "100".to_string()])
            .collect();
        composer.table(
            &["Name", "Qty", "Total"],
            &[0.6, 0.2, 0.2],
            &[false, true, true],
            &rows,
        );
        // 60 rows cannot fit one A4 page; the cursor must have reset at
        // least once and still sit inside the margins.
        assert!(composer.cursor() >= MARGIN_MM);
        assert!(composer.cursor() <= PAGE_HEIGHT_MM - MARGIN_MM);
    }

    #[test]
    fn test_finish_produces_pdf_bytes() {
        let composer = PageComposer::new("Test").unwrap();
        let bytes = composer.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
