//! Minimal PDF 1.4 writer: text-only pages using the standard Helvetica fonts.

use std::io::Write;

use crate::ports::ReportError;

/// Points per millimetre.
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Standard Type 1 fonts available to every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Italic,
}

impl Font {
    const ALL: [Self; 3] = [Self::Regular, Self::Bold, Self::Italic];

    fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Italic => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Italic => "Helvetica-Oblique",
        }
    }
}

/// Approximate rendered width of `text` in points.
///
/// Bold glyphs are estimated from the regular metrics scaled up slightly.
#[must_use]
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| match c {
            ' '..='~' => u32::from(HELVETICA_WIDTHS[c as usize - 32]),
            _ => 556,
        })
        .sum();
    let scale = if font == Font::Bold { 1.06 } else { 1.0 };
    f64::from(units) * size / 1000.0 * scale
}

/// Replace every character outside printable ASCII with `placeholder`.
#[must_use]
pub fn to_printable_ascii(text: &str, placeholder: char) -> String {
    text.chars()
        .map(|c| if matches!(c, ' '..='~') { c } else { placeholder })
        .collect()
}

fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Content stream for a single page.
#[derive(Debug, Default)]
pub struct PageCanvas {
    ops: String,
}

impl PageCanvas {
    /// Set the fill colour used for subsequent text.
    pub fn set_fill_rgb(&mut self, (r, g, b): (u8, u8, u8)) {
        self.ops.push_str(&format!(
            "{:.3} {:.3} {:.3} rg\n",
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0
        ));
    }

    /// Draw `text` with its baseline starting at (`x`, `y`) in points from the
    /// bottom-left corner. Text must already be printable ASCII.
    pub fn text(&mut self, x: f64, y: f64, font: Font, size: f64, text: &str) {
        self.ops.push_str(&format!(
            "BT /{} {:.2} Tf {:.2} {:.2} Td ({}) Tj ET\n",
            font.resource(),
            size,
            x,
            y,
            escape_literal(text)
        ));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Assembles pages into a complete PDF file.
#[derive(Debug)]
pub struct PdfWriter {
    width: f64,
    height: f64,
    pages: Vec<PageCanvas>,
}

impl PdfWriter {
    /// Create a writer for pages of `width` x `height` points.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
        }
    }

    pub fn push_page(&mut self, page: PageCanvas) {
        self.pages.push(page);
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize all pages.
    ///
    /// Object layout: 1 catalog, 2 page tree, 3..=5 fonts, then a page object
    /// and its content stream per page.
    ///
    /// # Errors
    /// Returns `ReportError::Layout` when there are no pages.
    pub fn finish(self) -> Result<Vec<u8>, ReportError> {
        if self.pages.is_empty() {
            return Err(ReportError::Layout("document has no pages".to_string()));
        }

        let font_base = 3;
        let page_base = font_base + Font::ALL.len();
        let page_ids: Vec<usize> = (0..self.pages.len()).map(|i| page_base + 2 * i).collect();

        let mut out: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();

        out.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

        offsets.push(out.len());
        write!(out, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

        offsets.push(out.len());
        let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();
        write!(
            out,
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            page_ids.len()
        )?;

        for (i, font) in Font::ALL.iter().enumerate() {
            offsets.push(out.len());
            write!(
                out,
                "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj\n",
                font_base + i,
                font.base_font()
            )?;
        }

        let font_resources: Vec<String> = Font::ALL
            .iter()
            .enumerate()
            .map(|(i, f)| format!("/{} {} 0 R", f.resource(), font_base + i))
            .collect();

        for (page, &id) in self.pages.iter().zip(&page_ids) {
            offsets.push(out.len());
            write!(
                out,
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << {} >> >> /Contents {} 0 R >>\nendobj\n",
                id,
                self.width,
                self.height,
                font_resources.join(" "),
                id + 1
            )?;

            offsets.push(out.len());
            write!(
                out,
                "{} 0 obj\n<< /Length {} >>\nstream\n{}endstream\nendobj\n",
                id + 1,
                page.ops.len(),
                page.ops
            )?;
        }

        let xref_offset = out.len();
        write!(out, "xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1)?;
        for offset in &offsets {
            write!(out, "{offset:010} 00000 n \n")?;
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref_offset
        )?;

        Ok(out)
    }
}
