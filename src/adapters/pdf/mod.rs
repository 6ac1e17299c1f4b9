//! PDF adapter: Implementation of `ReportRenderer`.
//!
//! Lays out the heart health report on A4 pages using the standard Helvetica
//! fonts, so no font files are embedded. Text is restricted to printable
//! ASCII: anything else is replaced by a placeholder instead of failing.

mod writer;

pub use writer::{text_width, to_printable_ascii, Font, PageCanvas, PdfWriter, PT_PER_MM};

use crate::domain::ReportRecord;
use crate::ports::{ReportError, ReportRenderer, DEFAULT_REPORT_FILE_NAME};

const DISCLAIMER: &str = "This report is for informational purposes only and should not replace professional medical advice. Please consult with a healthcare professional for proper diagnosis and treatment.";

const BLACK: (u8, u8, u8) = (0, 0, 0);

/// Page geometry and rendering limits (lengths in millimetres).
#[derive(Debug, Clone)]
pub struct PdfLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
    /// Distance from the bottom edge that triggers a page break
    pub bottom_margin_mm: f64,
    /// Rendering fails with `ReportError::Layout` beyond this many pages
    pub max_pages: usize,
    /// Substitute for unsupported characters in general text
    pub placeholder: char,
    /// Substitute for unsupported characters in recommendation items
    pub item_placeholder: char,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            bottom_margin_mm: 20.0,
            max_pages: 20,
            placeholder: '?',
            item_placeholder: '-',
        }
    }
}

impl PdfLayout {
    fn content_width(&self) -> f64 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    fn validate(&self) -> Result<(), ReportError> {
        if self.max_pages == 0 {
            return Err(ReportError::Layout("max_pages must be at least 1".into()));
        }
        if self.content_width() <= 20.0 || self.page_height_mm <= self.bottom_margin_mm + 20.0 {
            return Err(ReportError::Layout(format!(
                "page {}x{} mm is too small for the given margins",
                self.page_width_mm, self.page_height_mm
            )));
        }
        for c in [self.placeholder, self.item_placeholder] {
            if !matches!(c, ' '..='~') {
                return Err(ReportError::Encoding(format!(
                    "placeholder {c:?} is not printable ASCII"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

/// Cursor-based page composer (top-left origin, millimetres).
struct Composer<'a> {
    layout: &'a PdfLayout,
    writer: PdfWriter,
    page: PageCanvas,
    x: f64,
    y: f64,
    font: Font,
    size: f64,
    color: (u8, u8, u8),
}

impl<'a> Composer<'a> {
    fn new(layout: &'a PdfLayout) -> Self {
        Self {
            layout,
            writer: PdfWriter::new(
                layout.page_width_mm * PT_PER_MM,
                layout.page_height_mm * PT_PER_MM,
            ),
            page: PageCanvas::default(),
            x: layout.margin_mm,
            y: layout.margin_mm,
            font: Font::Regular,
            size: 12.0,
            color: BLACK,
        }
    }

    fn set_font(&mut self, font: Font, size: f64) {
        self.font = font;
        self.size = size;
    }

    fn set_color(&mut self, color: (u8, u8, u8)) {
        self.color = color;
        self.page.set_fill_rgb(color);
    }

    fn new_page(&mut self) -> Result<(), ReportError> {
        let finished = std::mem::take(&mut self.page);
        self.writer.push_page(finished);
        if self.writer.page_count() >= self.layout.max_pages {
            return Err(ReportError::Layout(format!(
                "report exceeds {} page(s)",
                self.layout.max_pages
            )));
        }
        self.x = self.layout.margin_mm;
        self.y = self.layout.margin_mm;
        // Colour state does not carry over to a new content stream.
        if self.color != BLACK {
            self.page.set_fill_rgb(self.color);
        }
        Ok(())
    }

    fn ensure_room(&mut self, h: f64) -> Result<(), ReportError> {
        if self.y + h > self.layout.page_height_mm - self.layout.bottom_margin_mm {
            self.new_page()?;
        }
        Ok(())
    }

    /// Draw one line of text in a `w` x `h` cell, then advance the cursor
    /// right or, when `newline` is set, to the start of the next line.
    fn cell(
        &mut self,
        w: f64,
        h: f64,
        text: &str,
        align: Align,
        newline: bool,
    ) -> Result<(), ReportError> {
        self.ensure_room(h)?;

        if !text.is_empty() {
            let text_w = text_width(text, self.font, self.size) / PT_PER_MM;
            let pad = 1.0;
            let offset = match align {
                Align::Left => pad,
                Align::Center => (w - text_w) / 2.0,
                Align::Right => w - text_w - pad,
            };
            let size_mm = self.size / PT_PER_MM;
            let baseline = self.y + h / 2.0 + 0.3 * size_mm;
            self.page.text(
                (self.x + offset) * PT_PER_MM,
                (self.layout.page_height_mm - baseline) * PT_PER_MM,
                self.font,
                self.size,
                text,
            );
        }

        if newline {
            self.ln(h);
        } else {
            self.x += w;
        }
        Ok(())
    }

    /// Wrapped paragraph starting at the current `x`.
    fn multi_cell(&mut self, w: f64, h: f64, text: &str) -> Result<(), ReportError> {
        let start_x = self.x;
        for line in wrap(text, w - 2.0, self.font, self.size) {
            self.x = start_x;
            self.cell(w, h, &line, Align::Left, false)?;
            self.y += h;
        }
        self.x = self.layout.margin_mm;
        Ok(())
    }

    fn ln(&mut self, h: f64) {
        self.x = self.layout.margin_mm;
        self.y += h;
    }

    fn finish(mut self) -> Result<Vec<u8>, ReportError> {
        let last = std::mem::take(&mut self.page);
        self.writer.push_page(last);
        self.writer.finish()
    }
}

/// Greedy word wrap to `max_w_mm`; words wider than a line are split.
fn wrap(text: &str, max_w_mm: f64, font: Font, size: f64) -> Vec<String> {
    let fits = |s: &str| text_width(s, font, size) / PT_PER_MM <= max_w_mm;

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Renders `ReportRecord`s as PDF documents.
#[derive(Debug, Clone, Default)]
pub struct PdfReportRenderer {
    layout: PdfLayout,
}

impl PdfReportRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_layout(layout: PdfLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PdfLayout {
        &self.layout
    }

    fn compose(&self, record: &ReportRecord) -> Result<Vec<u8>, ReportError> {
        let layout = &self.layout;
        let safe = |s: &str| to_printable_ascii(s, layout.placeholder);
        let full = layout.content_width();
        let label_w = 50.0;
        let value_w = full - label_w;

        let mut doc = Composer::new(layout);

        doc.set_font(Font::Bold, 16.0);
        doc.cell(full, 10.0, "Heart Health Report", Align::Center, true)?;
        doc.cell(
            full,
            10.0,
            &format!("Date: {}", record.generated_on.format("%Y-%m-%d")),
            Align::Center,
            true,
        )?;
        doc.ln(10.0);

        let block = |doc: &mut Composer<'_>, title: &str, rows: &[(&str, String)]| {
            doc.set_font(Font::Bold, 12.0);
            doc.cell(full, 10.0, title, Align::Left, true)?;
            doc.set_font(Font::Regular, 12.0);
            for (label, value) in rows {
                doc.cell(label_w, 10.0, label, Align::Left, false)?;
                doc.cell(value_w, 10.0, value, Align::Left, true)?;
            }
            doc.ln(5.0);
            Ok::<(), ReportError>(())
        };

        block(
            &mut doc,
            "Patient Information",
            &[
                ("Name:", safe(&record.name)),
                ("Age:", record.age.to_string()),
                ("Sex:", safe(&record.sex)),
            ],
        )?;
        block(
            &mut doc,
            "Health Metrics",
            &[
                ("Blood Pressure:", format!("{} mm Hg", record.systolic_bp)),
                ("Cholesterol:", format!("{} mg/dl", record.cholesterol)),
                ("Chest Pain Type:", safe(&record.chest_pain)),
            ],
        )?;

        doc.set_font(Font::Bold, 12.0);
        doc.cell(full, 10.0, "Heart Health Assessment", Align::Left, true)?;
        doc.set_font(Font::Regular, 12.0);
        doc.set_color(record.verdict.color());
        doc.cell(
            full,
            10.0,
            &format!("Result: {}", record.verdict.message()),
            Align::Left,
            true,
        )?;
        doc.set_color(BLACK);
        doc.ln(5.0);

        doc.set_font(Font::Bold, 12.0);
        doc.cell(full, 10.0, "Personalized Diet Recommendations", Align::Left, true)?;
        doc.ln(2.0);

        for section in record.recommendations.sections() {
            doc.set_font(Font::Bold, 11.0);
            doc.cell(full, 10.0, section.category.title(), Align::Left, true)?;
            doc.set_font(Font::Regular, 10.0);
            for item in &section.items {
                doc.cell(10.0, 7.0, "-", Align::Right, false)?;
                let item = to_printable_ascii(item, layout.item_placeholder);
                doc.multi_cell(full - 10.0, 7.0, &item)?;
            }
            doc.ln(3.0);
        }

        doc.ln(10.0);
        doc.set_font(Font::Italic, 8.0);
        doc.multi_cell(full, 5.0, DISCLAIMER)?;

        doc.finish()
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, record: &ReportRecord) -> Result<Vec<u8>, ReportError> {
        self.layout.validate()?;
        let bytes = self.compose(record)?;
        tracing::debug!("Rendered PDF report: {} bytes", bytes.len());
        Ok(bytes)
    }

    fn file_name(&self) -> &str {
        DEFAULT_REPORT_FILE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        derive_recommendations, ChestPainType, HealthProfile, RecommendationSet, RiskVerdict, Sex,
    };
    use chrono::NaiveDate;

    fn record(verdict: RiskVerdict, name: &str) -> ReportRecord {
        let profile =
            HealthProfile::new(60, Sex::Male, 150, 260, ChestPainType::TypicalAngina).expect("valid");
        let recs = derive_recommendations(verdict, &profile);
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).expect("date");
        ReportRecord::dated(name, &profile, verdict, recs, date)
    }

    fn render_text(renderer: &PdfReportRenderer, record: &ReportRecord) -> String {
        let bytes = renderer.render(record).expect("render");
        assert!(bytes.starts_with(b"%PDF-1.4"));
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_render_contains_all_blocks() {
        let renderer = PdfReportRenderer::new();
        let text = render_text(&renderer, &record(RiskVerdict::AtRisk, "Jane Doe"));

        assert!(text.trim_end().ends_with("%%EOF"));
        for expected in [
            "(Heart Health Report)",
            "(Date: 2024-05-17)",
            "(Patient Information)",
            "(Jane Doe)",
            "(150 mm Hg)",
            "(260 mg/dl)",
            "(Severe Pain \\(Typical Angina\\))",
            "(Result: You may be at risk for heart disease)",
            "(Blood Pressure Control)",
            "(Follow the DASH diet approach)",
            "(This report is for informational",
        ] {
            assert!(text.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_verdict_colour_differs() {
        let renderer = PdfReportRenderer::new();
        let at_risk = render_text(&renderer, &record(RiskVerdict::AtRisk, "A"));
        let not_at_risk = render_text(&renderer, &record(RiskVerdict::NotAtRisk, "A"));
        assert!(at_risk.contains("1.000 0.000 0.000 rg"));
        assert!(not_at_risk.contains("0.000 0.502 0.000 rg"));
        assert!(not_at_risk.contains("(Result: You are likely not at risk for heart disease)"));
    }

    #[test]
    fn test_non_ascii_substituted() {
        let renderer = PdfReportRenderer::new();
        let mut rec = record(RiskVerdict::NotAtRisk, "Zoë Łukasz");
        let mut recs = RecommendationSet::new();
        recs.append(crate::domain::Category::RecommendedFoods, ["Açaí bowls"]);
        rec.recommendations = recs;

        let text = render_text(&renderer, &rec);
        assert!(text.contains("(Zo? ?ukasz)"));
        assert!(text.contains("(A-a- bowls)"));
    }

    #[test]
    fn test_long_report_spans_pages() {
        let renderer = PdfReportRenderer::new();
        let text = render_text(&renderer, &record(RiskVerdict::AtRisk, "A"));
        assert!(text.contains("/Count 2"));
    }

    #[test]
    fn test_page_limit_is_layout_error() {
        let renderer = PdfReportRenderer::with_layout(PdfLayout {
            max_pages: 1,
            ..PdfLayout::default()
        });
        let err = renderer
            .render(&record(RiskVerdict::AtRisk, "A"))
            .expect_err("must overflow");
        assert!(matches!(err, ReportError::Layout(_)));
    }

    #[test]
    fn test_invalid_placeholder_rejected() {
        let renderer = PdfReportRenderer::with_layout(PdfLayout {
            placeholder: '€',
            ..PdfLayout::default()
        });
        let err = renderer
            .render(&record(RiskVerdict::AtRisk, "A"))
            .expect_err("bad placeholder");
        assert!(matches!(err, ReportError::Encoding(_)));
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Dark chocolate (70% or higher cocoa content, in moderation)";
        let lines = wrap(text, 40.0, Font::Regular, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Regular, 10.0) / PT_PER_MM <= 40.0);
        }
        assert_eq!(lines.join(" "), text);
        assert_eq!(wrap("", 40.0, Font::Regular, 10.0), vec![String::new()]);
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(PdfReportRenderer::new().file_name(), "heart_health_report.pdf");
        assert_eq!(PdfReportRenderer::new().media_type(), "application/pdf");
    }
}
