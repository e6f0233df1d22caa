//! PDF export of a results view via `printpdf`.

use std::io::BufWriter;

use chrono::NaiveDate;
use printpdf::image_crate::{self, DynamicImage};
use printpdf::*;
use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError, food_analysis::entities::FoodImage,
    report::ResultsView,
};

pub const REPORT_FILE_NAME: &str = "food-analysis-report.pdf";
pub const REPORT_TITLE: &str = "Food Analysis Report";
pub const REPORT_FOOTER: &str = "Generated by Platewise - Health & Nutrition Analysis";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT: f32 = 20.0;
const TOP: f32 = 20.0;
const CONTENT_BOTTOM: f32 = 275.0;
const FOOTER_Y: f32 = 290.0;
const IMAGE_SIZE: f32 = 60.0;
const IMAGE_DPI: f32 = 300.0;
const RIGHT_MARGIN: f32 = 20.0;
const PT_TO_MM: f32 = 0.3528;

#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub image_embedded: bool,
}

fn pdf_error(context: &str, e: impl std::fmt::Display) -> CoreError {
    CoreError::ReportError(format!("{}: {}", context, e))
}

fn heading_color() -> Color {
    Color::Rgb(Rgb::new(54.0 / 255.0, 72.0 / 255.0, 228.0 / 255.0, None))
}

fn text_color() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn footer_color() -> Color {
    Color::Rgb(Rgb::new(150.0 / 255.0, 150.0 / 255.0, 150.0 / 255.0, None))
}

/// Writes top-down (y measured from the top edge) and breaks pages as needed.
struct PageCursor {
    doc: PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    layer: PdfLayerReference,
    y: f32,
    font: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PageCursor {
    fn new(title: &str) -> Result<Self, CoreError> {
        let (doc, page, layer_index) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer_index);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| pdf_error("PDF font error", e))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| pdf_error("PDF font error", e))?;

        Ok(Self {
            doc,
            pages: vec![(page, layer_index)],
            layer,
            y: TOP,
            font,
            bold,
        })
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y + height <= CONTENT_BOTTOM {
            return;
        }
        let (page, layer_index) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.pages.push((page, layer_index));
        self.layer = self.doc.get_page(page).get_layer(layer_index);
        self.y = TOP;
    }

    fn text_at(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.font };
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - self.y), font);
    }

    fn centered(&mut self, text: &str, size: f32, bold: bool, advance: f32) {
        self.ensure_space(advance);
        let width = text_width(text, size);
        let x = ((PAGE_WIDTH - width) / 2.0).max(LEFT);
        self.text_at(text, size, x, bold);
        self.y += advance;
    }

    fn heading(&mut self, text: &str) {
        self.ensure_space(10.0);
        self.layer.set_fill_color(heading_color());
        self.text_at(text, 16.0, LEFT, true);
        self.layer.set_fill_color(text_color());
        self.y += 10.0;
    }

    fn paragraph(&mut self, text: &str, x: f32) {
        for line in wrap_to_width(text, 12.0, PAGE_WIDTH - RIGHT_MARGIN - x) {
            self.ensure_space(7.0);
            self.text_at(&line, 12.0, x, false);
            self.y += 7.0;
        }
    }

    fn labelled(&mut self, label: &str, text: &str) {
        self.ensure_space(12.0);
        self.text_at(label, 12.0, LEFT, true);
        self.y += 5.0;
        self.paragraph(text, LEFT + 5.0);
    }

    /// Up to three `label: value` pairs on one line.
    fn columns(&mut self, cells: &[(&str, &str)]) {
        self.ensure_space(7.0);
        for (i, (label, value)) in cells.iter().enumerate() {
            let x = LEFT + 60.0 * i as f32;
            self.text_at(&format!("{}: {}", label, value), 12.0, x, false);
        }
        self.y += 7.0;
    }

    fn image(&mut self, image: DynamicImage) {
        self.ensure_space(IMAGE_SIZE + 10.0);

        let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
        let natural_width = rgb.width() as f32 / IMAGE_DPI * 25.4;
        let natural_height = rgb.height() as f32 / IMAGE_DPI * 25.4;

        Image::from_dynamic_image(&rgb).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(LEFT)),
                translate_y: Some(Mm(PAGE_HEIGHT - self.y - IMAGE_SIZE)),
                scale_x: Some(IMAGE_SIZE / natural_width),
                scale_y: Some(IMAGE_SIZE / natural_height),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
        self.y += IMAGE_SIZE + 10.0;
    }

    fn finish(self) -> Result<(Vec<u8>, usize), CoreError> {
        let page_count = self.pages.len();
        for (page, layer_index) in &self.pages {
            let layer = self.doc.get_page(*page).get_layer(*layer_index);
            layer.set_fill_color(footer_color());
            let width = text_width(REPORT_FOOTER, 10.0);
            layer.use_text(
                REPORT_FOOTER,
                10.0,
                Mm((PAGE_WIDTH - width) / 2.0),
                Mm(PAGE_HEIGHT - FOOTER_Y),
                &self.font,
            );
        }

        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| pdf_error("PDF save error", e))?;
        let bytes = buf
            .into_inner()
            .map_err(|e| pdf_error("PDF buffer error", e))?;
        Ok((bytes, page_count))
    }
}

fn decode_image(data_url: &str) -> Option<DynamicImage> {
    let bytes = FoodImage::from_data_url(data_url)
        .and_then(|image| image.decode())
        .map_err(|e| warn!("Stored image is not a usable data URL: {}", e))
        .ok()?;

    image_crate::load_from_memory(&bytes)
        .map_err(|e| warn!("Failed to decode stored image for report: {}", e))
        .ok()
}

/// Renders the report. An image that cannot be decoded is left out.
pub fn render_report_pdf(
    view: &ResultsView,
    image_data_url: Option<&str>,
    date: NaiveDate,
) -> Result<RenderedReport, CoreError> {
    let mut cursor = PageCursor::new(&format!("{} - Platewise", REPORT_TITLE))?;

    cursor.layer.set_fill_color(heading_color());
    cursor.centered(REPORT_TITLE, 22.0, true, 10.0);
    cursor.layer.set_fill_color(text_color());
    cursor.centered("Generated by Platewise", 14.0, false, 10.0);
    cursor.centered(&format!("Date: {}", date.format("%Y-%m-%d")), 12.0, false, 10.0);

    let image = image_data_url.and_then(decode_image);
    let image_embedded = image.is_some();
    if let Some(image) = image {
        cursor.image(image);
    }

    if let Some(profile) = &view.health_profile {
        cursor.heading("Your Health Profile");
        if profile.diseases != crate::domain::report::NOT_PROVIDED {
            cursor.labelled("Health Conditions:", &profile.diseases);
        }
        if profile.allergies != crate::domain::report::NOT_PROVIDED {
            cursor.labelled("Food Allergies:", &profile.allergies);
        }
        cursor.y += 10.0;
    }

    if let Some(compatibility) = &view.health_compatibility {
        cursor.heading("Health Compatibility");
        cursor.paragraph(&compatibility.text, LEFT);
        cursor.y += 10.0;
    }

    cursor.heading("Nutritional Information");
    cursor.columns(&[
        ("Calories", &view.calories_value),
        ("Protein", &view.protein_value),
        ("Carbs", &view.carbs_value),
    ]);
    cursor.columns(&[("Fat", &view.fat_value)]);
    cursor.y += 3.0;
    cursor.columns(&[
        ("Fiber", &view.fiber_value),
        ("Sugar", &view.sugar_value),
        ("Sodium", &view.sodium_value),
    ]);

    let (bytes, pages) = cursor.finish()?;
    Ok(RenderedReport {
        bytes,
        pages,
        image_embedded,
    })
}

/// Helvetica advance width in thousandths of an em.
fn glyph_width(c: char) -> u32 {
    match c {
        'i' | 'j' | 'l' => 222,
        ' ' | '.' | ',' | ':' | ';' | '!' | '/' | 'f' | 't' | 'I' => 278,
        'r' | '-' | '(' | ')' => 333,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 500,
        'F' | 'T' | 'Z' => 611,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' | '&' => 667,
        'w' | 'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'G' | 'O' | 'Q' => 778,
        'm' | 'M' => 833,
        '%' => 889,
        'W' => 944,
        '\'' => 191,
        _ => 556,
    }
}

/// Rendered width in millimetres of `text` at `size` points.
fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(glyph_width).sum();
    units as f32 / 1000.0 * size * PT_TO_MM
}

/// Greedy word wrap against the measured width. A single word wider than
/// the line gets a line of its own.
fn wrap_to_width(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", line, word);
        if text_width(&candidate, size) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food_analysis::entities::AnalysisResult;

    const ONE_PIXEL_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn view(compatibility: &str) -> ResultsView {
        ResultsView::from_record(&AnalysisResult {
            food_item: Some("Apple".to_string()),
            calories: Some("95 kcal".to_string()),
            protein: Some("0.5g".to_string()),
            health_compatibility: Some(compatibility.to_string()),
            diseases: Some("diabetes".to_string()),
            allergies: Some(String::new()),
            ..Default::default()
        })
    }

    #[test]
    fn test_renders_single_page_pdf() {
        let report = render_report_pdf(&view("Compatible."), None, date()).unwrap();
        assert!(report.bytes.starts_with(b"%PDF"));
        assert_eq!(report.pages, 1);
        assert!(!report.image_embedded);
    }

    #[test]
    fn test_long_text_breaks_onto_new_pages() {
        let long = "Caution: this sentence repeats to fill the page. ".repeat(400);
        let report = render_report_pdf(&view(&long), None, date()).unwrap();
        assert!(report.pages > 1);
    }

    #[test]
    fn test_embeds_decodable_image() {
        let report = render_report_pdf(&view("ok"), Some(ONE_PIXEL_PNG), date()).unwrap();
        assert!(report.image_embedded);
    }

    #[test]
    fn test_undecodable_image_is_skipped() {
        let report =
            render_report_pdf(&view("ok"), Some("data:image/png;base64,AAAA"), date()).unwrap();
        assert!(!report.image_embedded);
        assert!(report.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_measures_glyph_widths() {
        let narrow = "ill ".repeat(60);
        let wide = "WOM ".repeat(60);
        let max_width = PAGE_WIDTH - RIGHT_MARGIN - LEFT;

        let narrow_lines = wrap_to_width(&narrow, 12.0, max_width);
        let wide_lines = wrap_to_width(&wide, 12.0, max_width);

        assert!(narrow_lines.len() < wide_lines.len());
        for line in narrow_lines.iter().chain(&wide_lines) {
            assert!(text_width(line, 12.0) <= max_width, "{:?} overflows", line);
        }
    }

    #[test]
    fn test_wrap_edge_cases() {
        assert_eq!(wrap_to_width("", 12.0, 100.0), vec![String::new()]);
        assert_eq!(wrap_to_width("a b", 12.0, 100.0), vec!["a b"]);
        assert_eq!(
            wrap_to_width("Supercalifragilistic x", 12.0, 5.0),
            vec!["Supercalifragilistic", "x"]
        );
    }
}
