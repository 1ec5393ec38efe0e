//! Diet plan PDF export
//!
//! The document is laid out first as a flat list of placed lines (page, position,
//! style), then rendered with printpdf. An optional last page carries a
//! macronutrient chart drawn with plotters.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::image_crate::{DynamicImage, ImageFormat, RgbImage};
use printpdf::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::diet::{Macros, PlanCalculation, DISCLAIMER};

// ============================================================================
// Page Geometry (millimetres, y measured from the top edge)
// ============================================================================

const PAGE_WIDTH: f32 = 210.0; // A4
const PAGE_HEIGHT: f32 = 297.0;
/// First baseline on every page
const CONTENT_TOP: f32 = 20.0;
/// A line whose baseline would fall below this starts a new page
const CONTENT_BOTTOM: f32 = 270.0;
const MARGIN_LEFT: f32 = 20.0;
const INDENT: f32 = 25.0;
const MARGIN_RIGHT: f32 = 15.0;

const LINE_STEP: f32 = 10.0;
const WRAP_STEP: f32 = 6.0;
const MEAL_GAP: f32 = 15.0;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size
const AVG_GLYPH_EM: f32 = 0.5;

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_TITLE: (u8, u8, u8) = (138, 79, 255); // Purple
const COLOR_SECTION: (u8, u8, u8) = (255, 90, 135); // Pink
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (96, 96, 96);
const COLOR_PROTEIN: (u8, u8, u8) = (138, 79, 255);
const COLOR_CARBS: (u8, u8, u8) = (255, 90, 135);
const COLOR_FAT: (u8, u8, u8) = (0, 176, 80);

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

fn chart_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Chart(e.to_string())
}

fn pdf_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Pdf(e.to_string())
}

// ============================================================================
// Layout
// ============================================================================

/// Visual style of a placed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Title,
    Subtitle,
    Section,
    Heading,
    Body,
    Fine,
}

impl LineStyle {
    pub fn font_size(&self) -> f32 {
        match self {
            LineStyle::Title => 20.0,
            LineStyle::Subtitle | LineStyle::Section => 14.0,
            LineStyle::Heading | LineStyle::Body => 12.0,
            LineStyle::Fine => 10.0,
        }
    }

    fn color(&self) -> (u8, u8, u8) {
        match self {
            LineStyle::Title => COLOR_TITLE,
            LineStyle::Section => COLOR_SECTION,
            LineStyle::Fine => COLOR_GRAY,
            _ => COLOR_BLACK,
        }
    }

    fn bold(&self) -> bool {
        matches!(self, LineStyle::Title | LineStyle::Section | LineStyle::Heading)
    }
}

/// A line of text at a fixed position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    /// Zero-based page index
    pub page: usize,
    pub x_mm: f32,
    /// Baseline, measured from the top of the page
    pub y_mm: f32,
    pub style: LineStyle,
    pub text: String,
}

/// Optional header details shown under the title
#[derive(Debug, Clone, Default)]
pub struct ReportHeader {
    pub prepared_for: Option<String>,
    pub generated_on: Option<String>,
}

/// Characters that fit on one line at a given style, starting at `x_mm`
fn wrap_budget(style: LineStyle, x_mm: f32) -> usize {
    let glyph_mm = style.font_size() * AVG_GLYPH_EM * PT_TO_MM;
    ((PAGE_WIDTH - MARGIN_RIGHT - x_mm) / glyph_mm).floor().max(1.0) as usize
}

/// Greedy word wrap. Words longer than the budget get a line of their own.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Vertical cursor that starts a new page on overflow
struct LayoutCursor {
    lines: Vec<PlacedLine>,
    page: usize,
    y: f32,
}

impl LayoutCursor {
    fn new() -> Self {
        Self { lines: Vec::new(), page: 0, y: CONTENT_TOP }
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    fn place(&mut self, x_mm: f32, style: LineStyle, text: String) {
        if self.y > CONTENT_BOTTOM {
            self.page += 1;
            self.y = CONTENT_TOP;
        }
        self.lines.push(PlacedLine { page: self.page, x_mm, y_mm: self.y, style, text });
    }

    /// Place wrapped text, then advance by `after` past the last line
    fn text(&mut self, x_mm: f32, style: LineStyle, text: &str, after: f32) {
        let wrapped = wrap_text(text, wrap_budget(style, x_mm));
        let count = wrapped.len();
        for (i, line) in wrapped.into_iter().enumerate() {
            self.place(x_mm, style, line);
            self.advance(if i + 1 == count { after } else { WRAP_STEP });
        }
    }
}

/// Lay out the diet plan document.
///
/// Order: title, BMI, focus, calories, macros, hydration, special considerations,
/// meal plan (one block per meal), disclaimer.
pub fn layout_diet_plan(calc: &PlanCalculation, header: &ReportHeader) -> Vec<PlacedLine> {
    let plan = &calc.plan;
    let mut cursor = LayoutCursor::new();

    cursor.text(MARGIN_LEFT, LineStyle::Title, "Personalized Women's Diet Plan", LINE_STEP);

    let header_line = match (&header.prepared_for, &header.generated_on) {
        (Some(name), Some(date)) => Some(format!("Prepared for: {} | Generated: {}", name, date)),
        (Some(name), None) => Some(format!("Prepared for: {}", name)),
        (None, Some(date)) => Some(format!("Generated: {}", date)),
        (None, None) => None,
    };
    if let Some(line) = header_line {
        cursor.text(MARGIN_LEFT, LineStyle::Fine, &line, LINE_STEP);
    }

    cursor.text(
        MARGIN_LEFT,
        LineStyle::Subtitle,
        &format!("BMI: {:.1} - {}", calc.bmi, calc.category.display_name()),
        LINE_STEP,
    );
    cursor.text(MARGIN_LEFT, LineStyle::Body, &format!("Diet Focus: {}", plan.focus.title()), LINE_STEP);
    cursor.text(
        MARGIN_LEFT,
        LineStyle::Body,
        &format!("Daily Calorie Target: {} calories", plan.calories),
        LINE_STEP,
    );

    cursor.text(MARGIN_LEFT, LineStyle::Body, "Daily Macronutrients:", LINE_STEP);
    cursor.text(INDENT, LineStyle::Body, &format!("- Protein: {}g", plan.macros.protein_g), LINE_STEP);
    cursor.text(INDENT, LineStyle::Body, &format!("- Carbohydrates: {}g", plan.macros.carbs_g), LINE_STEP);
    cursor.text(INDENT, LineStyle::Body, &format!("- Fat: {}g", plan.macros.fat_g), LINE_STEP);

    cursor.text(
        MARGIN_LEFT,
        LineStyle::Body,
        &format!("Daily Hydration: {} of water", plan.hydration),
        LINE_STEP,
    );

    if !plan.special_considerations.is_empty() {
        cursor.text(MARGIN_LEFT, LineStyle::Body, "Special Considerations:", LINE_STEP);
        for consideration in &plan.special_considerations {
            cursor.text(INDENT, LineStyle::Body, &format!("- {}", consideration), LINE_STEP);
        }
    }

    cursor.advance(LINE_STEP);
    cursor.text(MARGIN_LEFT, LineStyle::Section, "Meal Plan", LINE_STEP);

    for (_, meal) in plan.meals.iter() {
        cursor.text(MARGIN_LEFT, LineStyle::Heading, &meal.title, LINE_STEP);
        for item in &meal.items {
            cursor.text(INDENT, LineStyle::Body, &format!("- {}", item), LINE_STEP);
        }
        cursor.text(INDENT, LineStyle::Body, &format!("Note: {}", meal.notes), MEAL_GAP);
    }

    cursor.advance(LINE_STEP / 2.0);
    cursor.text(MARGIN_LEFT, LineStyle::Fine, &format!("Disclaimer: {}", DISCLAIMER), WRAP_STEP);

    cursor.lines
}

/// Number of pages a layout occupies
pub fn page_count(lines: &[PlacedLine]) -> usize {
    lines.iter().map(|l| l.page + 1).max().unwrap_or(1)
}

// ============================================================================
// Chart Generation (plotters)
// ============================================================================

/// Generate a bar chart of daily calories per macronutrient as PNG bytes
pub fn generate_macro_chart(macros: &Macros, width: u32, height: u32) -> ExportResult<Vec<u8>> {
    use plotters::prelude::*;

    let bars = [
        ("Protein", macros.protein_g * 4, COLOR_PROTEIN),
        ("Carbohydrates", macros.carbs_g * 4, COLOR_CARBS),
        ("Fat", macros.fat_g * 9, COLOR_FAT),
    ];

    let y_max = bars.iter().map(|(_, kcal, _)| *kcal).max().unwrap_or(0);
    if y_max == 0 {
        return Err(ExportError::Chart("No data to chart".to_string()));
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(
                (0u32..bars.len() as u32).into_segmented(),
                0u32..(y_max + y_max / 8),
            )
            .map_err(chart_err)?;

        chart.configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len())
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => bars
                    .get(*i as usize)
                    .map(|(name, _, _)| name.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc("kcal")
            .draw()
            .map_err(chart_err)?;

        for (i, (_, kcal, (r, g, b))) in bars.iter().enumerate() {
            chart.draw_series(
                Histogram::vertical(&chart)
                    .style(RGBColor(*r, *g, *b).filled())
                    .margin(30)
                    .data(std::iter::once((i as u32, *kcal))),
            ).map_err(chart_err)?;
        }

        root.present().map_err(chart_err)?;
    }

    // Convert RGB buffer to PNG
    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ExportError::Chart("Failed to create image from buffer".to_string()))?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(chart_err)?;

    Ok(png_bytes)
}

// ============================================================================
// PDF Generation Helper Functions
// ============================================================================

fn rgb_to_printpdf(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: Mm,
    y: Mm,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.use_text(text, size, x, y, font);
}

// ============================================================================
// Diet Plan Report
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ExportPdfResponse {
    pub success: bool,
    pub file_path: String,
    pub pages: usize,
    pub includes_chart: bool,
    pub message: String,
}

/// Render the diet plan to a PDF file
pub fn export_diet_plan_pdf(
    calc: &PlanCalculation,
    header: &ReportHeader,
    output_path: &Path,
    include_chart: bool,
) -> ExportResult<ExportPdfResponse> {
    let lines = layout_diet_plan(calc, header);
    let text_pages = page_count(&lines);
    debug!(lines = lines.len(), pages = text_pages, "laid out diet plan");

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Personalized Women's Diet Plan",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for n in 1..text_pages {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Page {}", n + 1));
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for line in &lines {
        let layer = &layers[line.page];
        let face = if line.style.bold() { &font_bold } else { &font };
        add_text(
            layer,
            face,
            &line.text,
            Mm(line.x_mm),
            Mm(PAGE_HEIGHT - line.y_mm),
            line.style.font_size(),
            line.style.color(),
        );
    }

    let mut pages = text_pages;
    if include_chart {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Chart Page");
        let layer = doc.get_page(page).get_layer(layer);
        pages += 1;

        let mut y = PAGE_HEIGHT - CONTENT_TOP;
        add_text(&layer, &font_bold, "Macronutrient Breakdown", Mm(MARGIN_LEFT), Mm(y), 16.0, COLOR_TITLE);
        y -= 8.0;
        add_text(
            &layer,
            &font,
            &format!("Split: {}% protein / {}% carbohydrates / {}% fat",
                calc.plan.macro_split.protein_pct, calc.plan.macro_split.carbs_pct, calc.plan.macro_split.fat_pct),
            Mm(MARGIN_LEFT),
            Mm(y),
            11.0,
            COLOR_BLACK,
        );
        y -= 6.0;

        let chart = generate_macro_chart(&calc.plan.macros, 800, 500).and_then(|png_bytes| {
            printpdf::image_crate::load_from_memory(&png_bytes).map_err(chart_err)
        });
        match chart {
            Ok(dynamic_image) => {
                let pdf_image = Image::from_dynamic_image(&dynamic_image);

                // 800x500 pixels at 120 DPI = ~169mm x 106mm
                let transform = ImageTransform {
                    translate_x: Some(Mm(MARGIN_LEFT)),
                    translate_y: Some(Mm(y - 110.0)),
                    dpi: Some(120.0),
                    ..Default::default()
                };

                pdf_image.add_to_layer(layer.clone(), transform);
            }
            Err(e) => {
                warn!("macro chart unavailable: {}", e);
                add_text(&layer, &font, &format!("Chart generation error: {}", e), Mm(MARGIN_LEFT), Mm(y - 10.0), 9.0, COLOR_SECTION);
            }
        }
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(pdf_err)?;

    info!(path = %output_path.display(), pages, "diet plan PDF written");

    Ok(ExportPdfResponse {
        success: true,
        file_path: output_path.display().to_string(),
        pages,
        includes_chart: include_chart,
        message: format!("Diet plan exported to {} ({} pages)", output_path.display(), pages),
    })
}
