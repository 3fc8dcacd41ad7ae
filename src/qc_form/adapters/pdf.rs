//! `printpdf` renderer for QC reports.
//!
//! The report body is produced as plain text from a `minijinja` template,
//! wrapped to a fixed column width, and laid out top to bottom on A4 pages.

use crate::qc_form::{
    domain::QcReport,
    ports::{QcReportRenderer, RenderError},
};
use minijinja::{Environment, context};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

const REPORT_TEMPLATE: &str =
    "{% for field in fields %}{{ field.label }}: {{ field.value }}\n{% endfor %}";

const PAGE_WIDTH_MM: u16 = 210;
const PAGE_HEIGHT_MM: u16 = 297;
const MARGIN_MM: u16 = 20;
const TITLE_Y_MM: u16 = 270;
const FIRST_LINE_Y_MM: u16 = 255;
const LINE_HEIGHT_MM: u16 = 6;
const TITLE_SIZE_PT: u16 = 18;
const BODY_SIZE_PT: u16 = 11;
const LAYER_NAME: &str = "Layer 1";

/// Characters per line at the body font size within the page margins.
pub const WRAP_COLUMNS: usize = 90;

/// Body lines that fit between the first line and the bottom margin.
pub const LINES_PER_PAGE: usize = 39;

/// Renders QC reports as paginated A4 PDFs with Helvetica text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintPdfReportRenderer;

impl PrintPdfReportRenderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl QcReportRenderer for PrintPdfReportRenderer {
    fn render(&self, report: &QcReport) -> Result<Vec<u8>, RenderError> {
        let text = report_text(report)?;
        let lines = wrap_lines(&text, WRAP_COLUMNS);
        layout(report.title(), &lines)
    }
}

/// Renders the report body as one `Label: value` line per field.
///
/// # Errors
///
/// Returns [`RenderError::Template`] when the template fails to render.
pub fn report_text(report: &QcReport) -> Result<String, RenderError> {
    Environment::new()
        .render_str(REPORT_TEMPLATE, context! { fields => report.fields() })
        .map_err(RenderError::template)
}

/// Splits `text` into lines no longer than `columns` characters.
///
/// Existing line breaks are kept. Words longer than a line are split.
#[must_use]
pub fn wrap_lines(text: &str, columns: usize) -> Vec<String> {
    let width = columns.max(1);
    let mut wrapped = Vec::new();
    for source in text.lines() {
        let mut current = String::new();
        let mut current_len = 0_usize;
        for word in source.split_whitespace() {
            let mut rest: Vec<char> = word.chars().collect();
            while !rest.is_empty() {
                let gap = usize::from(current_len > 0);
                let room = width.saturating_sub(current_len + gap);
                if rest.len() <= room {
                    if gap == 1 {
                        current.push(' ');
                    }
                    current.extend(rest.iter());
                    current_len += gap + rest.len();
                    rest.clear();
                } else if current_len > 0 {
                    wrapped.push(std::mem::take(&mut current));
                    current_len = 0;
                } else {
                    let tail = rest.split_off(width.min(rest.len()));
                    wrapped.push(rest.iter().collect());
                    rest = tail;
                }
            }
        }
        wrapped.push(current);
    }
    wrapped
}

fn layout(title: &str, lines: &[String]) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(f32::from(PAGE_WIDTH_MM)),
        Mm(f32::from(PAGE_HEIGHT_MM)),
        LAYER_NAME,
    );
    let title_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(RenderError::pdf)?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(RenderError::pdf)?;

    doc.get_page(first_page).get_layer(first_layer).use_text(
        title,
        f32::from(TITLE_SIZE_PT),
        Mm(f32::from(MARGIN_MM)),
        Mm(f32::from(TITLE_Y_MM)),
        &title_font,
    );

    let mut page = (first_page, first_layer);
    for (index, chunk) in lines.chunks(LINES_PER_PAGE).enumerate() {
        if index > 0 {
            page = doc.add_page(
                Mm(f32::from(PAGE_WIDTH_MM)),
                Mm(f32::from(PAGE_HEIGHT_MM)),
                LAYER_NAME,
            );
        }
        write_lines(&doc, page, chunk, &body_font);
    }

    doc.save_to_bytes().map_err(RenderError::pdf)
}

fn write_lines(
    doc: &PdfDocumentReference,
    (page, layer): (printpdf::PdfPageIndex, printpdf::PdfLayerIndex),
    lines: &[String],
    font: &IndirectFontRef,
) {
    let target = doc.get_page(page).get_layer(layer);
    for (row, line) in (0_u16..).zip(lines) {
        let y = FIRST_LINE_Y_MM.saturating_sub(row.saturating_mul(LINE_HEIGHT_MM));
        target.use_text(
            line.as_str(),
            f32::from(BODY_SIZE_PT),
            Mm(f32::from(MARGIN_MM)),
            Mm(f32::from(y)),
            font,
        );
    }
}
