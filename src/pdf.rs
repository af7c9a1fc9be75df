// printpdf-backed Canvas

use log::{debug, warn};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::canvas::{self, Canvas, Paint, Rect, TextAlign};
use crate::error::CalendarError;
use crate::fonts::{FontRole, FontSource, ResolvedFonts};

/// Millimetres per point
const PT_TO_MM: f32 = 25.4 / 72.0;

const LAYER_NAME: &str = "Layer 1";

#[derive(Debug, Clone, Copy)]
struct CanvasState {
    origin: (f32, f32),
    font: FontRole,
    font_size: f32,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            origin: (0.0, 0.0),
            font: FontRole::Label,
            font_size: 10.0,
        }
    }
}

pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: Option<PdfLayerReference>,
    page_width: f32,
    page_height: f32,
    fonts: ResolvedFonts,
    font_refs: [IndirectFontRef; 5],
    state: CanvasState,
    stack: Vec<CanvasState>,
    pages: usize,
}

impl PdfCanvas {
    /// Opens a document with its first page and embeds one font per role.
    ///
    /// Width and height are in points.
    pub fn new(
        title: &str,
        page_width: f32,
        page_height: f32,
        mut fonts: ResolvedFonts,
    ) -> Result<Self, CalendarError> {
        let (doc, page1, layer1) = PdfDocument::new(
            title,
            Mm(page_width * PT_TO_MM),
            Mm(page_height * PT_TO_MM),
            LAYER_NAME,
        );
        let layer = doc.get_page(page1).get_layer(layer1);

        let mut embedded: Vec<(Vec<u8>, IndirectFontRef)> = Vec::new();
        let mut refs = Vec::with_capacity(FontRole::ALL.len());
        for role in FontRole::ALL {
            let attempt = match fonts.get(role) {
                FontSource::External(face) => Some(
                    embed_external(&doc, &mut embedded, &face.data)
                        .map_err(|e| format!("{}: {}", face.path.display(), e)),
                ),
                FontSource::Builtin(_) => None,
            };
            let font_ref = match attempt {
                Some(Ok(font_ref)) => font_ref,
                Some(Err(reason)) => {
                    warn!("Could not embed font {}. Using default font.", reason);
                    fonts.demote(role);
                    add_builtin(&doc, role)?
                }
                None => add_builtin(&doc, role)?,
            };
            refs.push(font_ref);
        }
        let font_refs: [IndirectFontRef; 5] = refs
            .try_into()
            .map_err(|_| CalendarError::PdfError("font table size mismatch".to_string()))?;

        Ok(Self {
            doc,
            layer: Some(layer),
            page_width,
            page_height,
            fonts,
            font_refs,
            state: CanvasState::default(),
            stack: Vec::new(),
            pages: 0,
        })
    }

    /// Number of pages finished with `show_page`.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn save(self, output_path: &Path) -> Result<(), CalendarError> {
        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| CalendarError::PdfError(e.to_string()))?;
        Ok(())
    }

    /// Current layer, starting a new page if the previous one was finished.
    fn layer(&mut self) -> PdfLayerReference {
        if let Some(layer) = &self.layer {
            return layer.clone();
        }
        let (page, layer) = self.doc.add_page(
            Mm(self.page_width * PT_TO_MM),
            Mm(self.page_height * PT_TO_MM),
            LAYER_NAME,
        );
        let layer = self.doc.get_page(page).get_layer(layer);
        self.layer = Some(layer.clone());
        layer
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(
            Mm((x + self.state.origin.0) * PT_TO_MM),
            Mm((y + self.state.origin.1) * PT_TO_MM),
        )
    }
}

impl Canvas for PdfCanvas {
    fn save_state(&mut self) {
        self.layer().save_graphics_state();
        self.stack.push(self.state);
    }

    fn restore_state(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.layer().restore_graphics_state();
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.origin.0 += dx;
        self.state.origin.1 += dy;
    }

    fn set_fill_color(&mut self, color: canvas::Color) {
        self.layer().set_fill_color(to_pdf_color(color));
    }

    fn set_stroke_color(&mut self, color: canvas::Color) {
        self.layer().set_outline_color(to_pdf_color(color));
    }

    fn set_font(&mut self, role: FontRole, size: f32) {
        self.state.font = role;
        self.state.font_size = size;
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign) {
        let CanvasState {
            origin,
            font,
            font_size,
        } = self.state;
        let width = self.fonts.text_width(font, text, font_size);
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };

        let font_ref = self.font_refs[font.index()].clone();
        self.layer().use_text(
            text,
            font_size,
            Mm((left + origin.0) * PT_TO_MM),
            Mm((y + origin.1) * PT_TO_MM),
            &font_ref,
        );
    }

    fn draw_rect(&mut self, rect: Rect, paint: Paint) {
        let points = vec![
            (self.point(rect.x, rect.y), false),
            (self.point(rect.right(), rect.y), false),
            (self.point(rect.right(), rect.top()), false),
            (self.point(rect.x, rect.top()), false),
        ];
        self.layer().add_polygon(Polygon {
            rings: vec![points],
            mode: to_paint_mode(paint),
            winding_order: WindingOrder::NonZero,
        });
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        let (ox, oy) = self.state.origin;
        let points = printpdf::utils::calculate_points_for_circle(
            Pt(radius),
            Pt(cx + ox),
            Pt(cy + oy),
        );
        self.layer().add_polygon(Polygon {
            rings: vec![points],
            mode: to_paint_mode(paint),
            winding_order: WindingOrder::NonZero,
        });
    }

    fn show_page(&mut self) -> Result<(), CalendarError> {
        if !self.stack.is_empty() {
            return Err(CalendarError::PdfError(format!(
                "page {} finished with {} unrestored state(s)",
                self.pages + 1,
                self.stack.len()
            )));
        }
        // Force a page to exist so an empty page still counts
        self.layer();
        self.layer = None;
        self.state = CanvasState::default();
        self.pages += 1;
        debug!("Finished page {}", self.pages);
        Ok(())
    }
}

/// Embeds a face once per distinct font file content.
fn embed_external(
    doc: &PdfDocumentReference,
    embedded: &mut Vec<(Vec<u8>, IndirectFontRef)>,
    data: &[u8],
) -> Result<IndirectFontRef, printpdf::Error> {
    if let Some((_, font_ref)) = embedded.iter().find(|(bytes, _)| bytes.as_slice() == data) {
        return Ok(font_ref.clone());
    }
    let font_ref = doc.add_external_font(data)?;
    embedded.push((data.to_vec(), font_ref.clone()));
    Ok(font_ref)
}

fn add_builtin(
    doc: &PdfDocumentReference,
    role: FontRole,
) -> Result<IndirectFontRef, CalendarError> {
    doc.add_builtin_font(role.builtin().to_pdf())
        .map_err(|e| CalendarError::PdfError(e.to_string()))
}

fn to_pdf_color(color: canvas::Color) -> Color {
    Color::Rgb(Rgb::new(color.r, color.g, color.b, None))
}

fn to_paint_mode(paint: Paint) -> PaintMode {
    match paint {
        Paint::Fill => PaintMode::Fill,
        Paint::Stroke => PaintMode::Stroke,
        Paint::FillStroke => PaintMode::FillStroke,
    }
}
