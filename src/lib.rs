// calendar-pdf: Twelve-page PDF calendars with look-ahead mini calendars

pub mod calendar;
pub mod canvas;
pub mod config;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod pdf;
pub mod render;

use log::info;
use std::path::Path;

pub use config::{CalendarConfig, FontManifest, PageSize};
pub use error::CalendarError;
pub use fonts::FontAvailability;

use crate::pdf::PdfCanvas;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub pages: usize,
    pub fonts: FontAvailability,
}

/// Renders the calendar described by `config` and writes it to `output_path`.
pub fn generate_calendar(
    config: &CalendarConfig,
    output_path: &Path,
) -> Result<GenerationSummary, CalendarError> {
    calendar::validate_year(config.year)?;

    let (fonts, availability) = fonts::resolve_fonts(&config.font_dir, &config.fonts);
    let (width, height) = config.page_size.dimensions();

    info!(
        "Rendering {} on {} pages",
        config.title(),
        config.page_size.label()
    );
    let mut canvas = PdfCanvas::new(&config.title(), width, height, fonts)?;
    render::render_year(&mut canvas, config.year, config.page_size)?;

    let pages = canvas.page_count();
    canvas.save(output_path)?;
    info!("Saved {} pages to {}", pages, output_path.display());

    Ok(GenerationSummary {
        pages,
        fonts: availability,
    })
}
