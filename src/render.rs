// Calendar drawing against any Canvas

use log::debug;

use crate::calendar::{self, MonthGrid, WEEKDAY_INITIALS, WEEKDAY_NAMES};
use crate::canvas::{Canvas, Color, Paint, TextAlign};
use crate::config::PageSize;
use crate::error::CalendarError;
use crate::fonts::FontRole;
use crate::layout::{self, PageLayout};

pub const MONTHS_PER_YEAR: u32 = 12;

/// Draws all twelve month pages of `year`.
pub fn render_year<C: Canvas>(
    canvas: &mut C,
    year: i32,
    page_size: PageSize,
) -> Result<(), CalendarError> {
    calendar::validate_year(year)?;
    for month in 1..=MONTHS_PER_YEAR {
        draw_month_page(canvas, year, month, page_size)?;
    }
    Ok(())
}

/// Draws one full month page and finishes it.
pub fn draw_month_page<C: Canvas>(
    canvas: &mut C,
    year: i32,
    month: u32,
    page_size: PageSize,
) -> Result<(), CalendarError> {
    let grid = MonthGrid::new(year, month)?;
    let page = PageLayout::compute(&grid, page_size);
    debug!(
        "Page {}-{:02}: {} weeks, notes height {:.1}pt",
        year,
        month,
        grid.week_count(),
        page.notes.height
    );

    canvas.save_state();

    // Header
    canvas.set_fill_color(Color::BLACK);
    canvas.set_font(FontRole::Display, layout::HEADER_NUMBER_SIZE);
    canvas.draw_text(
        &format!("{:02}.", month),
        page.header_number.x,
        page.header_number.y,
        TextAlign::Left,
    );
    canvas.set_font(FontRole::Thin, layout::HEADER_TITLE_SIZE);
    canvas.draw_text(
        &format!("{} {}", calendar::month_name(year, month)?, year),
        page.header_title.x,
        page.header_title.y,
        TextAlign::Left,
    );

    // Weekday labels
    canvas.set_font(FontRole::Label, layout::WEEKDAY_SIZE);
    for (name, anchor) in WEEKDAY_NAMES.iter().zip(page.weekday_labels.iter()) {
        canvas.draw_text(name, anchor.x, anchor.y, TextAlign::Center);
    }

    // Grid
    canvas.set_font(FontRole::Body, layout::DAY_NUMBER_SIZE);
    for cell in &page.cells {
        set_panel_colors(canvas);
        canvas.draw_rect(cell.rect, Paint::FillStroke);

        if cell.day != 0 {
            canvas.set_fill_color(Color::BLACK);
            canvas.draw_text(
                &cell.day.to_string(),
                cell.number_anchor.x,
                cell.number_anchor.y,
                TextAlign::Right,
            );
        }
    }

    // Notes
    set_panel_colors(canvas);
    canvas.draw_rect(page.notes, Paint::FillStroke);
    canvas.set_fill_color(Color::BLACK);
    canvas.set_font(FontRole::Label, layout::NOTES_LABEL_SIZE);
    canvas.draw_text(
        "NOTES",
        page.notes_label.x,
        page.notes_label.y,
        TextAlign::Left,
    );

    // Look-ahead panel and mini calendars
    set_panel_colors(canvas);
    canvas.draw_rect(page.mini_panel, Paint::FillStroke);
    if let Some(lower) = page.secondary_panel {
        canvas.draw_rect(lower, Paint::FillStroke);
    }
    for ((next_year, next_month), origin) in calendar::look_ahead(year, month)
        .into_iter()
        .zip(page.mini_origins.iter())
    {
        draw_mini_calendar(canvas, next_year, next_month, origin.x, origin.y)?;
    }

    // Bottom bar
    canvas.set_stroke_color(Color::BLACK);
    canvas.set_fill_color(Color::BLACK);
    canvas.draw_rect(page.bar, Paint::FillStroke);
    canvas.draw_circle(
        page.bar_cap.cx,
        page.bar_cap.cy,
        page.bar_cap.radius,
        Paint::FillStroke,
    );

    canvas.restore_state();
    canvas.show_page()
}

/// Draws a compact month preview with its origin translated to (`x`, `y`).
pub fn draw_mini_calendar<C: Canvas>(
    canvas: &mut C,
    year: i32,
    month: u32,
    x: f32,
    y: f32,
) -> Result<(), CalendarError> {
    let grid = MonthGrid::new(year, month)?;
    let title = format!("{} {}", calendar::month_abbr(year, month)?, year);

    canvas.save_state();
    canvas.translate(x, y);

    set_panel_colors(canvas);
    canvas.draw_rect(layout::MINI_BACKGROUND, Paint::FillStroke);

    canvas.set_fill_color(Color::BLACK);
    canvas.set_font(FontRole::Label, layout::MINI_TITLE_SIZE);
    canvas.draw_text(
        &title,
        layout::MINI_TITLE_X,
        layout::MINI_TITLE_Y,
        TextAlign::Center,
    );

    canvas.set_font(FontRole::Label, layout::MINI_TEXT_SIZE);
    for (col, initial) in WEEKDAY_INITIALS.iter().enumerate() {
        let anchor = layout::mini_initial_anchor(col);
        canvas.draw_text(initial, anchor.x, anchor.y, TextAlign::Center);
    }

    canvas.set_font(FontRole::Body, layout::MINI_TEXT_SIZE);
    for (row, week) in grid.weeks().iter().enumerate() {
        for (col, &day) in week.iter().enumerate() {
            if day == 0 {
                continue;
            }
            let anchor = layout::mini_day_anchor(row, col);
            canvas.draw_text(&day.to_string(), anchor.x, anchor.y, TextAlign::Center);
        }
    }

    canvas.restore_state();
    Ok(())
}

fn set_panel_colors<C: Canvas>(canvas: &mut C) {
    canvas.set_fill_color(Color::PANEL);
    canvas.set_stroke_color(Color::PANEL);
}
