//! Page geometry for one month.
//!
//! All values are in points. Vertical positions are measured from the
//! bottom of the page, so the grid grows downward from a fixed top row and
//! the notes box takes whatever is left above the bottom margin.

use crate::calendar::{MonthGrid, DAYS_PER_WEEK};
use crate::canvas::Rect;
use crate::config::PageSize;

pub const INCH: f32 = 72.0;
pub const CM: f32 = INCH / 2.54;

/// Left edge shared by the header, notes box and bottom bar
pub const LEFT_MARGIN: f32 = 0.5 * INCH + 3.0;
pub const BOTTOM_MARGIN: f32 = 0.5 * INCH;

/// Header
pub const HEADER_Y: f32 = 10.0 * INCH;
pub const HEADER_NUMBER_SIZE: f32 = 80.0;
pub const HEADER_TITLE_SIZE: f32 = 20.0;
const HEADER_TITLE_DROP: f32 = 0.3 * INCH;

/// Weekday label row
pub const WEEKDAY_Y: f32 = 9.45 * INCH;
pub const WEEKDAY_SIZE: f32 = 10.0;
const WEEKDAY_X: f32 = INCH + 5.0;

/// Day cells
pub const CELL_WIDTH: f32 = 1.03 * INCH;
pub const CELL_HEIGHT: f32 = 1.25 * INCH;
pub const CELL_SPACING: f32 = 0.06 * INCH;
pub const GRID_TOP: f32 = 9.4 * INCH;
pub const DAY_NUMBER_SIZE: f32 = 10.0;
const GRID_X: f32 = INCH + 3.0;
const DAY_NUMBER_INSET: f32 = 0.1 * INCH;

/// Notes box
pub const NOTES_LABEL_SIZE: f32 = 10.0;
const NOTES_WIDTH_CELLS: f32 = 4.5;
const NOTES_DROP: f32 = 0.345 * INCH;
const NOTES_TOP_OFFSET: f32 = 23.0;
const NOTES_BOTTOM_GAP: f32 = 8.0;

/// Above this height the mini calendar panel only takes the top half of the
/// space next to the notes box.
pub const MINI_PANEL_SPLIT_THRESHOLD: f32 = 100.0;
const MINI_PANEL_WIDTH: f32 = 2.5 * INCH;
const MINI_PANEL_GAP: f32 = 0.06 * INCH;
const MINI_CALENDAR_STEP: f32 = 1.3 * INCH;

/// Mini calendar, in its own translated frame
pub const MINI_BACKGROUND: Rect = Rect::new(-0.2 * INCH, 0.0, 1.1 * INCH, 0.9 * INCH);
pub const MINI_TITLE_X: f32 = 0.4 * INCH;
pub const MINI_TITLE_Y: f32 = 0.8 * INCH;
pub const MINI_TITLE_SIZE: f32 = 8.0;
pub const MINI_INITIAL_X: f32 = -0.13 * INCH;
pub const MINI_INITIAL_Y: f32 = 0.65 * INCH;
pub const MINI_DAY_X: f32 = -0.12 * INCH;
pub const MINI_DAY_Y: f32 = 0.45 * INCH;
pub const MINI_COLUMN_STEP: f32 = 0.17 * INCH;
pub const MINI_ROW_STEP: f32 = 0.12 * INCH;
pub const MINI_TEXT_SIZE: f32 = 6.0;

/// Bottom bar
const BAR_WIDTH: f32 = 18.1 * CM;
const BAR_HEIGHT: f32 = 2.0;
const BAR_CAP_X: f32 = 19.6 * CM;
const BAR_CAP_RADIUS: f32 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One rectangle of the month grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCell {
    pub rect: Rect,
    /// `0` for cells outside the month
    pub day: u32,
    /// Right edge and baseline of the day number
    pub number_anchor: Anchor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub header_number: Anchor,
    pub header_title: Anchor,
    /// Centres of the weekday labels, Sunday first
    pub weekday_labels: [Anchor; DAYS_PER_WEEK],
    pub cells: Vec<DayCell>,
    pub grid_bottom: f32,
    pub notes: Rect,
    pub notes_label: Anchor,
    pub mini_panel: Rect,
    /// Fills the lower half beside the notes box when the panel is split
    pub secondary_panel: Option<Rect>,
    pub mini_origins: [Anchor; 2],
    pub bar: Rect,
    pub bar_cap: Circle,
}

impl PageLayout {
    pub fn compute(grid: &MonthGrid, page_size: PageSize) -> Self {
        let (page_width, page_height) = page_size.dimensions();

        let weekday_labels = std::array::from_fn(|col| {
            Anchor::new(WEEKDAY_X + col as f32 * CELL_WIDTH, WEEKDAY_Y)
        });

        let mut cells = Vec::with_capacity(grid.week_count() * DAYS_PER_WEEK);
        let mut row_top = GRID_TOP;
        for week in grid.weeks() {
            for (col, &day) in week.iter().enumerate() {
                let center_x = GRID_X + col as f32 * CELL_WIDTH;
                cells.push(DayCell {
                    rect: Rect::new(
                        center_x - CELL_WIDTH / 2.0 + CELL_SPACING / 2.0,
                        row_top - CELL_HEIGHT + CELL_SPACING / 2.0,
                        CELL_WIDTH - CELL_SPACING,
                        CELL_HEIGHT - CELL_SPACING,
                    ),
                    day,
                    number_anchor: Anchor::new(
                        center_x + CELL_WIDTH / 2.0 - DAY_NUMBER_INSET,
                        row_top - CELL_HEIGHT / 4.0 + DAY_NUMBER_INSET,
                    ),
                });
            }
            row_top -= CELL_HEIGHT;
        }
        let grid_bottom = row_top;

        // Height from just under the grid down to the bottom margin
        let notes_y = grid_bottom - NOTES_DROP;
        let notes_height =
            (page_height - BOTTOM_MARGIN) - (page_height - grid_bottom) - NOTES_BOTTOM_GAP;
        let notes_width = CELL_WIDTH * NOTES_WIDTH_CELLS;
        let notes = Rect::new(
            LEFT_MARGIN,
            notes_y - notes_height + NOTES_TOP_OFFSET,
            notes_width,
            notes_height,
        );
        let notes_label = Anchor::new(
            LEFT_MARGIN + CELL_WIDTH / 10.0 - 0.05 * INCH,
            notes_y - CELL_HEIGHT / 8.0 + 0.3 * INCH,
        );

        let mini_x = LEFT_MARGIN + notes_width + CELL_WIDTH / 4.0;
        let panel_height = mini_panel_height(notes_height);
        let mini_panel = Rect::new(
            mini_x - 0.2 * INCH,
            notes.top() - panel_height,
            MINI_PANEL_WIDTH,
            panel_height,
        );
        let secondary_panel = (notes_height > MINI_PANEL_SPLIT_THRESHOLD).then(|| {
            Rect::new(
                mini_panel.x,
                notes.y,
                MINI_PANEL_WIDTH,
                mini_panel.y - MINI_PANEL_GAP - notes.y,
            )
        });

        let mini_y = notes_y - CELL_HEIGHT / 2.0;
        let mini_origins = [
            Anchor::new(mini_x, mini_y),
            Anchor::new(mini_x + MINI_CALENDAR_STEP, mini_y),
        ];

        let bar = Rect::new(LEFT_MARGIN, BOTTOM_MARGIN, BAR_WIDTH, BAR_HEIGHT);
        let bar_cap = Circle {
            cx: BAR_CAP_X,
            cy: BOTTOM_MARGIN + BAR_CAP_RADIUS,
            radius: BAR_CAP_RADIUS,
        };

        Self {
            page_width,
            page_height,
            header_number: Anchor::new(LEFT_MARGIN, HEADER_Y),
            header_title: Anchor::new(LEFT_MARGIN, HEADER_Y - HEADER_TITLE_DROP),
            weekday_labels,
            cells,
            grid_bottom,
            notes,
            notes_label,
            mini_panel,
            secondary_panel,
            mini_origins,
            bar,
            bar_cap,
        }
    }
}

/// Panel height beside a notes box of `notes_height`.
pub fn mini_panel_height(notes_height: f32) -> f32 {
    if notes_height > MINI_PANEL_SPLIT_THRESHOLD {
        notes_height / 2.0
    } else {
        notes_height
    }
}

/// Centre of a day number inside a mini calendar frame.
pub fn mini_day_anchor(week: usize, col: usize) -> Anchor {
    Anchor::new(
        MINI_DAY_X + col as f32 * MINI_COLUMN_STEP,
        MINI_DAY_Y - week as f32 * MINI_ROW_STEP,
    )
}

/// Centre of a weekday initial inside a mini calendar frame.
pub fn mini_initial_anchor(col: usize) -> Anchor {
    Anchor::new(MINI_INITIAL_X + col as f32 * MINI_COLUMN_STEP, MINI_INITIAL_Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(year: i32, month: u32, page: PageSize) -> PageLayout {
        PageLayout::compute(&MonthGrid::new(year, month).unwrap(), page)
    }

    #[test]
    fn one_cell_per_grid_entry() {
        let grid = MonthGrid::new(2025, 1).unwrap();
        let page = PageLayout::compute(&grid, PageSize::A4);
        assert_eq!(page.cells.len(), grid.week_count() * DAYS_PER_WEEK);
        assert_eq!(page.cells.iter().filter(|c| c.day != 0).count(), 31);
        assert_eq!(page.cells[3].day, 1);
        assert_eq!(page.cells[0].day, 0);
    }

    #[test]
    fn cells_are_inset_by_half_the_spacing() {
        let page = layout(2025, 1, PageSize::A4);
        let first = page.cells[0].rect;
        let second = page.cells[1].rect;
        assert!((second.x - first.right() - CELL_SPACING).abs() < 1e-3);
        assert!((first.top() - (GRID_TOP - CELL_SPACING / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn notes_box_is_positive_and_flush_with_bottom_margin() {
        for page_size in [PageSize::A4, PageSize::Letter] {
            for year in [2024, 2025, 2026] {
                for month in 1..=12 {
                    let page = layout(year, month, page_size);
                    assert!(page.notes.height > 0.0, "{}-{}", year, month);
                    let expected_bottom = BOTTOM_MARGIN + NOTES_BOTTOM_GAP - NOTES_DROP
                        + NOTES_TOP_OFFSET;
                    assert!((page.notes.y - expected_bottom).abs() < 1e-3);
                    assert!(page.notes.top() < page.grid_bottom);
                }
            }
        }
    }

    #[test]
    fn fewer_weeks_grow_the_notes_box() {
        // February 2026 spans four weeks, August 2025 six
        let short = layout(2026, 2, PageSize::A4);
        let long = layout(2025, 8, PageSize::A4);
        assert!((short.notes.height - long.notes.height - 2.0 * CELL_HEIGHT).abs() < 1e-3);
    }

    #[test]
    fn tall_notes_halve_the_mini_panel() {
        for month in 1..=12 {
            let page = layout(2025, month, PageSize::A4);
            if page.notes.height > MINI_PANEL_SPLIT_THRESHOLD {
                assert!((page.mini_panel.height - page.notes.height / 2.0).abs() < 1e-3);
                let lower = page.secondary_panel.unwrap();
                assert!(lower.height > 0.0);
                assert!(lower.top() < page.mini_panel.y);
                assert!((lower.y - page.notes.y).abs() < 1e-3);
            } else {
                assert_eq!(page.mini_panel.height, page.notes.height);
                assert!(page.secondary_panel.is_none());
            }
            assert!((page.mini_panel.top() - page.notes.top()).abs() < 1e-3);
        }
    }

    #[test]
    fn six_week_month_keeps_a_single_panel() {
        let page = layout(2025, 8, PageSize::A4);
        assert!(page.notes.height <= MINI_PANEL_SPLIT_THRESHOLD);
        assert!(page.secondary_panel.is_none());
    }

    #[test]
    fn mini_calendars_sit_right_of_notes() {
        let page = layout(2025, 3, PageSize::A4);
        assert!(page.mini_origins[0].x > page.notes.right());
        assert!(
            (page.mini_origins[1].x - page.mini_origins[0].x - MINI_CALENDAR_STEP).abs() < 1e-3
        );
        assert!(page.mini_panel.right() < page.page_width);
    }

    #[test]
    fn mini_grid_steps_down_and_right() {
        let a = mini_day_anchor(0, 0);
        let b = mini_day_anchor(1, 1);
        assert!((b.x - a.x - MINI_COLUMN_STEP).abs() < 1e-4);
        assert!((a.y - b.y - MINI_ROW_STEP).abs() < 1e-4);
        assert_eq!(mini_initial_anchor(0).y, MINI_INITIAL_Y);
    }

    #[test]
    fn bar_fits_on_both_page_sizes() {
        for page_size in [PageSize::A4, PageSize::Letter] {
            let page = layout(2025, 1, page_size);
            assert!(page.bar.right() < page.page_width);
            assert!(page.bar_cap.cx + page.bar_cap.radius < page.page_width);
        }
    }
}
