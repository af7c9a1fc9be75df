// Month grids and month arithmetic

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

pub const DAYS_PER_WEEK: usize = 7;

/// One week row, Sunday first. `0` marks a day outside the month.
pub type Week = [u32; DAYS_PER_WEEK];

pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "SUNDAY",
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
];

pub const WEEKDAY_INITIALS: [&str; DAYS_PER_WEEK] = ["S", "M", "T", "W", "T", "F", "S"];

/// The weeks a month spans, laid out Sunday through Saturday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        let first = first_of_month(year, month)?;
        let days = days_in_month(year, month)?;
        let lead = first.weekday().num_days_from_sunday() as usize;

        let mut weeks = Vec::with_capacity(6);
        let mut week: Week = [0; DAYS_PER_WEEK];
        let mut column = lead;

        for day in 1..=days {
            week[column] = day;
            column += 1;
            if column == DAYS_PER_WEEK {
                weeks.push(week);
                week = [0; DAYS_PER_WEEK];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(week);
        }

        Ok(Self { weeks })
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Number of cells holding an actual day of the month.
    pub fn day_count(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|week| week.iter())
            .filter(|&&day| day != 0)
            .count()
    }
}

/// The month following `month`, carrying the year past December.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    let next = (month % 12) + 1;
    let next_year = if month >= 12 { year.saturating_add(1) } else { year };
    (next_year, next)
}

/// The two months previewed on the page for `month`.
pub fn look_ahead(year: i32, month: u32) -> [(i32, u32); 2] {
    let first = next_month(year, month);
    let second = next_month(first.0, first.1);
    [first, second]
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = first_of_month(year, month)?;
    let (next_year, next) = next_month(year, month);
    let following = first_of_month(next_year, next)?;
    Ok(following.signed_duration_since(first).num_days() as u32)
}

/// Full uppercase month name, e.g. `JANUARY`.
pub fn month_name(year: i32, month: u32) -> Result<String, CalendarError> {
    Ok(first_of_month(year, month)?.format("%B").to_string().to_uppercase())
}

/// Three-letter uppercase month name, e.g. `JAN`.
pub fn month_abbr(year: i32, month: u32) -> Result<String, CalendarError> {
    Ok(first_of_month(year, month)?.format("%b").to_string().to_uppercase())
}

/// Checks that every month of `year` and the two look-ahead months of
/// December can be represented.
pub fn validate_year(year: i32) -> Result<(), CalendarError> {
    for month in 1..=12 {
        days_in_month(year, month)?;
    }
    for (y, m) in look_ahead(year, 12) {
        days_in_month(y, m)?;
    }
    Ok(())
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::YearError(year))
}
