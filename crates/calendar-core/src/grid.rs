//! Date-grid engine.
//!
//! Produces the ordered days shown by each view. All functions take the
//! current date as a parameter so the output is a pure function of its
//! inputs; callers pass [`crate::dates::today`] at render time.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::{first_of_month, is_same_day, start_of_week};

/// Month view always shows six full weeks.
pub const MONTH_GRID_CELLS: usize = 42;
pub const WEEK_GRID_CELLS: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Month, ViewMode::Week, ViewMode::Day];

    pub fn as_str(&self) -> &str {
        match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
            ViewMode::Day => "day",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ViewMode::Month => "Month",
            ViewMode::Week => "Week",
            ViewMode::Day => "Day",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "month" => Some(ViewMode::Month),
            "week" => Some(ViewMode::Week),
            "day" => Some(ViewMode::Day),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

/// One day slot in a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Belongs to the period being navigated (the anchor's month in month view).
    pub is_current_period: bool,
    pub is_today: bool,
}

pub fn is_today(day: NaiveDate, today: NaiveDate) -> bool {
    is_same_day(&day, &today)
}

/// 42 consecutive days starting on the Sunday on or before the first of
/// `anchor`'s month.
pub fn month_grid(anchor: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
    let grid_start = start_of_week(first_of_month(anchor));
    consecutive(grid_start, MONTH_GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            is_current_period: date.month0() == anchor.month0() && date.year() == anchor.year(),
            is_today: is_today(date, today),
        })
        .collect()
}

/// The Sunday-to-Saturday week containing `anchor`.
pub fn week_grid(anchor: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
    consecutive(start_of_week(anchor), WEEK_GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            is_current_period: true,
            is_today: is_today(date, today),
        })
        .collect()
}

pub fn day_grid(anchor: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
    vec![CalendarCell {
        date: anchor,
        is_current_period: true,
        is_today: is_today(anchor, today),
    }]
}

pub fn grid_for(mode: ViewMode, anchor: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
    match mode {
        ViewMode::Month => month_grid(anchor, today),
        ViewMode::Week => week_grid(anchor, today),
        ViewMode::Day => day_grid(anchor, today),
    }
}

/// Move the anchor one period in `direction`.
///
/// Month steps clamp the day of month to the target month's length
/// (Jan 31 + 1 month is Feb 29 in a leap year). Steps that would leave
/// chrono's representable range leave the anchor unchanged.
pub fn navigate(anchor: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
    let moved = match (mode, direction) {
        (ViewMode::Month, Direction::Next) => anchor.checked_add_months(Months::new(1)),
        (ViewMode::Month, Direction::Prev) => anchor.checked_sub_months(Months::new(1)),
        (ViewMode::Week, Direction::Next) => anchor.checked_add_signed(Duration::days(7)),
        (ViewMode::Week, Direction::Prev) => anchor.checked_sub_signed(Duration::days(7)),
        (ViewMode::Day, Direction::Next) => anchor.succ_opt(),
        (ViewMode::Day, Direction::Prev) => anchor.pred_opt(),
    };
    moved.unwrap_or(anchor)
}

fn consecutive(start: NaiveDate, count: usize) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(count)
}
