use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub type DayCounts = BTreeMap<u32, u32>;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthQuery {
    year: i32,
    month: u32,
}

impl MonthQuery {
    pub fn new(year: i32, month: i64) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self {
            year,
            month: month as u32,
        })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Moves `delta` months, rolling the year over. Saturates at the ends of
    /// the `i32` year range.
    pub fn shift(self, delta: i32) -> Self {
        const FIRST: i64 = i32::MIN as i64 * 12;
        const LAST: i64 = i32::MAX as i64 * 12 + 11;
        let index = (i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(delta))
            .clamp(FIRST, LAST);
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn prev(self) -> Self {
        self.shift(-1)
    }

    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn days(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Weekday of the 1st, 0 = Sunday.
    pub fn leading_blanks(self) -> u32 {
        weekday_of(self.year, self.month, 1)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn label(self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize - 1], self.year)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Month length under the proleptic Gregorian rules. `month` is 1-based.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Day of week with 0 = Sunday. Sakamoto's method, widened to i64 so any i32
/// year works.
pub fn weekday_of(year: i32, month: u32, day: u32) -> u32 {
    const OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let mut y = i64::from(year);
    if month < 3 {
        y -= 1;
    }
    let idx = (month as usize).clamp(1, 12) - 1;
    let total = y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        + OFFSETS[idx]
        + i64::from(day);
    total.rem_euclid(7) as u32
}

/// Presentation constants of the heat colour ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensityScale {
    pub floor: f64,
    pub span: f64,
    pub ceiling: f64,
    /// Used for every day when `max_count` is zero ("no data yet").
    pub empty: f64,
}

impl Default for IntensityScale {
    fn default() -> Self {
        Self {
            floor: 0.15,
            span: 0.75,
            ceiling: 0.95,
            empty: 0.08,
        }
    }
}

impl IntensityScale {
    pub fn intensity(&self, count: u32, max_count: u32) -> f64 {
        if max_count == 0 {
            return self.empty;
        }
        let ratio = f64::from(count) / f64::from(max_count);
        (self.floor + ratio * self.span).clamp(0.0, self.ceiling)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub count: u32,
    pub intensity: f64,
}

impl CalendarCell {
    fn blank() -> Self {
        Self {
            day: None,
            count: 0,
            intensity: 0.0,
        }
    }
}

pub fn render(query: MonthQuery, counts: &DayCounts, max_count: u32) -> Vec<CalendarCell> {
    render_with(query, counts, max_count, &IntensityScale::default())
}

/// Builds the grid for `query`: blanks up to the weekday of the 1st, then one
/// cell per day. Count keys outside the month are ignored.
pub fn render_with(
    query: MonthQuery,
    counts: &DayCounts,
    max_count: u32,
    scale: &IntensityScale,
) -> Vec<CalendarCell> {
    let blanks = query.leading_blanks();
    let days = query.days();

    let mut cells = Vec::with_capacity((blanks + days) as usize);
    cells.extend((0..blanks).map(|_| CalendarCell::blank()));
    for day in 1..=days {
        let count = counts.get(&day).copied().unwrap_or(0);
        cells.push(CalendarCell {
            day: Some(day),
            count,
            intensity: scale.intensity(count, max_count),
        });
    }
    cells
}
