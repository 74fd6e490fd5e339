use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use crate::cache::DoneDateSet;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Year out of range: {0}")]
    InvalidYear(i32),
}

/// A calendar month; always holds a valid year/month pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidYear(year))?;
        Ok(Self { year, month })
    }

    /// Month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated in `new`; every constructed YearMonth has a first day.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            2 if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCell {
    /// Padding before day 1 so it lands on its weekday column
    Blank,
    Day {
        day: u32,
        date: NaiveDate,
        done: bool,
    },
}

/// Seven-column month layout; trailing cells after the last day are left
/// implicit
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub week_start: Weekday,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, CalendarCell::Blank))
            .count()
    }

    pub fn day_count(&self) -> usize {
        self.cells.len() - self.leading_blanks()
    }

    pub fn done_days(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().filter_map(|cell| match cell {
            CalendarCell::Day { day, done: true, .. } => Some(*day),
            _ => None,
        })
    }

    /// Rows of up to seven cells
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell> {
        self.cells.chunks(7)
    }
}

/// Lay out `year`/`month` as a grid, flagging days found in `done`
pub fn project(
    year: i32,
    month: u32,
    done: &DoneDateSet,
    week_start: Weekday,
) -> Result<MonthGrid, CalendarError> {
    let month = YearMonth::new(year, month)?;
    Ok(project_month(month, done, week_start))
}

pub fn project_month(month: YearMonth, done: &DoneDateSet, week_start: Weekday) -> MonthGrid {
    let first = month.first_day();
    let offset = (first.weekday().num_days_from_sunday() + 7 - week_start.num_days_from_sunday()) % 7;

    let mut cells = vec![CalendarCell::Blank; offset as usize];
    cells.extend(
        (1..=month.days_in_month())
            .filter_map(|day| NaiveDate::from_ymd_opt(month.year, month.month, day))
            .map(|date| CalendarCell::Day {
                day: date.day(),
                date,
                done: done.contains(&date),
            }),
    );

    MonthGrid {
        month,
        week_start,
        cells,
    }
}
