use super::util::{month_weeks, Week};
use std::fmt;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Month};

/// The month currently shown by the date picker.
///
/// Only the navigation controls move it; it is never clamped against the
/// selected stay.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct DisplayedMonth {
    // Invariant: always the first day of the month
    first: Date,
}

impl DisplayedMonth {
    pub(crate) fn containing(date: Date) -> DisplayedMonth {
        // Every month has a day 1, so this never falls back
        let first = date.replace_day(1).unwrap_or(date);
        DisplayedMonth { first }
    }

    pub(crate) fn year(self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(self) -> Month {
        self.first.month()
    }

    pub(crate) fn last_day(self) -> Date {
        successors(Some(self.first), |&d| d.next_day())
            .take_while(|d| d.month() == self.first.month())
            .last()
            .unwrap_or(self.first)
    }

    pub(crate) fn length(self) -> u8 {
        self.last_day().day()
    }

    pub(crate) fn contains(self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Returns the date for the given day of this month, if it exists
    pub(crate) fn day(self, day: u8) -> Option<Date> {
        self.first.replace_day(day).ok()
    }

    pub(crate) fn next(self) -> Result<DisplayedMonth, OutOfTimeError> {
        self.last_day()
            .next_day()
            .map(|first| DisplayedMonth { first })
            .ok_or(OutOfTimeError)
    }

    pub(crate) fn previous(self) -> Result<DisplayedMonth, OutOfTimeError> {
        self.first
            .previous_day()
            .map(DisplayedMonth::containing)
            .ok_or(OutOfTimeError)
    }

    pub(crate) fn weeks(self) -> Vec<Week> {
        month_weeks(self.first)
    }
}

impl fmt::Display for DisplayedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month(), self.year())
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
