use std::iter::successors;
use time::{Date, Weekday, Weekday::*};

pub(super) const DAYS_IN_WEEK: usize = 7;

pub(super) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// One row of a month grid.  Slots for days belonging to the neighboring
/// months are left empty.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Week([Option<Date>; DAYS_IN_WEEK]);

impl Week {
    fn set(&mut self, date: Date) {
        let i = usize::from(date.weekday().index0());
        if let Some(slot) = self.0.get_mut(i) {
            *slot = Some(date);
        }
    }

    pub(crate) fn enumerate(&self) -> EnumerateWeek<'_> {
        EnumerateWeek::new(self)
    }

    pub(crate) fn get(&self, wd: Weekday) -> Option<Date> {
        self.0.get(usize::from(wd.index0())).copied().flatten()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct EnumerateWeek<'a> {
    week: &'a Week,
    next_weekday: Option<Weekday>,
}

impl<'a> EnumerateWeek<'a> {
    fn new(week: &'a Week) -> Self {
        EnumerateWeek {
            week,
            next_weekday: Some(Sunday),
        }
    }
}

impl Iterator for EnumerateWeek<'_> {
    type Item = (Weekday, Date);

    fn next(&mut self) -> Option<(Weekday, Date)> {
        loop {
            let wd = self.next_weekday?;
            self.next_weekday = match wd.next() {
                Sunday => None,
                wd2 => Some(wd2),
            };
            if let Some(date) = self.week.get(wd) {
                return Some((wd, date));
            }
        }
    }
}

/// Splits the month starting at `first` into Sunday-based weeks
pub(super) fn month_weeks(first: Date) -> Vec<Week> {
    let month = first.month();
    let mut weeks = Vec::with_capacity(6);
    let mut current = Week::default();
    for date in successors(Some(first), |&d| d.next_day()).take_while(|d| d.month() == month) {
        if date.weekday() == Sunday && date != first {
            weeks.push(std::mem::take(&mut current));
        }
        current.set(date);
    }
    weeks.push(current);
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_enumerate_partial_week() {
        let mut week = Week::default();
        week.set(date!(2026 - 10 - 01));
        week.set(date!(2026 - 10 - 02));
        week.set(date!(2026 - 10 - 03));
        let mut iter = week.enumerate();
        assert_eq!(iter.next(), Some((Thursday, date!(2026 - 10 - 01))));
        assert_eq!(iter.next(), Some((Friday, date!(2026 - 10 - 02))));
        assert_eq!(iter.next(), Some((Saturday, date!(2026 - 10 - 03))));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_month_weeks_october_2026() {
        let weeks = month_weeks(date!(2026 - 10 - 01));
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0].get(Sunday), None);
        assert_eq!(weeks[0].get(Thursday), Some(date!(2026 - 10 - 01)));
        assert_eq!(weeks[1].get(Sunday), Some(date!(2026 - 10 - 04)));
        assert_eq!(weeks[4].get(Saturday), Some(date!(2026 - 10 - 31)));
    }

    #[test]
    fn test_month_weeks_starting_on_sunday() {
        // February 2026 starts on a Sunday and spans exactly four weeks
        let weeks = month_weeks(date!(2026 - 02 - 01));
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0].get(Sunday), Some(date!(2026 - 02 - 01)));
        assert_eq!(weeks[3].get(Saturday), Some(date!(2026 - 02 - 28)));
    }
}
