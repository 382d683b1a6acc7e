use thiserror::Error;
use time::Date;

/// Progress of a check-in/check-out pick.
///
/// A complete range always has its check-out strictly after its check-in;
/// [`Selection::pick()`] is the only way to build one.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Selection {
    #[default]
    Empty,
    CheckIn(Date),
    Range {
        check_in: Date,
        check_out: Date,
    },
}

impl Selection {
    /// Applies a click on `date`.
    ///
    /// Dates before `today` cannot be picked and leave the selection as it
    /// was.  Otherwise, a date after a pending check-in completes the range,
    /// and anything else starts a new selection at `date`.
    pub(crate) fn pick(self, date: Date, today: Date) -> Result<Selection, PastDateError> {
        if date < today {
            return Err(PastDateError(date));
        }
        Ok(match self {
            Selection::CheckIn(check_in) if date > check_in => Selection::Range {
                check_in,
                check_out: date,
            },
            _ => Selection::CheckIn(date),
        })
    }

    pub(crate) fn check_in(self) -> Option<Date> {
        match self {
            Selection::Empty => None,
            Selection::CheckIn(check_in) | Selection::Range { check_in, .. } => Some(check_in),
        }
    }

    pub(crate) fn check_out(self) -> Option<Date> {
        match self {
            Selection::Range { check_out, .. } => Some(check_out),
            _ => None,
        }
    }

    pub(crate) fn is_complete(self) -> bool {
        matches!(self, Selection::Range { .. })
    }

    pub(crate) fn role_of(self, date: Date) -> DayRole {
        match self {
            Selection::Empty => DayRole::Outside,
            Selection::CheckIn(check_in) if date == check_in => DayRole::CheckIn,
            Selection::CheckIn(_) => DayRole::Outside,
            Selection::Range {
                check_in,
                check_out,
            } => {
                if date == check_in {
                    DayRole::CheckIn
                } else if date == check_out {
                    DayRole::CheckOut
                } else if check_in < date && date < check_out {
                    DayRole::InRange
                } else {
                    DayRole::Outside
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DayRole {
    CheckIn,
    CheckOut,
    InRange,
    Outside,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("{0} is in the past and cannot be booked")]
pub(crate) struct PastDateError(pub(crate) Date);

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 10 - 16);

    #[test]
    fn test_first_pick_sets_check_in() {
        let sel = Selection::Empty.pick(date!(2026 - 10 - 20), TODAY).unwrap();
        assert_eq!(sel, Selection::CheckIn(date!(2026 - 10 - 20)));
        assert!(!sel.is_complete());
    }

    #[test]
    fn test_later_pick_completes_range() {
        let d1 = date!(2026 - 10 - 20);
        for d2 in [
            date!(2026 - 10 - 21),
            date!(2026 - 11 - 02),
            date!(2027 - 03 - 01),
        ] {
            let sel = Selection::Empty
                .pick(d1, TODAY)
                .and_then(|s| s.pick(d2, TODAY))
                .unwrap();
            assert_eq!(
                sel,
                Selection::Range {
                    check_in: d1,
                    check_out: d2
                }
            );
            assert_eq!(sel.check_in(), Some(d1));
            assert_eq!(sel.check_out(), Some(d2));
        }
    }

    #[test]
    fn test_earlier_pick_restarts() {
        let sel = Selection::Empty
            .pick(date!(2026 - 10 - 25), TODAY)
            .and_then(|s| s.pick(date!(2026 - 10 - 18), TODAY))
            .unwrap();
        assert_eq!(sel, Selection::CheckIn(date!(2026 - 10 - 18)));
    }

    #[test]
    fn test_same_day_pick_restarts() {
        let d = date!(2026 - 10 - 25);
        let sel = Selection::CheckIn(d).pick(d, TODAY).unwrap();
        assert_eq!(sel, Selection::CheckIn(d));
        assert_eq!(sel.check_out(), None);
    }

    #[test]
    fn test_pick_after_complete_range_restarts() {
        let sel = Selection::Range {
            check_in: date!(2026 - 10 - 20),
            check_out: date!(2026 - 10 - 22),
        };
        assert_eq!(
            sel.pick(date!(2026 - 10 - 30), TODAY),
            Ok(Selection::CheckIn(date!(2026 - 10 - 30)))
        );
        assert_eq!(
            sel.pick(date!(2026 - 10 - 17), TODAY),
            Ok(Selection::CheckIn(date!(2026 - 10 - 17)))
        );
    }

    #[test]
    fn test_past_dates_rejected() {
        let yesterday = date!(2026 - 10 - 15);
        for sel in [
            Selection::Empty,
            Selection::CheckIn(date!(2026 - 10 - 20)),
            Selection::Range {
                check_in: date!(2026 - 10 - 20),
                check_out: date!(2026 - 10 - 22),
            },
        ] {
            assert_eq!(sel.pick(yesterday, TODAY), Err(PastDateError(yesterday)));
            assert_eq!(
                sel.pick(date!(2025 - 01 - 01), TODAY),
                Err(PastDateError(date!(2025 - 01 - 01)))
            );
        }
    }

    #[test]
    fn test_today_is_selectable() {
        assert_eq!(
            Selection::Empty.pick(TODAY, TODAY),
            Ok(Selection::CheckIn(TODAY))
        );
    }

    #[test]
    fn test_role_of() {
        let sel = Selection::Range {
            check_in: date!(2026 - 10 - 20),
            check_out: date!(2026 - 10 - 23),
        };
        assert_eq!(sel.role_of(date!(2026 - 10 - 19)), DayRole::Outside);
        assert_eq!(sel.role_of(date!(2026 - 10 - 20)), DayRole::CheckIn);
        assert_eq!(sel.role_of(date!(2026 - 10 - 21)), DayRole::InRange);
        assert_eq!(sel.role_of(date!(2026 - 10 - 22)), DayRole::InRange);
        assert_eq!(sel.role_of(date!(2026 - 10 - 23)), DayRole::CheckOut);
        assert_eq!(sel.role_of(date!(2026 - 10 - 24)), DayRole::Outside);
        let pending = Selection::CheckIn(date!(2026 - 10 - 20));
        assert_eq!(pending.role_of(date!(2026 - 10 - 20)), DayRole::CheckIn);
        assert_eq!(pending.role_of(date!(2026 - 10 - 21)), DayRole::Outside);
    }
}
