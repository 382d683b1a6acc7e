use super::month::DisplayedMonth;
use super::util::WeekdayExt;
use crate::search::{DayRole, Selection};
use crate::theme::{
    calendar::{ENDPOINT_STYLE, IN_RANGE_STYLE, PAST_DAY_STYLE, WEEKDAY_STYLE},
    BASE_STYLE, TITLE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{HorizontalAlignment, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Date;

static HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the picker including its border
pub(crate) const PICKER_WIDTH: u16 = DAY_WIDTH * 7 + 2;

/// Lines above the first week: top border, month title, weekday header
const TOP_LINES: u16 = 3;

/// Month grid popup used to choose check-in and check-out dates
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DatePicker {
    pub(crate) today: Date,
    pub(crate) month: DisplayedMonth,
    pub(crate) selection: Selection,
    pub(crate) cursor: Option<Date>,
}

impl DatePicker {
    pub(crate) fn height(&self) -> u16 {
        let weeks = u16::try_from(self.month.weeks().len()).unwrap_or(6);
        TOP_LINES + weeks + 1
    }

    fn day_style(&self, date: Date) -> Style {
        let style = if date < self.today {
            PAST_DAY_STYLE
        } else {
            match self.selection.role_of(date) {
                DayRole::CheckIn | DayRole::CheckOut => ENDPOINT_STYLE,
                DayRole::InRange => IN_RANGE_STYLE,
                DayRole::Outside => BASE_STYLE,
            }
        };
        if self.cursor == Some(date) {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }
}

impl StatefulWidget for DatePicker {
    type State = PickerHits;

    /*
     * ┌────────── Dates ───────────┐
     * │<       October 2026       >│
     * │ Su  Mo  Tu  We  Th  Fr  Sa │
     * │                  1   2   3 │
     * │  4   5   6   7   8   9  10 │
     * │ ...                        │
     * └────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut PickerHits) {
        hits.clear();
        let area = Rect {
            width: PICKER_WIDTH.min(area.width),
            height: self.height().min(area.height),
            ..area
        };
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" Dates ")
            .title_alignment(HorizontalAlignment::Center)
            .style(BASE_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < DAY_WIDTH * 7 || inner.height < 2 {
            return;
        }

        let nav = Rect { height: 1, ..inner };
        Line::styled(self.month.to_string(), TITLE_STYLE)
            .centered()
            .render(nav, buf);
        buf.set_string(nav.x, nav.y, "<", TITLE_STYLE);
        hits.push(Rect { width: 1, ..nav }, PickerTarget::PreviousMonth);
        let right = nav.right().saturating_sub(1);
        buf.set_string(right, nav.y, ">", TITLE_STYLE);
        hits.push(Rect { x: right, width: 1, ..nav }, PickerTarget::NextMonth);

        buf.set_string(inner.x, inner.y + 1, HEADER, WEEKDAY_STYLE);

        for (y, week) in std::iter::zip(inner.y + 2..inner.bottom(), self.month.weeks()) {
            for (wd, date) in week.enumerate() {
                let x = inner.x + DAY_WIDTH * wd.index0();
                let s = if date == self.today {
                    format!("[{:2}]", date.day())
                } else {
                    format!(" {:2} ", date.day())
                };
                buf.set_string(x, y, s, self.day_style(date));
                hits.push(
                    Rect {
                        x,
                        y,
                        width: DAY_WIDTH,
                        height: 1,
                    },
                    PickerTarget::Day(date),
                );
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerTarget {
    PreviousMonth,
    NextMonth,
    Day(Date),
}

/// Screen regions of the clickable parts of the last rendered picker
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PickerHits(Vec<(Rect, PickerTarget)>);

impl PickerHits {
    fn clear(&mut self) {
        self.0.clear();
    }

    fn push(&mut self, area: Rect, target: PickerTarget) {
        self.0.push((area, target));
    }

    pub(crate) fn at(&self, pos: Position) -> Option<PickerTarget> {
        self.0
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|&(_, target)| target)
    }
}
