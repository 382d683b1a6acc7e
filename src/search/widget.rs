use super::{GuestKind, SearchForm, SearchPanel, REGIONS};
use crate::calendar::{DatePicker, PickerHits, PickerTarget, PICKER_WIDTH};
use crate::theme::{
    menu::{CHOSEN_STYLE, HINT_STYLE},
    BASE_STYLE, BUTTON_STYLE, FOCUS_STYLE, MUTED_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static SHORT_DATE_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [day padding:none]");

const BAR_HEIGHT: u16 = 3;
const REGION_WIDTH: u16 = 18;
const DATES_WIDTH: u16 = 24;
const BUTTON_WIDTH: u16 = 10;
const REGION_MENU_WIDTH: u16 = 24;

/// Width of the guests panel including its border
const GUESTS_WIDTH: u16 = 41;

/// Column offsets of the parts of a guests panel row, relative to the
/// panel's inner area
const HINT_COL: u16 = 10;
const MINUS_COL: u16 = 28;
const COUNT_COL: u16 = 32;
const PLUS_COL: u16 = 36;

/// The search bar together with whichever of its panels is open
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SearchBar;

impl SearchBar {
    pub(crate) const HEIGHT: u16 = BAR_HEIGHT;
}

impl StatefulWidget for SearchBar {
    type State = SearchForm;

    /*
     * ┌──────────────────────────────────────────────────────────────────────────────┐
     * │ Addis Ababa ▾      Oct 20 → Oct 23          2 adults · 1 room ▾      Search  │
     * └──────────────────────────────────────────────────────────────────────────────┘
     *                     ┌────────── Dates ───────────┐
     *                     │<       October 2026       >│
     */

    fn render(self, area: Rect, buf: &mut Buffer, form: &mut SearchForm) {
        form.hits.clear();
        let [bar, below] =
            Layout::vertical([Constraint::Length(BAR_HEIGHT), Constraint::Min(0)]).areas(area);
        let block = Block::bordered().style(BASE_STYLE);
        let inner = block.inner(bar);
        block.render(bar, buf);
        let [region_area, dates_area, guests_area, button_area] = Layout::horizontal([
            Constraint::Length(REGION_WIDTH),
            Constraint::Length(DATES_WIDTH),
            Constraint::Fill(1),
            Constraint::Length(BUTTON_WIDTH),
        ])
        .spacing(1)
        .areas(inner);

        let open = form.open_panel();
        let segment_style = |panel| {
            if open == Some(panel) {
                FOCUS_STYLE
            } else {
                BASE_STYLE
            }
        };

        let region_line = match form.region() {
            Some(region) => Line::styled(format!(" {region} ▾"), BASE_STYLE),
            None => Line::styled(" Where are you going?", MUTED_STYLE),
        };
        region_line
            .patch_style(segment_style(SearchPanel::Region))
            .render(region_area, buf);
        form.hits
            .push(region_area, SearchTarget::Toggle(SearchPanel::Region));

        let endpoint = |date: Option<Date>, placeholder: &'static str| match date {
            Some(d) => Span::styled(
                d.format(SHORT_DATE_FMT).unwrap_or_else(|_| d.to_string()),
                BASE_STYLE,
            ),
            None => Span::styled(placeholder, MUTED_STYLE),
        };
        Line::from_iter([
            Span::raw(" "),
            endpoint(form.selection().check_in(), "Check-in"),
            Span::raw(" → "),
            endpoint(form.selection().check_out(), "Check-out"),
        ])
        .patch_style(segment_style(SearchPanel::Calendar))
        .render(dates_area, buf);
        form.hits
            .push(dates_area, SearchTarget::Toggle(SearchPanel::Calendar));

        Line::styled(format!(" {} ▾", form.guests().summary()), BASE_STYLE)
            .patch_style(segment_style(SearchPanel::Guests))
            .render(guests_area, buf);
        form.hits
            .push(guests_area, SearchTarget::Toggle(SearchPanel::Guests));

        buf.set_style(button_area, BUTTON_STYLE);
        Line::styled("Search", BUTTON_STYLE)
            .centered()
            .render(button_area, buf);
        form.hits.push(button_area, SearchTarget::Submit);

        let popup = match open {
            Some(SearchPanel::Region) => {
                Some(render_regions(form, region_area.x, below, buf))
            }
            Some(SearchPanel::Calendar) => {
                let picker = DatePicker {
                    today: form.today(),
                    month: form.month(),
                    selection: form.selection(),
                    cursor: form.cursor_date(),
                };
                let popup = popup_area(dates_area.x, PICKER_WIDTH, picker.height(), below);
                picker.render(popup, buf, &mut form.hits.picker);
                Some(popup)
            }
            Some(SearchPanel::Guests) => Some(render_guests(form, guests_area.x, below, buf)),
            None => None,
        };
        form.panels.register(std::iter::once(bar).chain(popup));
    }
}

// Places a popup at the top of `below`, aligned with column `x` but shifted
// left as needed to stay on screen
fn popup_area(x: u16, width: u16, height: u16, below: Rect) -> Rect {
    let x = x.min(below.right().saturating_sub(width)).max(below.x);
    Rect {
        x,
        y: below.y,
        width,
        height,
    }
    .intersection(below)
}

fn render_regions(form: &mut SearchForm, x: u16, below: Rect, buf: &mut Buffer) -> Rect {
    let height = u16::try_from(REGIONS.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = popup_area(x, REGION_MENU_WIDTH, height, below);
    Clear.render(popup, buf);
    let block = Block::bordered().title(" Region ").style(BASE_STYLE);
    let inner = block.inner(popup);
    block.render(popup, buf);
    for (y, (i, &region)) in std::iter::zip(inner.y..inner.bottom(), REGIONS.iter().enumerate()) {
        let row = Rect {
            y,
            height: 1,
            ..inner
        };
        let chosen = form.region() == Some(region);
        let mut style = if chosen { CHOSEN_STYLE } else { BASE_STYLE };
        if form.region_cursor().index() == i {
            style = style.patch(FOCUS_STYLE);
        }
        let mark = if chosen { "✓" } else { " " };
        Line::styled(format!("{mark} {region}"), style).render(row, buf);
        form.hits.push(row, SearchTarget::Region(i));
    }
    popup
}

fn render_guests(form: &mut SearchForm, x: u16, below: Rect, buf: &mut Buffer) -> Rect {
    let height = u16::try_from(GuestKind::ALL.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let popup = popup_area(x, GUESTS_WIDTH, height, below);
    Clear.render(popup, buf);
    let block = Block::bordered().title(" Guests ").style(BASE_STYLE);
    let inner = block.inner(popup);
    block.render(popup, buf);
    if inner.width < PLUS_COL + 3 {
        return popup;
    }
    for (y, kind) in std::iter::zip(inner.y..inner.bottom(), GuestKind::ALL) {
        let row_style = if form.guest_row() == kind {
            FOCUS_STYLE
        } else {
            BASE_STYLE
        };
        let count = form.guests().get(kind);
        let minus_style = if count <= kind.minimum() {
            MUTED_STYLE
        } else {
            BASE_STYLE
        };
        buf.set_string(inner.x + 1, y, kind.label(), row_style);
        buf.set_string(inner.x + HINT_COL, y, kind.hint(), HINT_STYLE);
        buf.set_string(inner.x + MINUS_COL, y, "[-]", minus_style);
        buf.set_string(inner.x + COUNT_COL, y, format!("{count:>3}"), Style::new());
        buf.set_string(inner.x + PLUS_COL, y, "[+]", BASE_STYLE);
        let button = |col| Rect {
            x: inner.x + col,
            y,
            width: 3,
            height: 1,
        };
        form.hits
            .push(button(MINUS_COL), SearchTarget::RemoveGuest(kind));
        form.hits.push(button(PLUS_COL), SearchTarget::AddGuest(kind));
    }
    popup
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchTarget {
    Toggle(SearchPanel),
    Submit,
    Picker(PickerTarget),
    Region(usize),
    AddGuest(GuestKind),
    RemoveGuest(GuestKind),
    /// A press outside the open panel closed it
    Dismissed,
}

/// Clickable regions of the last rendered search bar and panel
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct SearchHits {
    items: Vec<(Rect, SearchTarget)>,
    picker: PickerHits,
}

impl SearchHits {
    fn clear(&mut self) {
        self.items.clear();
        self.picker = PickerHits::default();
    }

    fn push(&mut self, area: Rect, target: SearchTarget) {
        self.items.push((area, target));
    }

    pub(super) fn at(&self, pos: Position) -> Option<SearchTarget> {
        self.picker.at(pos).map(SearchTarget::Picker).or_else(|| {
            self.items
                .iter()
                .find(|(area, _)| area.contains(pos))
                .map(|&(_, target)| target)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Selection, DEFAULT_REGION};
    use time::macros::date;

    fn lines(buffer: &Buffer) -> Vec<String> {
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    fn render(form: &mut SearchForm) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 16);
        let mut buffer = Buffer::empty(area);
        SearchBar.render(area, &mut buffer, form);
        lines(&buffer)
    }

    fn form() -> SearchForm {
        SearchForm::new(date!(2026 - 10 - 16), Some(DEFAULT_REGION))
    }

    #[test]
    fn test_closed_bar() {
        let mut form = form();
        let lines = render(&mut form);
        assert!(lines[1].contains("Addis Ababa ▾"), "{lines:?}");
        assert!(lines[1].contains("Check-in → Check-out"), "{lines:?}");
        assert!(lines[1].contains("2 adults · 1 room ▾"), "{lines:?}");
        assert!(lines[1].contains("Search"), "{lines:?}");
        assert!(lines[3].trim().is_empty(), "{lines:?}");
    }

    #[test]
    fn test_selected_dates_shown() {
        let mut form = form();
        form.pick_date(date!(2026 - 10 - 20)).unwrap();
        form.pick_date(date!(2026 - 11 - 02)).unwrap();
        let lines = render(&mut form);
        assert!(lines[1].contains("Oct 20 → Nov 2"), "{lines:?}");
    }

    #[test]
    fn test_segment_clicks() {
        let mut form = form();
        render(&mut form);
        // Region segment starts just inside the left border
        assert_eq!(
            form.target_at(Position::new(2, 1)),
            Some(SearchTarget::Toggle(SearchPanel::Region))
        );
        assert_eq!(
            form.target_at(Position::new(1 + REGION_WIDTH + 2, 1)),
            Some(SearchTarget::Toggle(SearchPanel::Calendar))
        );
        assert_eq!(
            form.target_at(Position::new(75, 1)),
            Some(SearchTarget::Submit)
        );
        assert_eq!(form.target_at(Position::new(40, 10)), None);
    }

    #[test]
    fn test_calendar_popup_and_click_outside() {
        let mut form = form();
        form.toggle(SearchPanel::Calendar);
        let lines = render(&mut form);
        assert!(lines[4].contains("October 2026"), "{lines:?}");
        // Day cells start one column inside the popup, which is aligned with
        // the dates segment
        let x0 = 1 + REGION_WIDTH + 1 + 1;
        let target = form.target_at(Position::new(x0 + 8 + 1, 3 + 6));
        assert_eq!(
            target,
            Some(SearchTarget::Picker(PickerTarget::Day(date!(2026 - 10 - 20))))
        );
        assert!(form.apply(target.unwrap()));
        assert_eq!(form.selection(), Selection::CheckIn(date!(2026 - 10 - 20)));

        // A press well away from the bar and the popup closes the calendar
        // without touching the pending selection
        assert_eq!(
            form.target_at(Position::new(78, 14)),
            Some(SearchTarget::Dismissed)
        );
        assert_eq!(form.open_panel(), None);
        assert_eq!(form.selection(), Selection::CheckIn(date!(2026 - 10 - 20)));
    }

    #[test]
    fn test_region_popup() {
        let mut form = form();
        form.toggle(SearchPanel::Region);
        let lines = render(&mut form);
        assert!(lines[4].contains("✓ Addis Ababa"), "{lines:?}");
        assert!(lines[5].contains("  Gondar"), "{lines:?}");
        assert_eq!(
            form.target_at(Position::new(3, 6)),
            Some(SearchTarget::Region(2))
        );
    }

    #[test]
    fn test_guests_popup() {
        let mut form = form();
        form.toggle(SearchPanel::Guests);
        let lines = render(&mut form);
        assert!(lines[4].contains("Adults"), "{lines:?}");
        assert!(lines[4].contains("Ages 13 or above"), "{lines:?}");
        assert!(lines[4].contains("[-]   2 [+]"), "{lines:?}");
        assert!(lines[6].contains("Rooms"), "{lines:?}");
        let x0 = 80 - GUESTS_WIDTH + 1;
        assert_eq!(
            form.target_at(Position::new(x0 + PLUS_COL, 5)),
            Some(SearchTarget::AddGuest(GuestKind::Children))
        );
        assert_eq!(
            form.target_at(Position::new(x0 + MINUS_COL + 2, 6)),
            Some(SearchTarget::RemoveGuest(GuestKind::Rooms))
        );
    }
}
