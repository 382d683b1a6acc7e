mod guests;
mod range;
mod widget;
pub(crate) use self::guests::{GuestCounts, GuestKind};
pub(crate) use self::range::{DayRole, PastDateError, Selection};
pub(crate) use self::widget::{SearchBar, SearchTarget};
use self::widget::SearchHits;
use crate::calendar::{DisplayedMonth, PickerTarget};
use crate::dropdown::{Coordinator, ListCursor, Pointer};
use crate::locale::{Currency, Language};
use ratatui::layout::Position;
use serde::Serialize;
use thiserror::Error;
use time::{Date, OffsetDateTime};

pub(crate) static REGIONS: &[&str] = &[
    "Addis Ababa",
    "Gondar",
    "Bahir Dar",
    "Lalibela",
    "Axum",
    "Hawassa",
    "Arba Minch",
    "Jimma",
    "Haramaya",
    "Dire Dawa",
];

pub(crate) const DEFAULT_REGION: &str = "Addis Ababa";

/// Looks up a region by name, ignoring case
pub(crate) fn find_region(name: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .copied()
        .find(|r| r.eq_ignore_ascii_case(name.trim()))
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum SearchPanel {
    Region,
    Calendar,
    Guests,
}

/// State of the header search bar: destination, stay dates, and party size
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SearchForm {
    today: Date,
    region: Option<&'static str>,
    selection: Selection,
    month: DisplayedMonth,
    cursor_day: u8,
    guests: GuestCounts,
    guest_row: GuestKind,
    region_cursor: ListCursor,
    panels: Coordinator<SearchPanel>,
    hits: SearchHits,
}

impl SearchForm {
    pub(crate) fn new(today: Date, region: Option<&'static str>) -> SearchForm {
        SearchForm {
            today,
            region,
            selection: Selection::Empty,
            month: DisplayedMonth::containing(today),
            cursor_day: today.day(),
            guests: GuestCounts::default(),
            guest_row: GuestKind::Adults,
            region_cursor: ListCursor::new(REGIONS.len()),
            panels: Coordinator::new(),
            hits: SearchHits::default(),
        }
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn region(&self) -> Option<&'static str> {
        self.region
    }

    pub(crate) fn selection(&self) -> Selection {
        self.selection
    }

    pub(crate) fn month(&self) -> DisplayedMonth {
        self.month
    }

    pub(crate) fn guests(&self) -> GuestCounts {
        self.guests
    }

    pub(crate) fn guest_row(&self) -> GuestKind {
        self.guest_row
    }

    pub(crate) fn region_cursor(&self) -> ListCursor {
        self.region_cursor
    }

    pub(crate) fn open_panel(&self) -> Option<SearchPanel> {
        self.panels.current()
    }

    pub(crate) fn cursor_date(&self) -> Option<Date> {
        self.month.day(self.cursor_day)
    }

    pub(crate) fn toggle(&mut self, panel: SearchPanel) {
        if panel == SearchPanel::Region && !self.panels.is_open(panel) {
            let index = self
                .region
                .and_then(|r| REGIONS.iter().position(|&s| s == r))
                .unwrap_or(0);
            self.region_cursor = ListCursor::new(REGIONS.len()).at(index);
        }
        self.panels.toggle(panel);
    }

    /// Closes whichever panel is open.  Returns `false` if none was.
    pub(crate) fn close_panel(&mut self) -> bool {
        self.panels.close().is_some()
    }

    pub(crate) fn pick_date(&mut self, date: Date) -> Result<(), PastDateError> {
        self.selection = self.selection.pick(date, self.today)?;
        if self.month.contains(date) {
            self.cursor_day = date.day();
        }
        if self.selection.is_complete() {
            log::debug!(
                "Stay selected: {} to {}",
                self.selection.check_in().unwrap_or(date),
                date
            );
            self.panels.close();
        }
        Ok(())
    }

    pub(crate) fn pick_cursor(&mut self) -> bool {
        match self.cursor_date() {
            Some(date) => self.pick_date(date).is_ok(),
            None => false,
        }
    }

    pub(crate) fn next_month(&mut self) -> bool {
        self.show_month(self.month.next().ok())
    }

    pub(crate) fn previous_month(&mut self) -> bool {
        self.show_month(self.month.previous().ok())
    }

    fn show_month(&mut self, month: Option<DisplayedMonth>) -> bool {
        let Some(month) = month else {
            return false;
        };
        self.month = month;
        self.cursor_day = self.cursor_day.min(month.length());
        true
    }

    /// Moves the calendar cursor by `days` within the displayed month
    pub(crate) fn move_cursor(&mut self, days: i16) -> bool {
        let target = i16::from(self.cursor_day) + days;
        match u8::try_from(target) {
            Ok(day) if (1..=self.month.length()).contains(&day) => {
                self.cursor_day = day;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn region_up(&mut self) -> bool {
        self.region_cursor.up()
    }

    pub(crate) fn region_down(&mut self) -> bool {
        self.region_cursor.down()
    }

    pub(crate) fn choose_region(&mut self, index: usize) -> bool {
        match REGIONS.get(index) {
            Some(&region) => {
                self.region = Some(region);
                self.panels.close();
                true
            }
            None => false,
        }
    }

    pub(crate) fn choose_region_at_cursor(&mut self) -> bool {
        self.choose_region(self.region_cursor.index())
    }

    pub(crate) fn clear_region(&mut self) -> bool {
        self.region.take().is_some()
    }

    pub(crate) fn guest_up(&mut self) -> bool {
        let row = self.guest_row.previous();
        std::mem::replace(&mut self.guest_row, row) != row
    }

    pub(crate) fn guest_down(&mut self) -> bool {
        let row = self.guest_row.next();
        std::mem::replace(&mut self.guest_row, row) != row
    }

    pub(crate) fn add_guest(&mut self, kind: GuestKind) -> bool {
        self.guest_row = kind;
        self.guests.increment(kind);
        true
    }

    pub(crate) fn remove_guest(&mut self, kind: GuestKind) -> bool {
        self.guest_row = kind;
        self.guests.decrement(kind)
    }

    /// Maps a pointer press to the search bar element under it.
    ///
    /// A press outside the open panel closes it and yields
    /// [`SearchTarget::Dismissed`].
    pub(crate) fn target_at(&mut self, pos: Position) -> Option<SearchTarget> {
        if let Pointer::Dismissed(panel) = self.panels.pointer_down(pos) {
            log::debug!("Closed {panel:?} panel on outside click");
            return Some(SearchTarget::Dismissed);
        }
        self.hits.at(pos)
    }

    /// Applies a clicked element other than [`SearchTarget::Submit`]
    pub(crate) fn apply(&mut self, target: SearchTarget) -> bool {
        match target {
            SearchTarget::Toggle(panel) => {
                self.toggle(panel);
                true
            }
            SearchTarget::Picker(PickerTarget::PreviousMonth) => self.previous_month(),
            SearchTarget::Picker(PickerTarget::NextMonth) => self.next_month(),
            SearchTarget::Picker(PickerTarget::Day(date)) => self.pick_date(date).is_ok(),
            SearchTarget::Region(index) => self.choose_region(index),
            SearchTarget::AddGuest(kind) => self.add_guest(kind),
            SearchTarget::RemoveGuest(kind) => self.remove_guest(kind),
            SearchTarget::Dismissed => true,
            SearchTarget::Submit => false,
        }
    }

    /// Builds the payload handed to a [`SearchHandler`], or reports why the
    /// search cannot run yet
    pub(crate) fn submit(
        &self,
        language: &'static Language,
        currency: &'static Currency,
        timestamp: OffsetDateTime,
    ) -> Result<SearchPayload, SearchError> {
        let location = self.region.ok_or(SearchError::NoRegion)?;
        let Selection::Range {
            check_in,
            check_out,
        } = self.selection
        else {
            return Err(SearchError::NoDates);
        };
        Ok(SearchPayload {
            location,
            dates: StayDates {
                check_in,
                check_out,
            },
            guests: self.guests,
            language,
            currency,
            timestamp,
        })
    }
}

time::serde::format_description!(ymd, Date, "[year]-[month]-[day]");

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StayDates {
    #[serde(with = "ymd")]
    pub(crate) check_in: Date,
    #[serde(with = "ymd")]
    pub(crate) check_out: Date,
}

/// Everything a hotel search needs, as handed to [`SearchHandler::on_search()`]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct SearchPayload {
    pub(crate) location: &'static str,
    pub(crate) dates: StayDates,
    pub(crate) guests: GuestCounts,
    pub(crate) language: &'static Language,
    pub(crate) currency: &'static Currency,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) timestamp: OffsetDateTime,
}

impl SearchPayload {
    pub(crate) fn describe(&self) -> String {
        format!(
            "Searching for hotels in {} from {} to {}",
            self.location, self.dates.check_in, self.dates.check_out
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum SearchError {
    #[error("Please select a region.")]
    NoRegion,
    #[error("Please select a check-in and check-out date.")]
    NoDates,
}

pub(crate) trait SearchHandler {
    fn on_search(&mut self, payload: &SearchPayload);
}

/// Search stand-in that records the payload in the log
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct LogSearch;

impl SearchHandler for LogSearch {
    fn on_search(&mut self, payload: &SearchPayload) {
        match serde_json::to_string(payload) {
            Ok(json) => log::info!("Search payload: {json}"),
            Err(e) => log::warn!("Could not serialize search payload: {e}"),
        }
    }
}
