use crate::dropdown::{Coordinator, ListCursor, Pointer};
use crate::theme::{
    menu::{CHOSEN_STYLE, HINT_STYLE},
    BASE_STYLE, FOCUS_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{HorizontalAlignment, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub(crate) struct Language {
    pub(crate) code: &'static str,
    pub(crate) name: &'static str,
}

pub(crate) static LANGUAGES: [Language; 6] = [
    Language {
        code: "en",
        name: "English",
    },
    Language {
        code: "am",
        name: "Amharic",
    },
    Language {
        code: "ar",
        name: "Arabic",
    },
    Language {
        code: "fr",
        name: "French",
    },
    Language {
        code: "es",
        name: "Spanish",
    },
    Language {
        code: "zh",
        name: "Mandarin",
    },
];

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub(crate) struct Currency {
    pub(crate) code: &'static str,
    pub(crate) symbol: &'static str,
    pub(crate) name: &'static str,
}

pub(crate) static CURRENCIES: [Currency; 5] = [
    Currency {
        code: "USD",
        symbol: "$",
        name: "US Dollar",
    },
    Currency {
        code: "ETB",
        symbol: "Br",
        name: "Ethiopian Birr",
    },
    Currency {
        code: "GBP",
        symbol: "£",
        name: "British Pound",
    },
    Currency {
        code: "EUR",
        symbol: "€",
        name: "Euro",
    },
    Currency {
        code: "AED",
        symbol: "د.إ",
        name: "UAE Dirham",
    },
];

pub(crate) fn find_language(code: &str) -> Result<&'static Language, UnknownCodeError> {
    LANGUAGES
        .iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| UnknownCodeError::Language(code.to_owned()))
}

pub(crate) fn find_currency(code: &str) -> Result<&'static Currency, UnknownCodeError> {
    CURRENCIES
        .iter()
        .find(|cur| cur.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| UnknownCodeError::Currency(code.to_owned()))
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum UnknownCodeError {
    #[error("unknown language code {0:?}")]
    Language(String),
    #[error("unknown currency code {0:?}")]
    Currency(String),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum HeaderMenu {
    Language,
    Currency,
}

impl HeaderMenu {
    fn len(self) -> usize {
        match self {
            HeaderMenu::Language => LANGUAGES.len(),
            HeaderMenu::Currency => CURRENCIES.len(),
        }
    }
}

/// The visitor's language and currency choices and the header popovers used
/// to change them
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LocaleMenus {
    language: &'static Language,
    currency: &'static Currency,
    menus: Coordinator<HeaderMenu>,
    cursor: ListCursor,
    hits: Vec<(Rect, usize)>,
    /// Header label of the open menu, as last drawn
    anchor: Rect,
}

impl LocaleMenus {
    pub(crate) fn new(language: &'static Language, currency: &'static Currency) -> LocaleMenus {
        LocaleMenus {
            language,
            currency,
            menus: Coordinator::new(),
            cursor: ListCursor::default(),
            hits: Vec::new(),
            anchor: Rect::default(),
        }
    }

    pub(crate) fn language(&self) -> &'static Language {
        self.language
    }

    pub(crate) fn currency(&self) -> &'static Currency {
        self.currency
    }

    pub(crate) fn open_menu(&self) -> Option<HeaderMenu> {
        self.menus.current()
    }

    pub(crate) fn toggle(&mut self, menu: HeaderMenu) {
        if !self.menus.is_open(menu) {
            let index = match menu {
                HeaderMenu::Language => LANGUAGES.iter().position(|l| l == self.language),
                HeaderMenu::Currency => CURRENCIES.iter().position(|c| c == self.currency),
            };
            self.cursor = ListCursor::new(menu.len()).at(index.unwrap_or(0));
        }
        self.menus.toggle(menu);
    }

    pub(crate) fn close(&mut self) -> bool {
        self.menus.close().is_some()
    }

    pub(crate) fn up(&mut self) -> bool {
        self.cursor.up()
    }

    pub(crate) fn down(&mut self) -> bool {
        self.cursor.down()
    }

    /// Selects entry `index` of the open menu and closes it
    pub(crate) fn choose(&mut self, index: usize) -> bool {
        match self.menus.current() {
            Some(HeaderMenu::Language) => match LANGUAGES.get(index) {
                Some(lang) => {
                    log::info!("Language changed to {}", lang.name);
                    self.language = lang;
                }
                None => return false,
            },
            Some(HeaderMenu::Currency) => match CURRENCIES.get(index) {
                Some(cur) => {
                    log::info!("Currency changed to {}", cur.code);
                    self.currency = cur;
                }
                None => return false,
            },
            None => return false,
        }
        self.menus.close();
        true
    }

    pub(crate) fn choose_at_cursor(&mut self) -> bool {
        self.choose(self.cursor.index())
    }

    /// Handles a pointer press.  Returns `None` if the press did not concern
    /// the open menu.  A press on the menu's own header label closes it.
    pub(crate) fn pointer_down(&mut self, pos: Position) -> Option<bool> {
        match self.menus.pointer_down(pos) {
            Pointer::Dismissed(_) => Some(true),
            Pointer::Inside if self.anchor.contains(pos) => Some(self.close()),
            Pointer::Inside => {
                let index = self
                    .hits
                    .iter()
                    .find(|(area, _)| area.contains(pos))
                    .map(|&(_, i)| i);
                Some(index.is_some_and(|i| self.choose(i)))
            }
            Pointer::Ignored => None,
        }
    }
}

/// Popover listing the entries of the open header menu, drawn below
/// `anchor` (the header label that opened it)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MenuPopover {
    pub(crate) anchor: Rect,
}

const POPOVER_WIDTH: u16 = 30;

impl StatefulWidget for MenuPopover {
    type State = LocaleMenus;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut LocaleMenus) {
        state.hits.clear();
        state.anchor = self.anchor;
        let Some(menu) = state.menus.current() else {
            state.menus.register([]);
            return;
        };
        let rows: Vec<(Line<'static>, bool)> = match menu {
            HeaderMenu::Language => LANGUAGES
                .iter()
                .map(|lang| {
                    (
                        Line::from_iter([
                            Span::raw(format!(" {:<4}", lang.code)),
                            Span::raw(lang.name),
                        ]),
                        lang == state.language,
                    )
                })
                .collect(),
            HeaderMenu::Currency => CURRENCIES
                .iter()
                .map(|cur| {
                    (
                        Line::from_iter([
                            Span::raw(format!(" {:<4}{:<5}", cur.symbol, cur.code)),
                            Span::styled(cur.name, HINT_STYLE),
                        ]),
                        cur == state.currency,
                    )
                })
                .collect(),
        };
        let height = u16::try_from(rows.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let x = self
            .anchor
            .right()
            .saturating_sub(POPOVER_WIDTH)
            .max(area.x);
        let popup = Rect {
            x,
            y: self.anchor.bottom(),
            width: POPOVER_WIDTH,
            height,
        }
        .intersection(area);
        Clear.render(popup, buf);
        let title = match menu {
            HeaderMenu::Language => " Language ",
            HeaderMenu::Currency => " Currency ",
        };
        let block = Block::bordered()
            .title(title)
            .title_alignment(HorizontalAlignment::Center)
            .style(BASE_STYLE);
        let inner = block.inner(popup);
        block.render(popup, buf);
        let rows = rows.into_iter().enumerate();
        for (y, (i, (line, chosen))) in std::iter::zip(inner.y..inner.bottom(), rows) {
            let row = Rect {
                y,
                height: 1,
                ..inner
            };
            let mut style = if chosen { CHOSEN_STYLE } else { BASE_STYLE };
            if state.cursor.index() == i {
                style = style.patch(FOCUS_STYLE);
            }
            buf.set_style(row, style);
            line.render(row, buf);
            if chosen {
                buf.set_string(row.right().saturating_sub(2), y, "✓", style);
            }
            state.hits.push((row, i));
        }
        state.menus.register([self.anchor, popup]);
    }
}
