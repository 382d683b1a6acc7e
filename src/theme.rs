use ratatui::style::{Color, Modifier, Style};

pub(crate) const GOLD: Color = Color::Rgb(0xA3, 0x72, 0x38);

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const BRAND_STYLE: Style = Style::new()
    .fg(GOLD)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const MUTED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const ACTIVE_TAB_STYLE: Style = BRAND_STYLE.add_modifier(Modifier::UNDERLINED);

pub(crate) const FOCUS_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

pub(crate) const BUTTON_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(GOLD)
    .add_modifier(Modifier::BOLD);

pub(crate) const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::LightGreen);

pub(crate) mod calendar {
    use super::*;

    pub(crate) const PAST_DAY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const ENDPOINT_STYLE: Style = Style::new()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD);

    pub(crate) const IN_RANGE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightBlue);

    pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);
}

pub(crate) mod menu {
    use super::*;

    pub(crate) const CHOSEN_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

    pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::Gray);
}

pub(crate) mod form {
    use super::*;

    pub(crate) const INPUT_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

    pub(crate) const PLACEHOLDER_STYLE: Style = INPUT_STYLE.fg(Color::DarkGray);

    pub(crate) const LINK_STYLE: Style = BRAND_STYLE.add_modifier(Modifier::UNDERLINED);
}
