use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "1, 2, 3         Home, About, Contact page",
    "TAB, S-TAB      Next, previous page",
    "UP, DOWN        Scroll the page",
    "LEFT, RIGHT     Previous, next slide (Home)",
    "r               Choose a region",
    "d               Choose check-in and check-out dates",
    "g               Choose guests and rooms",
    "ENTER, s        Search",
    "l, c            Language, currency menu",
    "i, u            Sign in, create account",
    "?               Show this help",
    "q, ESC, C-c     Quit",
    "",
    "In an open panel or menu:",
    "  arrow keys    Move",
    "  < >, PG UP/DN Previous, next month",
    "  + -           Add, remove a guest",
    "  ENTER         Choose",
    "  ESC           Close",
    "",
    "Mouse clicks work everywhere.",
    "Press the Any Key to dismiss.",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(HorizontalAlignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BASE_STYLE;

    #[test]
    fn test_render_help() {
        let area = Rect::new(0, 0, 80, 30);
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        let lines: Vec<String> = buffer
            .content()
            .chunks(80)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect();
        assert!(lines.iter().any(|l| l.contains(" Commands ")), "{lines:?}");
        assert!(
            lines.iter().any(|l| l.contains("│ 1, 2, 3         Home, About, Contact page")),
            "{lines:?}"
        );
        assert!(
            lines.iter().any(|l| l.contains("│ q, ESC, C-c     Quit")),
            "{lines:?}"
        );
        assert!(
            lines.iter().any(|l| l.contains("Press the Any Key to dismiss.")),
            "{lines:?}"
        );
    }
}
