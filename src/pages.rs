use crate::theme::{BASE_STYLE, BRAND_STYLE, BUTTON_STYLE, MUTED_STYLE, TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget, Wrap},
};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Page {
    #[default]
    Home,
    About,
    Contact,
}

impl Page {
    pub(crate) const ALL: [Page; 3] = [Page::Home, Page::About, Page::Contact];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Contact => "Contact",
        }
    }

    pub(crate) fn next(self) -> Page {
        match self {
            Page::Home => Page::About,
            Page::About => Page::Contact,
            Page::Contact => Page::Home,
        }
    }

    pub(crate) fn previous(self) -> Page {
        match self {
            Page::Home => Page::Contact,
            Page::About => Page::Home,
            Page::Contact => Page::About,
        }
    }

    fn content(self) -> Text<'static> {
        match self {
            Page::Home => home(),
            Page::About => about(),
            Page::Contact => contact(),
        }
    }
}

fn heading(s: &'static str) -> Line<'static> {
    Line::styled(s, BRAND_STYLE)
}

fn bullet(s: &'static str) -> Line<'static> {
    Line::from_iter([Span::styled("  • ", BRAND_STYLE), Span::raw(s)])
}

static FEATURED: [(&str, &str); 3] = [
    ("Sample Hotel 1", "Addis Ababa"),
    ("Sample Hotel 2", "Bahir Dar"),
    ("Sample Hotel 3", "Hawassa"),
];

fn home() -> Text<'static> {
    let mut lines = vec![
        Line::styled("Welcome to GuzoMate", TITLE_STYLE).centered(),
        Line::raw(
            "Discover and book the best hotels across Ethiopia. Your perfect stay awaits.",
        )
        .centered(),
        Line::raw(""),
        heading("Featured Hotels"),
    ];
    for (name, city) in FEATURED {
        lines.push(Line::from_iter([
            Span::styled(format!("  {name}"), TITLE_STYLE),
            Span::styled(format!(" · {city}"), MUTED_STYLE),
        ]));
        lines.push(Line::from_iter([
            Span::raw("    Beautiful hotel in the heart of Ethiopia  "),
            Span::styled("$99/night", BRAND_STYLE),
        ]));
    }
    Text::from(lines)
}

fn about() -> Text<'static> {
    Text::from(vec![
        Line::styled("About GuzoMate", TITLE_STYLE).centered(),
        Line::raw("Your trusted partner for discovering Ethiopia's finest accommodations")
            .centered(),
        Line::raw(""),
        heading("Our Mission"),
        Line::raw(concat!(
            "GuzoMate is dedicated to connecting travelers with exceptional hotel ",
            "experiences across Ethiopia. We believe that finding the perfect ",
            "accommodation should be simple, transparent, and tailored to your unique ",
            "needs."
        )),
        Line::raw(""),
        heading("What We Offer"),
        bullet("Curated selection of quality hotels"),
        bullet("Authentic guest reviews and ratings"),
        bullet("Competitive pricing and deals"),
        bullet("24/7 customer support"),
        Line::raw(""),
        heading("Why Choose Us"),
        bullet("Local expertise and knowledge"),
        bullet("Secure and easy booking process"),
        bullet("No hidden fees or charges"),
        bullet("Flexible cancellation policies"),
        Line::raw(""),
        Line::styled("Ready to Start Your Journey?", TITLE_STYLE).centered(),
        Line::raw("Discover amazing hotels and create unforgettable memories in Ethiopia")
            .centered(),
        Line::styled("Press 1 to start exploring", BUTTON_STYLE).centered(),
    ])
}

fn contact() -> Text<'static> {
    Text::from(vec![
        Line::styled("Contact Us", TITLE_STYLE).centered(),
        Line::raw("We are here to help you plan your stay.").centered(),
        Line::raw(""),
        heading("Support"),
        bullet("Email: support@guzomate.com"),
        bullet("Phone: +251 11 123 4567"),
        bullet("Address: Bole Road, Addis Ababa"),
        Line::raw(""),
        heading("Head Office"),
        bullet("Phone: +251 922 978 877"),
        bullet("Email: GuzoMate@gmail.com"),
        bullet("Addis Ababa, Ethiopia"),
        Line::raw(""),
        heading("Help"),
        bullet("Help Center"),
        bullet("Privacy Policy"),
        bullet("Terms of Service"),
        bullet("Cancellation Policy"),
    ])
}

/// Body text of a page, scrolled down by `scroll` lines
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PageView {
    pub(crate) page: Page,
    pub(crate) scroll: u16,
}

impl PageView {
    /// Number of lines of content on `page` before wrapping
    pub(crate) fn length(page: Page) -> u16 {
        u16::try_from(page.content().height()).unwrap_or(u16::MAX)
    }
}

impl Widget for PageView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.page.content())
            .style(BASE_STYLE)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Footer;

impl Footer {
    pub(crate) const HEIGHT: u16 = 2;
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::styled(
                "+251 922 978 877 · GuzoMate@gmail.com · Addis Ababa, Ethiopia",
                MUTED_STYLE,
            )
            .centered(),
            Line::styled(
                "Copyright © 2025 GuzoMate™. All rights reserved",
                MUTED_STYLE,
            )
            .centered(),
        ]);
        Paragraph::new(text).style(BASE_STYLE).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(buffer: &Buffer) -> Vec<String> {
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_page_cycle() {
        for page in Page::ALL {
            assert_eq!(page.next().previous(), page);
        }
        assert_eq!(Page::Contact.next(), Page::Home);
        assert_eq!(Page::default(), Page::Home);
    }

    #[test]
    fn test_about_page() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        PageView {
            page: Page::About,
            scroll: 0,
        }
        .render(area, &mut buffer);
        let lines = lines(&buffer);
        assert_eq!(lines[0].trim(), "About GuzoMate");
        assert_eq!(lines[3].trim_end(), "Our Mission");
        assert!(
            lines.iter().any(|l| l.contains("• Curated selection of quality hotels")),
            "{lines:?}"
        );
    }

    #[test]
    fn test_scroll() {
        let area = Rect::new(0, 0, 80, 4);
        let mut buffer = Buffer::empty(area);
        PageView {
            page: Page::Contact,
            scroll: 3,
        }
        .render(area, &mut buffer);
        let lines = lines(&buffer);
        assert_eq!(lines[0].trim_end(), "Support");
        assert!(lines[1].contains("support@guzomate.com"), "{lines:?}");
        assert!(PageView::length(Page::Contact) > 4);
    }

    #[test]
    fn test_footer() {
        let area = Rect::new(0, 0, 80, Footer::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Footer.render(area, &mut buffer);
        let lines = lines(&buffer);
        assert_eq!(
            lines[1].trim(),
            "Copyright © 2025 GuzoMate™. All rights reserved"
        );
    }
}
