use crate::theme::{BASE_STYLE, BRAND_STYLE, MUTED_STYLE, TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, StatefulWidget, Widget, Wrap},
};
use std::time::Duration;

pub(crate) const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Slide {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
}

pub(crate) static SLIDES: [Slide; 6] = [
    Slide {
        title: "Addis Ababa",
        description: "Addis Ababa, the capital city of Ethiopia, most beautiful city.",
    },
    Slide {
        title: "Haramaya",
        description: "One of the busy cities in Ethiopia, full of natural wonders.",
    },
    Slide {
        title: "Bahir Dar",
        description: "Nature and beauty city of Ethiopia, with amazing destinations.",
    },
    Slide {
        title: "Arba Minch",
        description: "The land of Peace and Wisdom, in the Southern Region.",
    },
    Slide {
        title: "Wolayta",
        description: "The land of Peace and Wisdom, in the Southern Region.",
    },
    Slide {
        title: "Jinka",
        description: "The land of Peace and Wisdom, in the Southern Region.",
    },
];

/// Auto-advancing slideshow of destinations shown on the home page
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Carousel {
    index: usize,
    interval: Duration,
    elapsed: Duration,
    hits: Vec<(Rect, HeroTarget)>,
}

/// Clickable parts of the hero banner
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum HeroTarget {
    Previous,
    Next,
    Slide(usize),
}

impl Carousel {
    pub(crate) fn new(interval: Duration) -> Carousel {
        Carousel {
            index: 0,
            interval,
            elapsed: Duration::ZERO,
            hits: Vec::new(),
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn current(&self) -> &'static Slide {
        // `index` is always kept below `SLIDES.len()`
        SLIDES.get(self.index).unwrap_or(&SLIDES[0])
    }

    pub(crate) fn next(&mut self) {
        self.index = (self.index + 1) % SLIDES.len();
        self.elapsed = Duration::ZERO;
    }

    pub(crate) fn previous(&mut self) {
        self.index = self.index.checked_sub(1).unwrap_or(SLIDES.len() - 1);
        self.elapsed = Duration::ZERO;
    }

    /// Shows slide `index`.  Returns `false` if there is no such slide.
    pub(crate) fn go_to(&mut self, index: usize) -> bool {
        if index < SLIDES.len() {
            self.index = index;
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Records the passage of time, advancing once the interval has
    /// elapsed.  Returns `true` if the slide changed.
    pub(crate) fn tick(&mut self, elapsed: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.elapsed >= self.interval {
            self.next();
            true
        } else {
            false
        }
    }

    /// How long until the next automatic advance
    pub(crate) fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    pub(crate) fn target_at(&self, pos: Position) -> Option<HeroTarget> {
        self.hits
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|&(_, target)| target)
    }

    pub(crate) fn apply(&mut self, target: HeroTarget) -> bool {
        match target {
            HeroTarget::Previous => {
                self.previous();
                true
            }
            HeroTarget::Next => {
                self.next();
                true
            }
            HeroTarget::Slide(i) => self.go_to(i),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Hero;

impl StatefulWidget for Hero {
    type State = Carousel;

    /*
     * ┌───────────────────── Addis Ababa ─────────────────────┐
     * │                                                       │
     * │ Addis Ababa, the capital city of Ethiopia, most …     │
     * │                                                       │
     * │ ‹                  ●  ○  ○  ○  ○  ○                 › │
     * └───────────────────────────────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer, carousel: &mut Carousel) {
        carousel.hits.clear();
        let slide = carousel.current();
        let block = Block::bordered()
            .title(Line::styled(format!(" {} ", slide.title), BRAND_STYLE).centered())
            .style(BASE_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width < 4 {
            return;
        }
        let text = Text::from_iter([Line::raw(""), Line::styled(slide.description, TITLE_STYLE)]);
        Paragraph::new(text)
            .centered()
            .wrap(Wrap { trim: true })
            .render(inner, buf);

        let y = inner.bottom() - 1;
        let cell = |x| Rect {
            x,
            y,
            width: 1,
            height: 1,
        };
        buf.set_string(inner.x, y, "‹", TITLE_STYLE);
        carousel.hits.push((cell(inner.x), HeroTarget::Previous));
        buf.set_string(inner.right() - 1, y, "›", TITLE_STYLE);
        carousel.hits.push((cell(inner.right() - 1), HeroTarget::Next));
        let dots_width = u16::try_from(SLIDES.len() * 3).unwrap_or(u16::MAX);
        let mut x = inner.x + inner.width.saturating_sub(dots_width) / 2;
        for i in 0..SLIDES.len() {
            let (dot, style) = if i == carousel.index {
                ("●", BRAND_STYLE)
            } else {
                ("○", MUTED_STYLE)
            };
            if x + 3 > inner.right() {
                break;
            }
            let dot_area = Rect {
                x,
                y,
                width: 3,
                height: 1,
            };
            Span::styled(format!(" {dot} "), style).render(dot_area, buf);
            carousel.hits.push((dot_area, HeroTarget::Slide(i)));
            x += 3;
        }
    }
}
