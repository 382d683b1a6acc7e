use crate::auth::{AuthForm, AuthModal, AuthService, FormKind, Outcome};
use crate::help::Help;
use crate::hero::{Carousel, Hero};
use crate::locale::{HeaderMenu, LocaleMenus, MenuPopover};
use crate::pages::{Footer, Page, PageView};
use crate::search::{SearchBar, SearchForm, SearchHandler, SearchPanel, SearchTarget};
use crate::theme::{
    ACTIVE_TAB_STYLE, BASE_STYLE, BRAND_STYLE, BUTTON_STYLE, ERROR_STYLE, MUTED_STYLE,
    STATUS_STYLE,
};
use crossterm::event::{
    poll, read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    text::Span,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use time::OffsetDateTime;

const HERO_HEIGHT: u16 = 6;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<S, A> {
    page: Page,
    scroll: u16,
    carousel: Carousel,
    search: SearchForm,
    locale: LocaleMenus,
    modal: Option<AuthForm>,
    status: Option<Status>,
    header: Vec<(Rect, HeaderTarget)>,
    searcher: S,
    auth: A,
    state: AppState,
}

impl<S: SearchHandler, A: AuthService> App<S, A> {
    pub(crate) fn new(
        search: SearchForm,
        locale: LocaleMenus,
        carousel: Carousel,
        searcher: S,
        auth: A,
    ) -> App<S, A> {
        App {
            page: Page::Home,
            scroll: 0,
            carousel,
            search,
            locale,
            modal: None,
            status: None,
            header: Vec::new(),
            searcher,
            auth,
            state: AppState::Browsing,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        let mut last_tick = Instant::now();
        while !self.quitting() {
            self.draw(&mut terminal)?;
            let timeout = (self.page == Page::Home).then(|| self.carousel.until_next());
            let event = next_event(timeout)?;
            let now = Instant::now();
            self.step(event, now.duration_since(last_tick))?;
            last_tick = now;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    /// Lets `elapsed` pass on the carousel and then applies `event`, so that
    /// a slide change made by the event restarts the timer
    fn step(&mut self, event: Option<Event>, elapsed: Duration) -> io::Result<()> {
        self.tick(elapsed);
        match event {
            Some(event) => self.handle_event(event),
            None => Ok(()),
        }
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            self.handle_click(Position::new(column, row));
        }
        // else: Redraw on resize
        Ok(())
    }

    fn tick(&mut self, elapsed: Duration) {
        if self.page == Page::Home && self.carousel.tick(elapsed) {
            log::trace!("Carousel advanced to slide {}", self.carousel.index());
        }
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Helping => {
                self.state = AppState::Browsing;
                true
            }
            AppState::Quitting => false,
            AppState::Browsing if self.modal.is_some() => self.modal_key(key),
            AppState::Browsing if self.locale.open_menu().is_some() => self.menu_key(key),
            AppState::Browsing => match self.search.open_panel() {
                Some(SearchPanel::Region) => self.region_key(key),
                Some(SearchPanel::Calendar) => self.calendar_key(key),
                Some(SearchPanel::Guests) => self.guests_key(key),
                None => self.browse_key(key),
            },
        }
    }

    fn browse_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('1') => self.show_page(Page::Home),
            KeyCode::Char('2') => self.show_page(Page::About),
            KeyCode::Char('3') => self.show_page(Page::Contact),
            KeyCode::Tab => self.show_page(self.page.next()),
            KeyCode::BackTab => self.show_page(self.page.previous()),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::Left if self.page == Page::Home => {
                self.carousel.previous();
                true
            }
            KeyCode::Right if self.page == Page::Home => {
                self.carousel.next();
                true
            }
            KeyCode::Char('r') => self.open_panel(SearchPanel::Region),
            KeyCode::Char('d') => self.open_panel(SearchPanel::Calendar),
            KeyCode::Char('g') => self.open_panel(SearchPanel::Guests),
            KeyCode::Char('s') | KeyCode::Enter => self.search(),
            KeyCode::Char('l') => self.open_menu(HeaderMenu::Language),
            KeyCode::Char('c') => self.open_menu(HeaderMenu::Currency),
            KeyCode::Char('i') => self.open_modal(FormKind::Login),
            KeyCode::Char('u') => self.open_modal(FormKind::Register),
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Quitting;
                true
            }
            _ => false,
        }
    }

    fn region_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Up => self.search.region_up(),
            KeyCode::Down => self.search.region_down(),
            KeyCode::Enter => self.search.choose_region_at_cursor(),
            KeyCode::Backspace | KeyCode::Delete => self.search.clear_region(),
            KeyCode::Char('r') | KeyCode::Esc => self.search.close_panel(),
            _ => false,
        }
    }

    fn calendar_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Left => self.search.move_cursor(-1),
            KeyCode::Right => self.search.move_cursor(1),
            KeyCode::Up => self.search.move_cursor(-7),
            KeyCode::Down => self.search.move_cursor(7),
            KeyCode::Char('<') | KeyCode::PageUp => self.search.previous_month(),
            KeyCode::Char('>') | KeyCode::PageDown => self.search.next_month(),
            KeyCode::Char(' ') | KeyCode::Enter => self.search.pick_cursor(),
            KeyCode::Char('d') | KeyCode::Esc => self.search.close_panel(),
            _ => false,
        }
    }

    fn guests_key(&mut self, key: KeyCode) -> bool {
        let row = self.search.guest_row();
        match key {
            KeyCode::Up => self.search.guest_up(),
            KeyCode::Down => self.search.guest_down(),
            KeyCode::Char('+') | KeyCode::Right => self.search.add_guest(row),
            KeyCode::Char('-') | KeyCode::Left => self.search.remove_guest(row),
            KeyCode::Char('g') | KeyCode::Enter | KeyCode::Esc => self.search.close_panel(),
            _ => false,
        }
    }

    fn menu_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Up => self.locale.up(),
            KeyCode::Down => self.locale.down(),
            KeyCode::Enter => self.locale.choose_at_cursor(),
            KeyCode::Char('l' | 'c') | KeyCode::Esc => self.locale.close(),
            _ => false,
        }
    }

    fn modal_key(&mut self, key: KeyCode) -> bool {
        let Some(form) = self.modal.as_mut() else {
            return false;
        };
        let outcome = match key {
            KeyCode::Esc => Outcome::Dismissed,
            KeyCode::Tab | KeyCode::Down => {
                form.focus_next();
                Outcome::Stay(true)
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus_previous();
                Outcome::Stay(true)
            }
            KeyCode::Enter => form.activate(&mut self.auth),
            KeyCode::Backspace => Outcome::Stay(form.backspace()),
            KeyCode::Char(ch) => Outcome::Stay(form.type_char(ch)),
            _ => Outcome::Stay(false),
        };
        self.finish_modal(outcome)
    }

    fn finish_modal(&mut self, outcome: Outcome) -> bool {
        let Some(kind) = self.modal.as_ref().map(AuthForm::kind) else {
            return false;
        };
        match outcome {
            Outcome::Stay(r) => r,
            Outcome::Completed => {
                self.modal = None;
                let msg = match kind {
                    FormKind::Login => "Signed in",
                    FormKind::Register => "Account created",
                };
                self.status = Some(Status::Info(msg.to_owned()));
                true
            }
            Outcome::Switch => self.open_modal(kind.other()),
            Outcome::Dismissed => {
                self.modal = None;
                true
            }
        }
    }

    fn handle_click(&mut self, pos: Position) {
        if let Some(form) = self.modal.as_mut() {
            let outcome = form.pointer_down(pos, &mut self.auth);
            self.finish_modal(outcome);
            return;
        }
        if self.state == AppState::Helping {
            self.state = AppState::Browsing;
            return;
        }
        if self.locale.pointer_down(pos).is_some() {
            return;
        }
        match self.search.target_at(pos) {
            Some(SearchTarget::Submit) => {
                self.search();
                return;
            }
            Some(target) => {
                self.search.apply(target);
                return;
            }
            None => (),
        }
        if self.page == Page::Home {
            if let Some(target) = self.carousel.target_at(pos) {
                self.carousel.apply(target);
                return;
            }
        }
        let target = self
            .header
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|&(_, t)| t);
        match target {
            Some(HeaderTarget::Page(page)) => {
                self.show_page(page);
            }
            Some(HeaderTarget::Menu(menu)) => {
                self.open_menu(menu);
            }
            Some(HeaderTarget::Auth(kind)) => {
                self.open_modal(kind);
            }
            None => (),
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn show_page(&mut self, page: Page) -> bool {
        self.page = page;
        self.scroll = 0;
        true
    }

    fn scroll_down(&mut self) -> bool {
        if self.scroll + 1 < PageView::length(self.page) {
            self.scroll += 1;
            true
        } else {
            false
        }
    }

    fn scroll_up(&mut self) -> bool {
        match self.scroll.checked_sub(1) {
            Some(s) => {
                self.scroll = s;
                true
            }
            None => false,
        }
    }

    fn open_panel(&mut self, panel: SearchPanel) -> bool {
        self.locale.close();
        self.search.toggle(panel);
        true
    }

    fn open_menu(&mut self, menu: HeaderMenu) -> bool {
        self.search.close_panel();
        self.locale.toggle(menu);
        true
    }

    fn open_modal(&mut self, kind: FormKind) -> bool {
        self.search.close_panel();
        self.locale.close();
        self.modal = Some(AuthForm::new(kind));
        true
    }

    fn search(&mut self) -> bool {
        let r = self.search.submit(
            self.locale.language(),
            self.locale.currency(),
            OffsetDateTime::now_utc(),
        );
        match r {
            Ok(payload) => {
                self.searcher.on_search(&payload);
                self.status = Some(Status::Info(payload.describe()));
                self.search.close_panel();
                true
            }
            Err(e) => {
                log::debug!("Search not run: {e}");
                self.status = Some(Status::Error(e.to_string()));
                false
            }
        }
    }

    fn render_header(&mut self, area: Rect, buf: &mut Buffer) {
        self.header.clear();
        let mut x = area.x + 1;
        let brand = Span::styled("GuzoMate", BRAND_STYLE);
        x += place(brand, x, area, buf).width + 3;
        for page in Page::ALL {
            let style = if page == self.page {
                ACTIVE_TAB_STYLE
            } else {
                BASE_STYLE
            };
            let span = Span::styled(format!(" {} ", page.title()), style);
            let rect = place(span, x, area, buf);
            self.header.push((rect, HeaderTarget::Page(page)));
            x += rect.width + 1;
        }

        let language = format!(" {} ▾ ", self.locale.language().code.to_uppercase());
        let currency = format!(
            " {} {} ▾ ",
            self.locale.currency().symbol,
            self.locale.currency().code
        );
        let right_items = [
            (
                Span::styled(" Sign Up ", BUTTON_STYLE),
                HeaderTarget::Auth(FormKind::Register),
            ),
            (
                Span::styled(" Sign In ", BASE_STYLE),
                HeaderTarget::Auth(FormKind::Login),
            ),
            (
                Span::styled(currency, BASE_STYLE),
                HeaderTarget::Menu(HeaderMenu::Currency),
            ),
            (
                Span::styled(language, BASE_STYLE),
                HeaderTarget::Menu(HeaderMenu::Language),
            ),
        ];
        let mut right = area.right().saturating_sub(1);
        for (span, target) in right_items {
            let width = u16::try_from(span.width()).unwrap_or(u16::MAX);
            right = right.saturating_sub(width);
            let rect = place(span, right.max(x), area, buf);
            self.header.push((rect, target));
            right = right.saturating_sub(1);
        }
    }

    fn menu_anchor(&self) -> Rect {
        self.locale
            .open_menu()
            .and_then(|menu| {
                self.header
                    .iter()
                    .find(|&&(_, t)| t == HeaderTarget::Menu(menu))
                    .map(|&(rect, _)| rect)
            })
            .unwrap_or_default()
    }
}

/// Waits for the next terminal event, giving up after `timeout` if one is
/// given
fn next_event(timeout: Option<Duration>) -> io::Result<Option<Event>> {
    if let Some(timeout) = timeout {
        if !poll(timeout)? {
            return Ok(None);
        }
    }
    read().map(Some)
}

/// Draws `span` on row `area.y` starting at column `x` and returns the area
/// it took up
fn place(span: Span<'_>, x: u16, area: Rect, buf: &mut Buffer) -> Rect {
    let rect = Rect {
        x,
        y: area.y,
        width: u16::try_from(span.width()).unwrap_or(u16::MAX),
        height: 1,
    }
    .intersection(area);
    span.render(rect, buf);
    rect
}

impl<S: SearchHandler, A: AuthService> Widget for &mut App<S, A> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [header_area, bar_area, body_area, status_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(SearchBar::HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(Footer::HEIGHT),
        ])
        .areas(area);
        self.render_header(header_area, buf);

        let page_area = if self.page == Page::Home {
            let [hero_area, page_area] =
                Layout::vertical([Constraint::Length(HERO_HEIGHT), Constraint::Fill(1)])
                    .areas(body_area);
            Hero.render(hero_area, buf, &mut self.carousel);
            page_area
        } else {
            body_area
        };
        PageView {
            page: self.page,
            scroll: self.scroll,
        }
        .render(page_area, buf);

        let status = match &self.status {
            Some(Status::Info(msg)) => Span::styled(format!(" {msg}"), STATUS_STYLE),
            Some(Status::Error(msg)) => Span::styled(format!(" {msg}"), ERROR_STYLE),
            None => Span::styled(" Press ? for help", MUTED_STYLE),
        };
        status.render(status_area, buf);
        Footer.render(footer_area, buf);

        // Popups are drawn last so that they cover the page
        let search_area = Rect {
            height: area.bottom().saturating_sub(bar_area.y),
            ..bar_area
        };
        SearchBar.render(search_area, buf, &mut self.search);
        let anchor = self.menu_anchor();
        MenuPopover { anchor }.render(area, buf, &mut self.locale);
        if let Some(form) = self.modal.as_mut() {
            AuthModal.render(area, buf, form);
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum HeaderTarget {
    Page(Page),
    Menu(HeaderMenu),
    Auth(FormKind),
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Status {
    Info(String),
    Error(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Browsing,
    Helping,
    Quitting,
}
