use ratatui::layout::{Position, Rect};

/// Screen areas that count as "inside" a popup for click-outside detection.
///
/// Areas are registered while the popup is drawn and are discarded when the
/// popup closes, so a closed popup never reacts to pointer events.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Boundary(Vec<Rect>);

impl Boundary {
    pub(crate) fn register(&mut self, area: Rect) {
        self.0.push(area);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.0.iter().any(|area| area.contains(pos))
    }

    /// Returns `true` if areas are registered and none of them contain `pos`
    pub(crate) fn is_outside(&self, pos: Position) -> bool {
        !self.0.is_empty() && !self.contains(pos)
    }
}

/// Holds which one of a group of panels is open.
///
/// Opening a panel closes whichever other panel was open.  A pointer press
/// outside the registered [`Boundary`] or a cancellation key closes the open
/// panel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Coordinator<P> {
    open: Option<P>,
    boundary: Boundary,
}

impl<P: Copy + Eq> Coordinator<P> {
    pub(crate) fn new() -> Coordinator<P> {
        Coordinator {
            open: None,
            boundary: Boundary::default(),
        }
    }

    pub(crate) fn current(&self) -> Option<P> {
        self.open
    }

    pub(crate) fn is_open(&self, panel: P) -> bool {
        self.open == Some(panel)
    }

    pub(crate) fn open(&mut self, panel: P) {
        if self.open != Some(panel) {
            self.boundary.clear();
        }
        self.open = Some(panel);
    }

    /// Opens `panel`, or closes it if it is already open
    pub(crate) fn toggle(&mut self, panel: P) {
        if self.is_open(panel) {
            self.close();
        } else {
            self.open(panel);
        }
    }

    /// Closes the open panel, if any, and returns it
    pub(crate) fn close(&mut self) -> Option<P> {
        self.boundary.clear();
        self.open.take()
    }

    /// Replaces the registered areas.  Ignored while nothing is open.
    pub(crate) fn register<I: IntoIterator<Item = Rect>>(&mut self, areas: I) {
        self.boundary.clear();
        if self.open.is_some() {
            for area in areas {
                self.boundary.register(area);
            }
        }
    }

    pub(crate) fn pointer_down(&mut self, pos: Position) -> Pointer<P> {
        match self.open {
            Some(panel) if self.boundary.is_outside(pos) => {
                self.close();
                Pointer::Dismissed(panel)
            }
            Some(_) if self.boundary.contains(pos) => Pointer::Inside,
            _ => Pointer::Ignored,
        }
    }
}

impl<P: Copy + Eq> Default for Coordinator<P> {
    fn default() -> Coordinator<P> {
        Coordinator::new()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Pointer<P> {
    /// The press landed inside the open panel's boundary
    Inside,
    /// The press landed outside the boundary and closed this panel
    Dismissed(P),
    /// Nothing was open (or nothing was registered yet)
    Ignored,
}

/// Highlighted row of a fixed-length menu
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct ListCursor {
    index: usize,
    len: usize,
}

impl ListCursor {
    pub(crate) fn new(len: usize) -> ListCursor {
        ListCursor { index: 0, len }
    }

    pub(crate) fn at(mut self, index: usize) -> ListCursor {
        if index < self.len {
            self.index = index;
        }
        self
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn up(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn down(&mut self) -> bool {
        if self.index + 1 < self.len {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Panel {
        Region,
        Calendar,
        Guests,
    }

    #[test]
    fn test_exclusive() {
        let mut coord = Coordinator::new();
        assert_eq!(coord.current(), None);
        coord.open(Panel::Region);
        coord.open(Panel::Calendar);
        assert_eq!(coord.current(), Some(Panel::Calendar));
        assert!(!coord.is_open(Panel::Region));
        coord.toggle(Panel::Guests);
        assert_eq!(coord.current(), Some(Panel::Guests));
        coord.toggle(Panel::Guests);
        assert_eq!(coord.current(), None);
    }

    #[test]
    fn test_pointer_outside_closes() {
        let mut coord = Coordinator::new();
        coord.open(Panel::Calendar);
        coord.register([Rect::new(0, 0, 40, 3), Rect::new(10, 3, 30, 9)]);
        assert_eq!(coord.pointer_down(Position::new(15, 5)), Pointer::Inside);
        assert_eq!(coord.current(), Some(Panel::Calendar));
        assert_eq!(
            coord.pointer_down(Position::new(60, 20)),
            Pointer::Dismissed(Panel::Calendar)
        );
        assert_eq!(coord.current(), None);
        // Boundary was dropped along with the panel
        assert_eq!(coord.pointer_down(Position::new(60, 20)), Pointer::Ignored);
    }

    #[test]
    fn test_register_ignored_when_closed() {
        let mut coord = Coordinator::<Panel>::new();
        coord.register([Rect::new(0, 0, 40, 3)]);
        assert_eq!(coord.pointer_down(Position::new(50, 50)), Pointer::Ignored);
    }

    #[test]
    fn test_switching_panels_drops_old_boundary() {
        let mut coord = Coordinator::new();
        coord.open(Panel::Region);
        coord.register([Rect::new(0, 0, 10, 10)]);
        coord.open(Panel::Guests);
        // Nothing registered for the guests panel yet
        assert_eq!(coord.pointer_down(Position::new(50, 50)), Pointer::Ignored);
        assert_eq!(coord.current(), Some(Panel::Guests));
    }

    #[test]
    fn test_close_returns_panel() {
        let mut coord = Coordinator::new();
        assert_eq!(coord.close(), None);
        coord.open(Panel::Region);
        assert_eq!(coord.close(), Some(Panel::Region));
    }

    #[test]
    fn test_list_cursor() {
        let mut cursor = ListCursor::new(3);
        assert!(!cursor.up());
        assert!(cursor.down());
        assert!(cursor.down());
        assert!(!cursor.down());
        assert_eq!(cursor.index(), 2);
        assert_eq!(ListCursor::new(3).at(1).index(), 1);
        assert_eq!(ListCursor::new(3).at(7).index(), 0);
    }

    #[test]
    fn test_boundary() {
        let mut boundary = Boundary::default();
        assert!(!boundary.is_outside(Position::new(5, 5)));
        boundary.register(Rect::new(0, 0, 4, 4));
        assert!(boundary.is_outside(Position::new(5, 5)));
        assert!(!boundary.is_outside(Position::new(1, 1)));
        boundary.clear();
        assert!(!boundary.is_outside(Position::new(5, 5)));
    }
}
