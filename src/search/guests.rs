use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum GuestKind {
    Adults,
    Children,
    Rooms,
}

impl GuestKind {
    pub(crate) const ALL: [GuestKind; 3] =
        [GuestKind::Adults, GuestKind::Children, GuestKind::Rooms];

    pub(crate) fn minimum(self) -> u16 {
        match self {
            GuestKind::Adults | GuestKind::Rooms => 1,
            GuestKind::Children => 0,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            GuestKind::Adults => "Adults",
            GuestKind::Children => "Children",
            GuestKind::Rooms => "Rooms",
        }
    }

    pub(crate) fn hint(self) -> &'static str {
        match self {
            GuestKind::Adults => "Ages 13 or above",
            GuestKind::Children => "Ages 2-12",
            GuestKind::Rooms => "",
        }
    }

    pub(crate) fn next(self) -> GuestKind {
        match self {
            GuestKind::Adults => GuestKind::Children,
            GuestKind::Children | GuestKind::Rooms => GuestKind::Rooms,
        }
    }

    pub(crate) fn previous(self) -> GuestKind {
        match self {
            GuestKind::Adults | GuestKind::Children => GuestKind::Adults,
            GuestKind::Rooms => GuestKind::Children,
        }
    }
}

/// Party size for a search.  Each count stays at or above its
/// [`GuestKind::minimum()`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub(crate) struct GuestCounts {
    adults: u16,
    children: u16,
    rooms: u16,
}

impl GuestCounts {
    pub(crate) fn get(&self, kind: GuestKind) -> u16 {
        match kind {
            GuestKind::Adults => self.adults,
            GuestKind::Children => self.children,
            GuestKind::Rooms => self.rooms,
        }
    }

    fn slot(&mut self, kind: GuestKind) -> &mut u16 {
        match kind {
            GuestKind::Adults => &mut self.adults,
            GuestKind::Children => &mut self.children,
            GuestKind::Rooms => &mut self.rooms,
        }
    }

    pub(crate) fn increment(&mut self, kind: GuestKind) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(1);
    }

    /// Returns `false` if the count was already at its minimum
    pub(crate) fn decrement(&mut self, kind: GuestKind) -> bool {
        let slot = self.slot(kind);
        if *slot > kind.minimum() {
            *slot -= 1;
            true
        } else {
            false
        }
    }

    /// Short description such as "2 adults · 1 room"
    pub(crate) fn summary(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if self.adults > 0 {
            parts.push(format!(
                "{} adult{}",
                self.adults,
                if self.adults > 1 { "s" } else { "" }
            ));
        }
        if self.children > 0 {
            parts.push(format!("{} children", self.children));
        }
        parts.push(format!(
            "{} room{}",
            self.rooms,
            if self.rooms > 1 { "s" } else { "" }
        ));
        parts.join(" · ")
    }
}

impl Default for GuestCounts {
    fn default() -> GuestCounts {
        GuestCounts {
            adults: 2,
            children: 0,
            rooms: 1,
        }
    }
}
