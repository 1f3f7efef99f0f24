/// What a screen currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<D> {
    Loading,
    Ready(D),
}

/// Issued when a fetch starts; newer tickets supersede older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    BecameReady,
    Refreshed,
    Stale,
}

/// Holds the derived chart input for the latest applied snapshot.
#[derive(Debug)]
pub struct Screen<D> {
    state: ScreenState<D>,
    issued: u64,
    applied: Option<FetchTicket>,
}

impl<D> Default for Screen<D> {
    fn default() -> Self {
        Self {
            state: ScreenState::Loading,
            issued: 0,
            applied: None,
        }
    }
}

impl<D> Screen<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    pub fn resolve(&mut self, ticket: FetchTicket, derived: D) -> Transition {
        if self.applied.is_some_and(|applied| ticket <= applied) {
            return Transition::Stale;
        }
        self.applied = Some(ticket);

        let transition = match self.state {
            ScreenState::Loading => Transition::BecameReady,
            ScreenState::Ready(_) => Transition::Refreshed,
        };
        self.state = ScreenState::Ready(derived);
        transition
    }

    pub fn state(&self) -> &ScreenState<D> {
        &self.state
    }

    pub fn current(&self) -> Option<&D> {
        match &self.state {
            ScreenState::Ready(derived) => Some(derived),
            ScreenState::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.current().is_none()
    }
}
