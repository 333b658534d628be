//! State machine definition
//!
//! What the secondary display region shows is a function of the current
//! page index; the index only moves in response to a [`PageEvent`].

use super::events::PageEvent;

/// Controller modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Cycling through pages
    Normal,
    /// Reset accepted, waiting for the device to restart
    ResetPending,
}

/// Current page and controller mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageState {
    /// Index into the page list, always below the page count
    pub index: u8,
    pub mode: Mode,
}

impl PageState {
    /// Start in normal mode on `index`
    ///
    /// Indices outside `0..page_count` fall back to page 0.
    pub fn new(index: u8, page_count: u8) -> Self {
        let index = if index < page_count { index } else { 0 };
        Self {
            index,
            mode: Mode::Normal,
        }
    }

    /// Check if a restart has been requested
    pub fn is_reset_pending(&self) -> bool {
        matches!(self.mode, Mode::ResetPending)
    }

    /// Process an event and return the next state
    ///
    /// This is the core transition logic. `ResetPending` is terminal for
    /// the running session: only a restart leaves it.
    pub fn transition(self, event: PageEvent, page_count: u8) -> Self {
        use Mode::*;
        use PageEvent::*;

        match (self.mode, event) {
            (Normal, Advance) => Self {
                index: next_index(self.index, page_count),
                mode: Normal,
            },
            (Normal, Reset) => Self {
                index: 0,
                mode: ResetPending,
            },
            // Ignore everything once a restart is on its way
            (ResetPending, _) => self,
        }
    }
}

fn next_index(index: u8, page_count: u8) -> u8 {
    if page_count == 0 {
        return 0;
    }
    let next = u16::from(index) + 1;
    (next % u16::from(page_count)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGES: u8 = 5;

    #[test]
    fn test_advance_wraps() {
        let mut state = PageState::new(0, PAGES);
        for expected in [1, 2, 3, 4, 0, 1] {
            state = state.transition(PageEvent::Advance, PAGES);
            assert_eq!(state.index, expected);
            assert_eq!(state.mode, Mode::Normal);
        }
    }

    #[test]
    fn test_reset_from_any_page() {
        for index in 0..PAGES {
            let next = PageState::new(index, PAGES).transition(PageEvent::Reset, PAGES);
            assert_eq!(next.index, 0);
            assert!(next.is_reset_pending());
        }
    }

    #[test]
    fn test_reset_pending_ignores_events() {
        let pending = PageState::new(3, PAGES).transition(PageEvent::Reset, PAGES);
        assert_eq!(pending.transition(PageEvent::Advance, PAGES), pending);
        assert_eq!(pending.transition(PageEvent::Reset, PAGES), pending);
    }

    #[test]
    fn test_out_of_range_start() {
        assert_eq!(PageState::new(PAGES, PAGES).index, 0);
        assert_eq!(PageState::new(0xFF, PAGES).index, 0);
    }

    #[test]
    fn test_single_page_stays_put() {
        let state = PageState::new(0, 1).transition(PageEvent::Advance, 1);
        assert_eq!(state.index, 0);
    }

    #[test]
    fn test_index_255_does_not_overflow() {
        let state = PageState {
            index: 254,
            mode: Mode::Normal,
        };
        assert_eq!(state.transition(PageEvent::Advance, 255).index, 0);
    }
}
