//! Page controller
//!
//! Owns the page state machine and keeps the selected page in persistent
//! storage so it survives power cycles.

use leafsoc_hal::{ByteStorage, StorageError};

use crate::state::{Mode, PageEvent, PageState};

/// Observable result of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Nothing changed
    Unchanged,
    /// A different page is now selected
    PageChanged { from: u8, to: u8 },
    /// Page reset to 0; the device must restart
    RestartRequested,
}

/// Page state machine with persistence
pub struct PageController<S> {
    storage: S,
    address: u16,
    page_count: u8,
    state: PageState,
    last_storage_error: Option<StorageError>,
}

impl<S: ByteStorage> PageController<S> {
    /// Restore the page index stored at `address`
    ///
    /// A failed read starts on page 0. A stored value outside
    /// `0..page_count` (including a never-written cell) also starts on page
    /// 0 and writes 0 back.
    pub async fn load(mut storage: S, address: u16, page_count: u8) -> Self {
        let mut last_storage_error = None;

        let index = match storage.read_byte(address).await {
            Ok(value) if value < page_count => value,
            Ok(_) => {
                if let Err(e) = storage.write_byte(address, 0).await {
                    last_storage_error = Some(e);
                }
                0
            }
            Err(e) => {
                last_storage_error = Some(e);
                0
            }
        };

        Self {
            storage,
            address,
            page_count,
            state: PageState::new(index, page_count),
            last_storage_error,
        }
    }

    /// Apply an event, persisting the new index when it changes
    pub async fn handle(&mut self, event: PageEvent) -> Transition {
        let previous = self.state;
        let next = previous.transition(event, self.page_count);
        self.state = next;

        if next == previous {
            return Transition::Unchanged;
        }

        if next.index != previous.index {
            self.persist(next.index).await;
        }

        match next.mode {
            Mode::ResetPending => {
                // Reset from page 0 still has to land in storage
                if previous.index == 0 {
                    self.persist(0).await;
                }
                Transition::RestartRequested
            }
            Mode::Normal if next.index != previous.index => Transition::PageChanged {
                from: previous.index,
                to: next.index,
            },
            Mode::Normal => Transition::Unchanged,
        }
    }

    async fn persist(&mut self, index: u8) {
        match self.storage.write_byte(self.address, index).await {
            Ok(()) => self.last_storage_error = None,
            Err(e) => self.last_storage_error = Some(e),
        }
    }

    /// Index of the page currently shown
    pub fn current(&self) -> u8 {
        self.state.index
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn page_count(&self) -> u8 {
        self.page_count
    }

    /// Most recent storage failure, cleared by the next successful write
    pub fn last_storage_error(&self) -> Option<StorageError> {
        self.last_storage_error
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, e.g. to simulate a power cycle
    pub fn into_storage(self) -> S {
        self.storage
    }
}
