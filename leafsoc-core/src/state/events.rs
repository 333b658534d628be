//! Events that trigger page transitions

/// Input events understood by the page state machine
///
/// Every input source (page button, climate-control gesture) is mapped to
/// one of these; the state machine does not know where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageEvent {
    /// Show the next page
    Advance,
    /// Go back to the first page and restart the device
    Reset,
}
