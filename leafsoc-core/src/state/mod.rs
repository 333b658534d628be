//! Page state machine
//!
//! Defines which page is shown and how input events move between pages.
//! The state machine is explicit, finite, and deterministic; persistence
//! lives in [`crate::pages::PageController`].

pub mod events;
pub mod machine;

pub use events::PageEvent;
pub use machine::{Mode, PageState};
