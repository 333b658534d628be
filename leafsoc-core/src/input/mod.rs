//! Input sources mapped onto page events

pub mod button;
pub mod panel;

pub use button::{ButtonEvent, ButtonTracker};
pub use panel::{PanelGesture, PanelSnapshot};
