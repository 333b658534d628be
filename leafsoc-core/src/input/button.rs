//! Page button timing
//!
//! The button is sampled once per display cycle. Press length is measured
//! from timestamps rather than by blocking, so a long hold never stalls bus
//! reception.

use crate::config::InputConfig;
use crate::state::PageEvent;

/// Classified button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Released after at least the debounce time but before a long press
    ShortPress,
    /// Held for the long-press time
    LongPress,
}

impl From<ButtonEvent> for PageEvent {
    fn from(event: ButtonEvent) -> Self {
        match event {
            ButtonEvent::ShortPress => PageEvent::Advance,
            ButtonEvent::LongPress => PageEvent::Reset,
        }
    }
}

/// Press/release tracker for a single button
#[derive(Debug, Clone)]
pub struct ButtonTracker {
    debounce_ms: u32,
    long_press_ms: u32,
    pressed_at: Option<u32>,
    long_press_fired: bool,
}

impl ButtonTracker {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            long_press_ms: config.long_press_ms,
            pressed_at: None,
            long_press_fired: false,
        }
    }

    /// Check if the button is currently held
    pub fn is_held(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Feed one sample
    ///
    /// `now_ms` is a free-running millisecond counter; wraparound is
    /// handled.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Option<ButtonEvent> {
        match (self.pressed_at, pressed) {
            (None, true) => {
                self.pressed_at = Some(now_ms);
                self.long_press_fired = false;
                None
            }
            (None, false) => None,
            (Some(since), true) => {
                let held = now_ms.wrapping_sub(since);
                if !self.long_press_fired && held >= self.long_press_ms {
                    self.long_press_fired = true;
                    return Some(ButtonEvent::LongPress);
                }
                None
            }
            (Some(since), false) => {
                self.pressed_at = None;
                if self.long_press_fired {
                    return None;
                }
                let held = now_ms.wrapping_sub(since);
                if held >= self.long_press_ms {
                    // Threshold crossed between samples
                    Some(ButtonEvent::LongPress)
                } else if held >= self.debounce_ms {
                    Some(ButtonEvent::ShortPress)
                } else {
                    None
                }
            }
        }
    }
}
