//! Climate-control paging gesture
//!
//! With the car in neutral, A/C on and recirculation selected, the fan
//! speed knob becomes a page selector: each step pages forward, turning it
//! all the way up resets the display.

use crate::config::PanelConfig;
use crate::state::PageEvent;

/// Climate-control and gear state relevant to the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelSnapshot {
    pub gear_neutral: bool,
    pub ac_on: bool,
    pub recirculation: bool,
    pub fan_speed: u8,
}

impl PanelSnapshot {
    /// Check if fan speed changes should be read as page input
    pub fn is_armed(&self) -> bool {
        self.gear_neutral && self.ac_on && self.recirculation
    }
}

/// Turns panel snapshots into page events
#[derive(Debug, Clone)]
pub struct PanelGesture {
    max_fan_speed: u8,
    last: Option<PanelSnapshot>,
}

impl PanelGesture {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            max_fan_speed: config.max_fan_speed,
            last: None,
        }
    }

    /// Feed the latest snapshot
    ///
    /// The first snapshot only establishes a baseline. The gesture must be
    /// armed both before and after a fan speed change for it to count.
    pub fn update(&mut self, snapshot: PanelSnapshot) -> Option<PageEvent> {
        let previous = self.last.replace(snapshot)?;

        if !(previous.is_armed() && snapshot.is_armed()) {
            return None;
        }
        if snapshot.fan_speed == previous.fan_speed {
            return None;
        }

        if snapshot.fan_speed >= self.max_fan_speed {
            Some(PageEvent::Reset)
        } else {
            Some(PageEvent::Advance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(fan_speed: u8) -> PanelSnapshot {
        PanelSnapshot {
            gear_neutral: true,
            ac_on: true,
            recirculation: true,
            fan_speed,
        }
    }

    fn gesture() -> PanelGesture {
        PanelGesture::new(&PanelConfig::DEFAULT)
    }

    #[test]
    fn test_first_snapshot_is_baseline() {
        let mut g = gesture();
        assert_eq!(g.update(armed(3)), None);
    }

    #[test]
    fn test_fan_step_advances() {
        let mut g = gesture();
        g.update(armed(1));
        assert_eq!(g.update(armed(2)), Some(PageEvent::Advance));
        assert_eq!(g.update(armed(2)), None);
        assert_eq!(g.update(armed(1)), Some(PageEvent::Advance));
    }

    #[test]
    fn test_max_fan_resets() {
        let mut g = gesture();
        g.update(armed(5));
        assert_eq!(g.update(armed(7)), Some(PageEvent::Reset));
    }

    #[test]
    fn test_not_armed_is_ignored() {
        let mut g = gesture();
        let mut driving = armed(1);
        driving.gear_neutral = false;
        g.update(driving);
        driving.fan_speed = 4;
        assert_eq!(g.update(driving), None);

        // Arming itself is not a step
        assert_eq!(g.update(armed(4)), None);
        assert_eq!(g.update(armed(5)), Some(PageEvent::Advance));
    }

    #[test]
    fn test_disarm_with_speed_change_is_ignored() {
        let mut g = gesture();
        g.update(armed(2));
        let mut off = armed(3);
        off.ac_on = false;
        assert_eq!(g.update(off), None);
    }
}
