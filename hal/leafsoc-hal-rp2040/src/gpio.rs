//! GPIO inputs

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use leafsoc_hal::InputPin;

/// Input with the internal pull-up enabled
///
/// Used for buttons that short the pin to ground.
pub struct PullUpInput<'d> {
    pin: Input<'d>,
}

impl<'d> PullUpInput<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }
}

impl InputPin for PullUpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
