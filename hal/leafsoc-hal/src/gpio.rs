//! GPIO pin abstractions

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Push button wired between a pulled-up input and ground
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// True while the button is held down
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPin(bool);

    impl InputPin for FixedPin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_active_low_button() {
        assert!(ActiveLowButton::new(FixedPin(false)).is_pressed());
        assert!(!ActiveLowButton::new(FixedPin(true)).is_pressed());
    }
}
