//! GPIO pin abstraction
//!
//! Drivers in this crate push levels onto pins and never need to observe
//! failures, so the local trait is infallible. Any `embedded-hal` output
//! pin satisfies it through the blanket impl; error returns from the HAL
//! are discarded, matching the fire-and-forget use of control lines here.

/// Infallible digital output pin
pub trait OutputPin {
    /// Set the pin high
    fn set_high(&mut self);

    /// Set the pin low
    fn set_low(&mut self);

    /// Set the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<T: embedded_hal::digital::OutputPin> OutputPin for T {
    fn set_high(&mut self) {
        let _ = embedded_hal::digital::OutputPin::set_high(self);
    }

    fn set_low(&mut self) {
        let _ = embedded_hal::digital::OutputPin::set_low(self);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MockPin;
    use super::*;

    #[test]
    fn embedded_hal_pins_satisfy_the_local_trait() {
        fn drive<P: OutputPin>(pin: &mut P) {
            pin.set_state(true);
        }

        let mut pin = MockPin::new();
        drive(&mut pin);
        assert!(pin.high);

        OutputPin::set_low(&mut pin);
        assert!(!pin.high);
    }
}
