//! Four-line unipolar focuser output
//!
//! Pushes the focuser sequencer's coil patterns onto the four driver
//! inputs of a unipolar stepper (ULN2003 or similar Darlington array).

use meridian_core::focuser::StepOutput;

use crate::gpio::OutputPin;

/// Applies focuser step patterns to the four coil lines
pub struct FourPhaseOutput<P> {
    pins: [P; 4],
}

impl<P: OutputPin> FourPhaseOutput<P> {
    /// Take ownership of the coil pins, starting de-energized
    pub fn new(pins: [P; 4]) -> Self {
        let mut output = Self { pins };
        output.release();
        output
    }

    /// Apply one sequencer tick result to the coils
    pub fn apply(&mut self, output: StepOutput) {
        match output {
            StepOutput::Energize(pattern) => {
                for (pin, on) in self.pins.iter_mut().zip(pattern) {
                    pin.set_state(on);
                }
            }
            StepOutput::Release => self.release(),
        }
    }

    fn release(&mut self) {
        for pin in &mut self.pins {
            pin.set_low();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::testing::MockPin;
    use meridian_core::focuser::HALF_STEP_SEQUENCE;

    fn levels(output: &FourPhaseOutput<MockPin>) -> [bool; 4] {
        [
            output.pins[0].high,
            output.pins[1].high,
            output.pins[2].high,
            output.pins[3].high,
        ]
    }

    #[test]
    fn starts_de_energized() {
        let output = FourPhaseOutput::new([
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
        ]);
        assert_eq!(levels(&output), [false; 4]);
    }

    #[test]
    fn patterns_reach_the_pins() {
        let mut output = FourPhaseOutput::new([
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
        ]);

        for pattern in HALF_STEP_SEQUENCE {
            output.apply(StepOutput::Energize(pattern));
            assert_eq!(levels(&output), pattern);
        }

        output.apply(StepOutput::Release);
        assert_eq!(levels(&output), [false; 4]);
    }
}
