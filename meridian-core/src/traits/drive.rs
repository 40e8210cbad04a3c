//! Drive sink abstraction for the axis pulse generators
//!
//! Each mount axis is driven by a step/dir stepper driver: a variable
//! frequency pulse train on the step line plus direction and enable lines.
//! The core computes what to put on those outputs; a [`DriveSink`]
//! implementation owns the actual peripheral registers.

/// Logical rotation sense of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Counts and angles increase
    Positive,
    /// Counts and angles decrease
    Negative,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    /// Direction implied by a signed unit step
    pub fn from_step(step: i8) -> Self {
        if step >= 0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }
}

/// Pulse-train duty command
///
/// The step line either idles or runs a symmetric square wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DutyCycle {
    /// Line held idle, no step pulses
    Zero,
    /// 50% square wave at the configured frequency
    Half,
}

/// Hardware outputs for one mount axis
///
/// The enable line follows the usual stepper driver convention: driving it
/// high releases the motor, driving it low energizes it.
pub trait DriveSink {
    /// Set the step pulse frequency in Hz
    fn set_frequency(&mut self, freq_hz: u32);

    /// Set the step line duty cycle
    fn set_duty(&mut self, duty: DutyCycle);

    /// Drive the direction line to the given level
    fn set_direction_line(&mut self, high: bool);

    /// Drive the enable line to the given level (high releases the motor)
    fn set_enable_line(&mut self, high: bool);
}
