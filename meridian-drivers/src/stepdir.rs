//! Step/dir drive sink
//!
//! Wires one axis of the mount drive to its hardware: a variable frequency
//! pulse peripheral behind the step line plus the direction and enable
//! GPIO lines.

use meridian_core::traits::{DriveSink, DutyCycle};

use crate::gpio::OutputPin;

/// Variable-frequency pulse source (PWM peripheral behind the step line)
pub trait PulseChannel {
    /// Set the pulse frequency in Hz
    fn set_frequency(&mut self, freq_hz: u32);

    /// Set the duty cycle; `Zero` idles the line
    fn set_duty(&mut self, duty: DutyCycle);
}

/// Step/dir/enable wiring for one axis
pub struct StepDirDrive<C, D, E> {
    channel: C,
    dir: D,
    enable: E,
}

impl<C: PulseChannel, D: OutputPin, E: OutputPin> StepDirDrive<C, D, E> {
    /// Take ownership of the peripherals, leaving the motor released
    pub fn new(channel: C, dir: D, enable: E) -> Self {
        let mut drive = Self {
            channel,
            dir,
            enable,
        };
        drive.channel.set_duty(DutyCycle::Zero);
        drive.enable.set_high();
        drive
    }
}

impl<C: PulseChannel, D: OutputPin, E: OutputPin> DriveSink for StepDirDrive<C, D, E> {
    fn set_frequency(&mut self, freq_hz: u32) {
        self.channel.set_frequency(freq_hz);
    }

    fn set_duty(&mut self, duty: DutyCycle) {
        self.channel.set_duty(duty);
    }

    fn set_direction_line(&mut self, high: bool) {
        self.dir.set_state(high);
    }

    fn set_enable_line(&mut self, high: bool) {
        self.enable.set_state(high);
    }
}
