//! Focuser step sequencer
//!
//! An independent timer-driven half-step sequencer for the unipolar
//! focuser motor. Each timer tick moves the step counter one step toward
//! the target and emits the coil pattern for that step; reaching the
//! target releases all four coils and stops the timer.

use crate::config::FocuserConfig;
use crate::traits::MotionTimer;

/// Half-step drive sequence for the four coil lines
pub const HALF_STEP_SEQUENCE: [[bool; 4]; 8] = [
    [true, false, false, false],
    [true, true, false, false],
    [false, true, false, false],
    [false, true, true, false],
    [false, false, true, false],
    [false, false, true, true],
    [false, false, false, true],
    [true, false, false, true],
];

/// Coil command emitted by one sequencer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutput {
    /// Drive the four coil lines with this pattern
    Energize([bool; 4]),
    /// De-energize all four coil lines
    Release,
}

/// Focuser position state machine
pub struct Focuser {
    max_steps: i32,
    step_interval_micros: u64,
    nanos_per_step: u16,
    current_step: i32,
    target_step: i32,
    moving: bool,
}

impl Focuser {
    pub fn new(config: &FocuserConfig) -> Self {
        Self {
            max_steps: config.max_steps() as i32,
            step_interval_micros: config.step_interval_micros(),
            nanos_per_step: config.nanos_per_step(),
            current_step: 0,
            target_step: 0,
            moving: false,
        }
    }

    pub fn current_step(&self) -> i32 {
        self.current_step
    }

    pub fn target_step(&self) -> i32 {
        self.target_step
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Step count limit in either direction, as reported to clients
    pub fn max_steps(&self) -> u32 {
        self.max_steps as u32
    }

    /// Travel per step in nanometers, as reported to clients
    pub fn nanos_per_step(&self) -> u16 {
        self.nanos_per_step
    }

    /// Request a relative move and start the step timer
    ///
    /// The delta and the resulting target are both clamped to the travel
    /// limit; out-of-range requests are bounded, never rejected.
    pub fn move_by<T: MotionTimer>(&mut self, steps: i32, timer: &mut T) {
        let steps = steps.clamp(-self.max_steps, self.max_steps);
        self.target_step = (self.target_step + steps).clamp(-self.max_steps, self.max_steps);
        self.moving = true;
        timer.start_periodic_micros(self.step_interval_micros);
    }

    /// One step-timer tick
    ///
    /// Emits the coil pattern for the step being executed, or releases the
    /// coils and stops the timer when the target has been reached. The
    /// terminal tick is idempotent.
    pub fn tick<T: MotionTimer>(&mut self, timer: &mut T) -> StepOutput {
        if self.current_step == self.target_step {
            self.moving = false;
            timer.stop();
            return StepOutput::Release;
        }

        let index = self.current_step.rem_euclid(8) as usize;
        if self.current_step < self.target_step {
            self.current_step += 1;
        } else {
            self.current_step -= 1;
        }
        StepOutput::Energize(HALF_STEP_SEQUENCE[index])
    }

    /// Stop immediately: no coast-down, the target snaps to wherever the
    /// sequencer currently is
    pub fn abort<T: MotionTimer>(&mut self, timer: &mut T) {
        self.moving = false;
        timer.stop();
        self.target_step = self.current_step;
    }
}
