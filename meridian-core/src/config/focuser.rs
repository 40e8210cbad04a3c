//! Focuser travel configuration
//!
//! The focuser is described by its mechanical travel in microns; step
//! counts and timing are derived so that clients can reason purely in
//! steps.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Focuser drive train parameters
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FocuserConfig {
    /// Usable travel from center in microns
    pub total_travel_microns: u32,
    /// Microns of travel per motor cycle
    pub microns_per_cycle: u32,
    /// Half-steps per motor cycle
    pub steps_per_cycle: u32,
    /// Travel speed in microns per second
    pub speed_microns_per_s: u32,
}

impl Default for FocuserConfig {
    fn default() -> Self {
        // 28BYJ-48 geared stepper on an M42 helical: 4096 half-steps per
        // output revolution, 0.5 mm pitch
        Self {
            total_travel_microns: 20_000,
            microns_per_cycle: 500,
            steps_per_cycle: 4096,
            speed_microns_per_s: 100,
        }
    }
}

impl FocuserConfig {
    /// Step count limit in either direction from the sync point
    pub fn max_steps(&self) -> u32 {
        self.total_travel_microns * self.steps_per_cycle / self.microns_per_cycle
    }

    /// Travel per step in nanometers, as reported to clients
    pub fn nanos_per_step(&self) -> u16 {
        (self.microns_per_cycle * 1000 / self.steps_per_cycle) as u16
    }

    /// Step timer period for the configured travel speed
    pub fn step_interval_micros(&self) -> u64 {
        1_000_000 / (self.speed_microns_per_s * self.steps_per_cycle / self.microns_per_cycle) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_values_for_reference_build() {
        let config = FocuserConfig::default();
        assert_eq!(config.max_steps(), 163_840);
        assert_eq!(config.nanos_per_step(), 122);
        assert_eq!(config.step_interval_micros(), 1221);
    }

    #[test]
    fn faster_travel_shortens_step_interval() {
        let slow = FocuserConfig::default();
        let fast = FocuserConfig {
            speed_microns_per_s: 200,
            ..slow.clone()
        };
        assert!(fast.step_interval_micros() < slow.step_interval_micros());
    }
}
