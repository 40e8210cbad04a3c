//! Mount axis geometry and feedback configuration

use crate::astro::{DAY_MILLIS, SIDEREAL_DAY_MILLIS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometry and limits for one mount axis drive
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisDriveConfig {
    /// Full motor steps per motor revolution
    pub cycle_steps: u32,
    /// Gear reduction between motor shaft and axis
    pub gear_ratio: f64,
    /// Driver microstep resolution
    pub resolution: u32,
    /// Milliseconds per axis period (sidereal day for RA, solar day for DEC)
    pub period_millis: f64,
    /// Invert the physical direction line
    pub reverse: bool,
    /// Requested magnitudes below this command a full stop
    pub cycle_min: f64,
    /// Requested magnitudes are clamped to this
    pub cycle_max: f64,
}

impl AxisDriveConfig {
    /// Reference RA axis: 400-step motor, 144:1 worm, 16x microstepping
    pub fn ra() -> Self {
        Self {
            cycle_steps: 400,
            gear_ratio: 144.0,
            resolution: 16,
            period_millis: SIDEREAL_DAY_MILLIS,
            reverse: false,
            cycle_min: 0.01,
            cycle_max: 30.0,
        }
    }

    /// Reference DEC axis: same gearing on the solar time base
    pub fn dec() -> Self {
        Self {
            period_millis: DAY_MILLIS as f64,
            ..Self::ra()
        }
    }

    /// Drive pulses per full axis revolution
    pub fn pulses_per_revolution(&self) -> f64 {
        self.cycle_steps as f64 * self.gear_ratio * self.resolution as f64
    }

    /// Unscaled pulse frequency in Hz for a rate in cycles per period
    pub fn frequency_for(&self, cycles_per_period: f64) -> f64 {
        self.pulses_per_revolution() * cycles_per_period * 1000.0 / self.period_millis
    }

    /// Axis angle represented by one drive pulse, in the axis period base
    pub fn millis_per_pulse(&self) -> f64 {
        self.period_millis / self.pulses_per_revolution()
    }
}

/// Quadrature feedback configuration for one axis
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// Encoder pulses per encoder shaft revolution
    pub pulses_per_revolution: u32,
    /// Gear ratio between encoder shaft and axis
    pub gear_ratio: f64,
    /// Pulses of gear slack absorbed after a direction reversal
    pub backlash_pulses: i32,
    /// Invert the decoded count direction
    pub reverse: bool,
}

impl EncoderConfig {
    /// Reference encoder: 1000 CPR on the worm shaft
    pub fn ra() -> Self {
        Self {
            pulses_per_revolution: 1000,
            gear_ratio: 144.0,
            backlash_pulses: 12,
            reverse: false,
        }
    }

    /// DEC feedback matches the RA reference build
    pub fn dec() -> Self {
        Self::ra()
    }

    /// Axis angle represented by one encoder pulse
    ///
    /// `period_millis` is the axis time base (sidereal for RA, solar for
    /// DEC), matching the drive side.
    pub fn millis_per_pulse(&self, period_millis: f64) -> f64 {
        period_millis / (self.pulses_per_revolution as f64 * self.gear_ratio)
    }
}

/// Complete mount configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MountConfig {
    pub ra_drive: AxisDriveConfig,
    pub dec_drive: AxisDriveConfig,
    pub ra_encoder: EncoderConfig,
    pub dec_encoder: EncoderConfig,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            ra_drive: AxisDriveConfig::ra(),
            dec_drive: AxisDriveConfig::dec(),
            ra_encoder: EncoderConfig::ra(),
            dec_encoder: EncoderConfig::dec(),
        }
    }
}
