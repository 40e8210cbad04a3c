//! Axis drive frequency and direction computation
//!
//! Converts requested rotation rates (cycles per axis period) into pulse
//! frequency, direction and enable outputs for the step/dir driver of each
//! axis, applying the configured rate limits and the persisted calibration
//! ratio. The realized signed frequency is returned from every rate change
//! so the caller can forward it to an open-loop position tracker.

use libm::round;

use crate::config::{calibration, AxisDriveConfig};
use crate::traits::{DriveSink, DutyCycle, RatioStore, StoreError};

/// One axis of the mount drive
#[derive(Debug, Clone)]
pub struct AxisDrive {
    config: AxisDriveConfig,
    requested_cycles: f64,
    realized_hz: i32,
}

impl AxisDrive {
    pub fn new(config: AxisDriveConfig) -> Self {
        Self {
            config,
            requested_cycles: 0.0,
            realized_hz: 0,
        }
    }

    /// Last requested rate in cycles per axis period, after clamping
    pub fn requested_cycles(&self) -> f64 {
        self.requested_cycles
    }

    /// Realized signed pulse frequency in Hz; zero when stopped
    pub fn frequency_hz(&self) -> i32 {
        self.realized_hz
    }

    /// Whether the motor is currently energized
    pub fn is_running(&self) -> bool {
        self.realized_hz != 0
    }

    pub fn config(&self) -> &AxisDriveConfig {
        &self.config
    }

    /// Apply a rate request to the hardware outputs
    ///
    /// Returns the realized signed frequency. The sign encodes the logical
    /// direction; the `reverse` config flag inverts only the physical
    /// direction line. A magnitude below `cycle_min`, or one that rounds to
    /// zero frequency, commands a full stop: duty zero and the enable line
    /// released.
    fn apply<S: DriveSink>(&mut self, cycles_per_period: f64, time_ratio: f64, sink: &mut S) -> i32 {
        let negative = cycles_per_period < 0.0;
        let mut magnitude = if negative {
            -cycles_per_period
        } else {
            cycles_per_period
        };
        if magnitude > self.config.cycle_max {
            magnitude = self.config.cycle_max;
        }
        self.requested_cycles = if negative { -magnitude } else { magnitude };

        sink.set_direction_line(negative == self.config.reverse);

        let freq = round(time_ratio * self.config.frequency_for(magnitude)) as i32;
        if magnitude < self.config.cycle_min || freq == 0 {
            sink.set_duty(DutyCycle::Zero);
            sink.set_enable_line(true);
            self.realized_hz = 0;
        } else {
            sink.set_frequency(freq as u32);
            sink.set_duty(DutyCycle::Half);
            sink.set_enable_line(false);
            self.realized_hz = if negative { -freq } else { freq };
        }
        self.realized_hz
    }
}

/// Both axis drives plus the shared calibration ratio
pub struct MountDrive {
    ra: AxisDrive,
    dec: AxisDrive,
    time_ratio: f64,
}

impl MountDrive {
    /// Create the drive pair, loading the calibration ratio from storage
    ///
    /// A missing or unreadable ratio falls back to 1.0; motion is never
    /// blocked on storage.
    pub fn new<S: RatioStore>(ra: AxisDriveConfig, dec: AxisDriveConfig, store: &mut S) -> Self {
        let time_ratio = match store.load() {
            Ok(Some(micros)) => calibration::micros_to_ratio(micros),
            Ok(None) | Err(_) => 1.0,
        };
        Self {
            ra: AxisDrive::new(ra),
            dec: AxisDrive::new(dec),
            time_ratio,
        }
    }

    /// Command the RA axis in cycles per sidereal day
    pub fn set_ra_rate<S: DriveSink>(&mut self, cycles_per_sidereal_day: f64, sink: &mut S) -> i32 {
        self.ra.apply(cycles_per_sidereal_day, self.time_ratio, sink)
    }

    /// Command the DEC axis in cycles per solar day
    pub fn set_dec_rate<S: DriveSink>(&mut self, cycles_per_day: f64, sink: &mut S) -> i32 {
        self.dec.apply(cycles_per_day, self.time_ratio, sink)
    }

    /// Change the calibration ratio and persist it
    ///
    /// Both axes' last requested rates are re-applied under the new ratio
    /// before the store is written, so a storage error leaves the mount
    /// running correctly under the new ratio; the error is only propagated
    /// for reporting. Returns the realized frequencies with the result.
    pub fn set_time_ratio<RS, DS, ST>(
        &mut self,
        ratio: f64,
        ra_sink: &mut RS,
        dec_sink: &mut DS,
        store: &mut ST,
    ) -> ((i32, i32), Result<(), StoreError>)
    where
        RS: DriveSink,
        DS: DriveSink,
        ST: RatioStore,
    {
        self.time_ratio = ratio;
        let ra_cycles = self.ra.requested_cycles;
        let dec_cycles = self.dec.requested_cycles;
        let ra_hz = self.ra.apply(ra_cycles, ratio, ra_sink);
        let dec_hz = self.dec.apply(dec_cycles, ratio, dec_sink);
        let stored = store.save(calibration::ratio_to_micros(ratio));
        ((ra_hz, dec_hz), stored)
    }

    pub fn time_ratio(&self) -> f64 {
        self.time_ratio
    }

    pub fn ra(&self) -> &AxisDrive {
        &self.ra
    }

    pub fn dec(&self) -> &AxisDrive {
        &self.dec
    }
}
