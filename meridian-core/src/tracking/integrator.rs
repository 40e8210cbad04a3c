//! Open-loop position tracking by integrating commanded drive frequency
//!
//! The "virtual encoder": builds without shaft sensors reconstruct the
//! accumulated pulse count analytically from the realized drive frequency
//! and wall-clock time. Valid only while the drive frequency is
//! authoritative; slip or acceleration lag diverges silently with no
//! correction mechanism.

use crate::astro::RA_TIME_RATIO;
use crate::config::AxisDriveConfig;

use super::PositionTracker;

/// Piecewise-constant frequency integral for one axis
///
/// On every frequency change the elapsed time at the old frequency is
/// folded into the pulse base; reads at arbitrary times are pure.
#[derive(Debug, Clone, Copy)]
pub struct RateIntegrator {
    last_sync_millis: u64,
    frequency_hz: i32,
    pulses_at_sync: i64,
}

impl RateIntegrator {
    pub fn new(now_millis: u64) -> Self {
        Self {
            last_sync_millis: now_millis,
            frequency_hz: 0,
            pulses_at_sync: 0,
        }
    }

    /// Fold elapsed time at the old frequency, then record the new one
    pub fn frequency_changed(&mut self, now_millis: u64, frequency_hz: i32) {
        self.pulses_at_sync = self.pulses_at(now_millis);
        self.last_sync_millis = now_millis;
        self.frequency_hz = frequency_hz;
    }

    /// Pulses accumulated by the given time; does not mutate state
    pub fn pulses_at(&self, now_millis: u64) -> i64 {
        let elapsed = (now_millis - self.last_sync_millis) as i64;
        self.pulses_at_sync + elapsed * self.frequency_hz as i64 / 1000
    }

    /// Current signed frequency in Hz
    pub fn frequency_hz(&self) -> i32 {
        self.frequency_hz
    }

    /// Zero the pulse base at the given time, keeping the frequency
    fn rebase(&mut self, now_millis: u64) {
        self.last_sync_millis = now_millis;
        self.pulses_at_sync = 0;
    }
}

/// Open-loop position tracker fed by drive frequency notifications
///
/// Presents the same read/sync contract as the encoder tracker; the pulse
/// scale comes from the drive geometry instead of an encoder.
#[derive(Debug, Clone)]
pub struct OpenLoopTracker {
    ra_millis_per_pulse: f64,
    dec_millis_per_pulse: f64,
    reset_time_millis: u64,
    reset_ra_millis: i32,
    reset_dec_millis: i32,
    ra: RateIntegrator,
    dec: RateIntegrator,
}

impl OpenLoopTracker {
    pub fn new(ra: &AxisDriveConfig, dec: &AxisDriveConfig, now_millis: u64) -> Self {
        Self {
            ra_millis_per_pulse: ra.millis_per_pulse(),
            dec_millis_per_pulse: dec.millis_per_pulse(),
            reset_time_millis: now_millis,
            reset_ra_millis: 0,
            reset_dec_millis: 0,
            ra: RateIntegrator::new(now_millis),
            dec: RateIntegrator::new(now_millis),
        }
    }

    /// Notification from the axis drive: realized RA frequency changed
    pub fn ra_frequency_changed(&mut self, now_millis: u64, frequency_hz: i32) {
        self.ra.frequency_changed(now_millis, frequency_hz);
    }

    /// Notification from the axis drive: realized DEC frequency changed
    pub fn dec_frequency_changed(&mut self, now_millis: u64, frequency_hz: i32) {
        self.dec.frequency_changed(now_millis, frequency_hz);
    }
}

impl PositionTracker for OpenLoopTracker {
    fn ra_angle_millis(&self, now_millis: u64) -> i32 {
        let elapsed = (now_millis - self.reset_time_millis) as f64;
        let moved = self.ra_millis_per_pulse * self.ra.pulses_at(now_millis) as f64;
        (RA_TIME_RATIO * (self.reset_ra_millis as f64 + elapsed - moved)) as i32
    }

    fn dec_mechanical_angle_millis(&self, now_millis: u64) -> i32 {
        let moved = (self.dec_millis_per_pulse * self.dec.pulses_at(now_millis) as f64) as i32;
        self.reset_dec_millis + moved
    }

    fn sync_angles(&mut self, now_millis: u64, ra_angle_millis: i32, dec_mechanical_millis: i32) {
        self.reset_time_millis = now_millis;
        self.reset_ra_millis = (ra_angle_millis as f64 / RA_TIME_RATIO) as i32;
        self.reset_dec_millis = dec_mechanical_millis;
        self.ra.rebase(now_millis);
        self.dec.rebase(now_millis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::DAY_MILLIS;

    #[test]
    fn integrator_folds_old_frequency_on_change() {
        let mut integrator = RateIntegrator::new(0);
        integrator.frequency_changed(0, 100);

        // 2 seconds at 100 Hz
        assert_eq!(integrator.pulses_at(2_000), 200);

        // Change to 10 Hz; the first 2 s stay counted at the old rate
        integrator.frequency_changed(2_000, 10);
        assert_eq!(integrator.pulses_at(2_000), 200);
        assert_eq!(integrator.pulses_at(3_000), 210);
    }

    #[test]
    fn negative_frequency_counts_down() {
        let mut integrator = RateIntegrator::new(0);
        integrator.frequency_changed(0, -50);
        assert_eq!(integrator.pulses_at(4_000), -200);
    }

    #[test]
    fn reads_are_pure() {
        let mut integrator = RateIntegrator::new(0);
        integrator.frequency_changed(0, 7);
        let first = integrator.pulses_at(10_000);
        let second = integrator.pulses_at(10_000);
        assert_eq!(first, second);
        // An earlier read after a later one still answers for its own time
        assert!(integrator.pulses_at(1_000) < first);
    }

    #[test]
    fn dec_angle_tracks_commanded_motion() {
        let ra = AxisDriveConfig::ra();
        let dec = AxisDriveConfig::dec();
        let pulses_per_rev = dec.pulses_per_revolution();
        let mut t = OpenLoopTracker::new(&ra, &dec, 0);

        // Drive DEC at 1/100 revolution per second
        let hz = (pulses_per_rev / 100.0) as i32;
        t.dec_frequency_changed(0, hz);

        let angle = t.dec_mechanical_angle_millis(1_000);
        // One second: 1/100 revolution = DAY_MILLIS / 100
        let expected = DAY_MILLIS / 100;
        assert!((angle - expected).abs() < 1_000, "angle was {}", angle);
    }

    #[test]
    fn ra_holds_position_under_sidereal_tracking() {
        let ra = AxisDriveConfig::ra();
        let dec = AxisDriveConfig::dec();
        let mut t = OpenLoopTracker::new(&ra, &dec, 0);

        // The ideal sidereal frequency for this geometry, unrounded
        let hz = ra.frequency_for(1.0);
        t.ra_frequency_changed(0, hz as i32);

        // After an hour the drift is bounded by the frequency rounding
        let angle = t.ra_angle_millis(3_600_000);
        assert!(angle.abs() < 250_000, "angle was {}", angle);
    }

    #[test]
    fn sync_resets_the_integral() {
        let ra = AxisDriveConfig::ra();
        let dec = AxisDriveConfig::dec();
        let mut t = OpenLoopTracker::new(&ra, &dec, 0);
        t.dec_frequency_changed(0, 500);

        t.sync_angles(5_000, 1_000_000, 2_000_000);
        assert_eq!(t.dec_mechanical_angle_millis(5_000), 2_000_000);
        // The commanded frequency keeps integrating from the new epoch
        assert!(t.dec_mechanical_angle_millis(6_000) > 2_000_000);
    }
}
