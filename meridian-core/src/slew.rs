//! Slew planner
//!
//! A timer-driven state machine that walks both axes to a target position.
//! Each tick recomputes the remaining angular differences from the tracked
//! position, apportions speed between the axes so they converge together,
//! and backs off speed and polling interval as the target nears. Motion is
//! commanded through a caller-supplied rate callback; the planner itself
//! never touches the drive.

use libm::sqrt;

use crate::astro::DAY_MILLIS;
use crate::traits::MotionTimer;

/// Slew speed and convergence tuning
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlewConfig {
    /// Peak axis rate in cycles per period
    pub max_speed: i32,
    /// Rate floor for the final approach
    pub min_speed: i32,
    /// Both axes within this many day-millis counts as arrived
    pub tolerance_millis: i64,
    /// Initial tick interval
    pub check_interval_millis: u32,
    /// Interval floor for the final approach
    pub min_check_interval_millis: u32,
}

impl Default for SlewConfig {
    fn default() -> Self {
        Self {
            max_speed: 16,
            min_speed: 1,
            tolerance_millis: 1000,
            check_interval_millis: 1000,
            min_check_interval_millis: 125,
        }
    }
}

/// Current tracked angles in day-millis (DEC mechanical)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnglesMillis {
    pub ra: i32,
    pub dec: i32,
}

/// Shortest signed RA difference on the day circle
///
/// Both wrap candidates adjacent to `current` are tried and the smaller
/// absolute difference wins; a dead tie resolves to the negative one.
pub fn ra_shortest_diff(target_millis: i32, current_millis: i32) -> i64 {
    let day = DAY_MILLIS as i64;
    let ahead = (target_millis as i64 - current_millis as i64).rem_euclid(day);
    let behind = ahead - day;
    if ahead < -behind {
        ahead
    } else {
        behind
    }
}

/// Timer-driven two-axis slew state machine
pub struct SlewPlanner {
    config: SlewConfig,
    slewing: bool,
    target: AnglesMillis,
    total_distance: f64,
    speed: i32,
    check_interval_millis: u32,
    remaining_fraction: f64,
    time_to_go_millis: u32,
}

impl SlewPlanner {
    pub fn new(config: SlewConfig) -> Self {
        Self {
            config,
            slewing: false,
            target: AnglesMillis { ra: 0, dec: 0 },
            total_distance: 0.0,
            speed: 0,
            check_interval_millis: 0,
            remaining_fraction: 1.0,
            time_to_go_millis: 0,
        }
    }

    pub fn is_slewing(&self) -> bool {
        self.slewing
    }

    /// Completed fraction of the slew, 0..1
    pub fn progress(&self) -> f64 {
        1.0 - self.remaining_fraction
    }

    /// Rough remaining time estimate from the last tick
    pub fn eta_millis(&self) -> u32 {
        self.time_to_go_millis
    }

    /// Begin a slew toward the given target and start motion immediately
    ///
    /// Captures the starting distance for progress reporting and runs the
    /// first tick synchronously. Callers must not start a slew while one
    /// is active; the planner would silently retarget.
    pub fn slew_to<M, T>(
        &mut self,
        target: AnglesMillis,
        current: AnglesMillis,
        motor: &mut M,
        timer: &mut T,
    ) where
        M: FnMut(f64, f64),
        T: MotionTimer,
    {
        self.target = target;
        let ra_diff = ra_shortest_diff(target.ra, current.ra) as f64;
        let dec_diff = (target.dec as i64 - current.dec as i64) as f64;
        self.total_distance = sqrt(ra_diff * ra_diff + dec_diff * dec_diff);
        self.remaining_fraction = 1.0;
        self.slewing = true;
        self.speed = self.config.max_speed;
        self.check_interval_millis = self.config.check_interval_millis;
        self.tick(current, motor, timer);
    }

    /// One planner step: command rates and re-arm the timer
    ///
    /// Idempotent at the terminal condition: once both differences are
    /// within tolerance every further tick commands zero rates and leaves
    /// the timer stopped.
    pub fn tick<M, T>(&mut self, current: AnglesMillis, motor: &mut M, timer: &mut T)
    where
        M: FnMut(f64, f64),
        T: MotionTimer,
    {
        // A tick racing an abort finds the planner idle and only re-zeroes
        if !self.slewing {
            motor(0.0, 0.0);
            return;
        }

        let ra_diff = ra_shortest_diff(self.target.ra, current.ra);
        let dec_diff = self.target.dec as i64 - current.dec as i64;

        let (abs_ra, ra_sign) = if ra_diff > 0 {
            (ra_diff, 1.0)
        } else {
            (-ra_diff, -1.0)
        };
        let (abs_dec, dec_sign) = if dec_diff > 0 {
            (dec_diff, 1.0)
        } else {
            (-dec_diff, -1.0)
        };

        if abs_ra < self.config.tolerance_millis && abs_dec < self.config.tolerance_millis {
            self.slewing = false;
            motor(0.0, 0.0);
            return;
        }

        // The axis with the longer way to go runs at full speed, the other
        // is scaled so both arrive together
        let (ra_factor, dec_factor);
        if abs_ra < abs_dec {
            ra_factor = abs_ra as f64 / abs_dec as f64;
            dec_factor = 1.0;
            self.time_to_go_millis = (abs_dec / self.speed as i64) as u32;
        } else {
            ra_factor = 1.0;
            dec_factor = abs_dec as f64 / abs_ra as f64;
            self.time_to_go_millis = (abs_ra / self.speed as i64) as u32;
        }

        // Near the target, halve the polling interval and the speed until
        // both floors are hit; halving speed doubles the estimate
        while self.time_to_go_millis < self.check_interval_millis * 4 {
            let mut any_slow_down = false;
            if self.check_interval_millis > self.config.min_check_interval_millis {
                self.check_interval_millis /= 2;
                any_slow_down = true;
            }
            if self.speed > self.config.min_speed {
                self.speed /= 2;
                self.time_to_go_millis *= 2;
                any_slow_down = true;
            }
            if !any_slow_down {
                break;
            }
        }

        // Motor rates are commanded in the tracked-angle sign convention:
        // positive RA pulses decrease the reported angle
        let speed = self.speed as f64;
        motor(
            -speed * ra_factor * ra_sign,
            speed * dec_factor * dec_sign,
        );

        let ra_diff = ra_diff as f64;
        let dec_diff = dec_diff as f64;
        let distance_now = sqrt(ra_diff * ra_diff + dec_diff * dec_diff);
        self.remaining_fraction = distance_now / self.total_distance;

        timer.start_once_micros(self.check_interval_millis as u64 * 1000);
    }

    /// Stop the slew from any state
    ///
    /// Rates are zeroed before the planner state is cleared so that a
    /// racing tick can only command another stop.
    pub fn abort<M, T>(&mut self, motor: &mut M, timer: &mut T)
    where
        M: FnMut(f64, f64),
        T: MotionTimer,
    {
        motor(0.0, 0.0);
        timer.stop();
        self.slewing = false;
    }
}
