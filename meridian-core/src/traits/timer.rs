//! Timer primitive consumed by the slew planner and focuser sequencer

/// One-shot/periodic timer with microsecond resolution
///
/// The host dispatches the expiry back into the owning subsystem's tick
/// method. `stop` must be idempotent and safe to call while disarmed;
/// starting an armed timer re-arms it with the new delay.
pub trait MotionTimer {
    /// Arm the timer to fire once after the given delay
    fn start_once_micros(&mut self, delay_us: u64);

    /// Arm the timer to fire repeatedly with the given period
    fn start_periodic_micros(&mut self, period_us: u64);

    /// Disarm the timer
    fn stop(&mut self);
}
