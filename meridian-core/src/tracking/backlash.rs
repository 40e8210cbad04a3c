//! Backlash compensation for quadrature feedback
//!
//! Reversing the motor does not immediately reverse the sensed shaft: the
//! gear train first travels through its slack. While that slack is being
//! cleared the raw encoder pulses must not advance the actual position,
//! and a reversal mid-clear must keep the partial progress already made
//! rather than restarting from zero.

use crate::traits::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Clearing {
    None,
    Positive,
    Negative,
}

/// Per-axis backlash state machine
///
/// Single writer: only the encoder edge callback feeds this. The anchor is
/// the raw count captured when a reversal was first observed; clearing
/// completes once the raw count has moved past the anchor by the
/// configured backlash in the new direction.
#[derive(Debug, Clone)]
pub struct BacklashFilter {
    backlash_pulses: i32,
    clearing: Clearing,
    anchor: i32,
}

impl BacklashFilter {
    pub fn new(backlash_pulses: i32) -> Self {
        Self {
            backlash_pulses,
            clearing: Clearing::None,
            anchor: 0,
        }
    }

    /// Whether a reversal is currently being cleared
    pub fn is_clearing(&self) -> bool {
        self.clearing != Clearing::None
    }

    /// Record an observed direction change at the given raw count
    ///
    /// A reversal during clearing re-anchors relative to the partially
    /// cleared backlash instead of re-reading the raw count, so no
    /// progress is lost or double-counted.
    pub fn direction_changed(&mut self, direction: Direction, raw_count: i32) {
        match direction {
            Direction::Positive => match self.clearing {
                Clearing::Positive => {}
                Clearing::Negative => {
                    // Expected raw position after the abandoned negative clear
                    self.clearing = Clearing::Positive;
                    self.anchor -= self.backlash_pulses;
                }
                Clearing::None => {
                    self.clearing = Clearing::Positive;
                    self.anchor = raw_count;
                }
            },
            Direction::Negative => match self.clearing {
                Clearing::Negative => {}
                Clearing::Positive => {
                    self.clearing = Clearing::Negative;
                    self.anchor += self.backlash_pulses;
                }
                Clearing::None => {
                    self.clearing = Clearing::Negative;
                    self.anchor = raw_count;
                }
            },
        }
    }

    /// Account one raw pulse, returning the pulses to credit to the
    /// actual position
    ///
    /// While clearing the credit stays zero until the slack is taken up,
    /// then the overshoot past the clearing point is credited in one shot.
    pub fn pulse(&mut self, raw_count: i32, step: i8) -> i64 {
        match self.clearing {
            Clearing::Positive => {
                if raw_count >= self.anchor + self.backlash_pulses {
                    self.clearing = Clearing::None;
                    (raw_count - self.anchor - self.backlash_pulses) as i64
                } else {
                    0
                }
            }
            Clearing::Negative => {
                if raw_count <= self.anchor - self.backlash_pulses {
                    self.clearing = Clearing::None;
                    (raw_count - self.anchor + self.backlash_pulses) as i64
                } else {
                    0
                }
            }
            Clearing::None => step as i64,
        }
    }

    /// Drop any in-progress clearing state
    pub fn reset(&mut self) {
        self.clearing = Clearing::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the filter through `count` unit pulses, returning the total credit
    fn run(filter: &mut BacklashFilter, raw: &mut i32, step: i8, count: i32) -> i64 {
        let mut credited = 0;
        for _ in 0..count {
            *raw += step as i32;
            credited += filter.pulse(*raw, step);
        }
        credited
    }

    #[test]
    fn forward_motion_without_reversal_passes_through() {
        let mut filter = BacklashFilter::new(10);
        let mut raw = 0;
        let credited = run(&mut filter, &mut raw, 1, 25);
        assert_eq!(credited, 25);
        assert!(!filter.is_clearing());
    }

    #[test]
    fn reversal_swallows_exactly_the_backlash() {
        let mut filter = BacklashFilter::new(10);
        let mut raw = 100;

        // Reverse: the first 10 pulses clear slack, the rest count
        filter.direction_changed(Direction::Negative, raw);
        assert!(filter.is_clearing());
        let credited = run(&mut filter, &mut raw, -1, 14);
        assert_eq!(credited, -4);
        assert!(!filter.is_clearing());

        // Continuing in the same direction counts per pulse again
        let credited = run(&mut filter, &mut raw, -1, 5);
        assert_eq!(credited, -5);
    }

    #[test]
    fn catch_up_is_credited_once_not_per_pulse() {
        let mut filter = BacklashFilter::new(3);
        let mut raw = 0;
        filter.direction_changed(Direction::Positive, raw);

        let mut per_pulse = [0i64; 5];
        for entry in per_pulse.iter_mut() {
            raw += 1;
            *entry = filter.pulse(raw, 1);
        }
        // Nothing until the slack is gone, then unit credits
        assert_eq!(per_pulse, [0, 0, 0, 1, 1]);
    }

    #[test]
    fn reversal_mid_clear_rebases_the_anchor() {
        let mut filter = BacklashFilter::new(10);
        let mut raw = 0;

        // Start clearing positive and make partial progress k = 4
        filter.direction_changed(Direction::Positive, raw);
        let credited = run(&mut filter, &mut raw, 1, 4);
        assert_eq!(credited, 0);

        // Reverse mid-clear: the anchor rebases so that exactly the k
        // partially-cleared pulses bring the train back to engagement
        filter.direction_changed(Direction::Negative, raw);
        let credited = run(&mut filter, &mut raw, -1, 3);
        assert_eq!(credited, 0);
        assert!(filter.is_clearing());

        // The 4th return pulse completes the clear with nothing lost or
        // double-counted, and motion counts again from the next pulse on
        let credited = run(&mut filter, &mut raw, -1, 1);
        assert_eq!(credited, 0);
        assert!(!filter.is_clearing());
        let credited = run(&mut filter, &mut raw, -1, 2);
        assert_eq!(credited, -2);
    }

    #[test]
    fn double_reversal_returns_to_original_clearing() {
        let mut filter = BacklashFilter::new(8);
        let mut raw = 50;

        filter.direction_changed(Direction::Positive, raw);
        run(&mut filter, &mut raw, 1, 3);
        filter.direction_changed(Direction::Negative, raw);
        filter.direction_changed(Direction::Positive, raw);

        // Back on the original clear: 5 more pulses finish it
        let credited = run(&mut filter, &mut raw, 1, 5);
        assert_eq!(credited, 0);
        assert!(!filter.is_clearing());
        let credited = run(&mut filter, &mut raw, 1, 2);
        assert_eq!(credited, 2);
    }

    #[test]
    fn repeated_same_direction_observations_are_ignored() {
        let mut filter = BacklashFilter::new(5);
        let mut raw = 0;
        filter.direction_changed(Direction::Positive, raw);
        run(&mut filter, &mut raw, 1, 2);
        // A repeated positive observation must not re-anchor
        filter.direction_changed(Direction::Positive, raw);
        let credited = run(&mut filter, &mut raw, 1, 3);
        assert_eq!(credited, 0);
        let credited = run(&mut filter, &mut raw, 1, 1);
        assert_eq!(credited, 1);
    }
}
