//! Mount position tracking
//!
//! Two interchangeable strategies reconstruct the pointing from the motion
//! hardware: [`EncoderTracker`] consumes quadrature feedback with backlash
//! compensation, [`OpenLoopTracker`] integrates the commanded drive
//! frequency over wall-clock time. Both track RA on the sidereal base and
//! DEC as the mechanical shaft angle; [`MountPosition`] layers the
//! pier-side transform on top to produce the externally visible sky
//! coordinates.

pub mod backlash;
pub mod encoder;
pub mod integrator;

pub use backlash::BacklashFilter;
pub use encoder::EncoderTracker;
pub use integrator::{OpenLoopTracker, RateIntegrator};

use crate::pier::{self, SideOfPier};

/// Read/sync contract shared by both tracking strategies
///
/// Current angles are pure functions of `(now, epoch, accumulated pulses)`;
/// no read mutates state.
pub trait PositionTracker {
    /// RA angle in day-millis at the given monotonic time
    fn ra_angle_millis(&self, now_millis: u64) -> i32;

    /// Mechanical DEC shaft angle in day-millis
    fn dec_mechanical_angle_millis(&self, now_millis: u64) -> i32;

    /// Rebind the tracking epoch to the given absolute angles
    fn sync_angles(&mut self, now_millis: u64, ra_angle_millis: i32, dec_mechanical_millis: i32);
}

/// Tracker plus pier-side state: the externally visible mount position
pub struct MountPosition<T> {
    tracker: T,
    side: SideOfPier,
}

impl<T: PositionTracker> MountPosition<T> {
    pub fn new(tracker: T) -> Self {
        Self {
            tracker,
            side: SideOfPier::Normal,
        }
    }

    /// Access the underlying tracker, e.g. to feed encoder callbacks
    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn side_of_pier(&self) -> SideOfPier {
        self.side
    }

    pub fn ra_angle_millis(&self, now_millis: u64) -> i32 {
        self.tracker.ra_angle_millis(now_millis)
    }

    /// Sky DEC angle under the asserted pier side
    ///
    /// The transform is its own inverse for a fixed side, so the same
    /// mapping converts the mechanical shaft angle back to sky.
    pub fn dec_angle_millis(&self, now_millis: u64) -> i32 {
        let mechanical = self.tracker.dec_mechanical_angle_millis(now_millis);
        pier::sky_to_mechanical(mechanical, self.side)
    }

    pub fn dec_mechanical_angle_millis(&self, now_millis: u64) -> i32 {
        self.tracker.dec_mechanical_angle_millis(now_millis)
    }

    /// Sync the tracked position to absolute sky coordinates
    ///
    /// The DEC value is converted to the mechanical angle under the
    /// currently asserted pier side before the epoch is rebound.
    pub fn sync_angles(&mut self, now_millis: u64, ra_angle_millis: i32, dec_angle_millis: i32) {
        let mechanical = pier::sky_to_mechanical(dec_angle_millis, self.side);
        self.tracker.sync_angles(now_millis, ra_angle_millis, mechanical);
    }

    /// Assert the pier side
    ///
    /// The DEC epoch is rebound at the current mechanical angle, so the
    /// shaft angle stays continuous while the reported sky angle jumps by
    /// the transform.
    pub fn set_side_of_pier(&mut self, side: SideOfPier, now_millis: u64) {
        let ra = self.tracker.ra_angle_millis(now_millis);
        let mechanical = self.tracker.dec_mechanical_angle_millis(now_millis);
        self.side = side;
        self.tracker.sync_angles(now_millis, ra, mechanical);
    }

    /// Update the pier side from the current mechanical reading
    ///
    /// Call whenever a raw mechanical angle could imply the tube was
    /// manually flipped past the pole.
    pub fn set_side_from_mechanical(&mut self, now_millis: u64) {
        let mechanical = self.tracker.dec_mechanical_angle_millis(now_millis);
        let (_, side) = pier::mechanical_to_sky(mechanical);
        self.side = side;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncoderConfig;

    fn position() -> MountPosition<EncoderTracker> {
        MountPosition::new(EncoderTracker::new(
            &EncoderConfig::ra(),
            &EncoderConfig::dec(),
            0,
        ))
    }

    #[test]
    fn dec_sync_roundtrips_through_the_transform() {
        let mut p = position();
        p.sync_angles(0, 0, 10_000_000);
        assert_eq!(p.dec_angle_millis(0), 10_000_000);
        assert_eq!(p.dec_mechanical_angle_millis(0), 10_000_000);
    }

    #[test]
    fn flipped_sync_stores_the_mirrored_shaft_angle() {
        let mut p = position();
        p.set_side_of_pier(SideOfPier::Flipped, 0);
        p.sync_angles(0, 0, 10_000_000);
        assert_eq!(p.dec_mechanical_angle_millis(0), 33_200_000);
        // The reported sky angle still reads what was synced
        assert_eq!(p.dec_angle_millis(0), 10_000_000);
    }

    #[test]
    fn pier_flip_keeps_the_mechanical_angle_continuous() {
        let mut p = position();
        p.sync_angles(0, 0, 10_000_000);
        assert_eq!(p.dec_angle_millis(0), 10_000_000);

        p.set_side_of_pier(SideOfPier::Flipped, 0);

        // Shaft angle unchanged through the flip, reported sky angle jumps
        // by the transform
        assert_eq!(p.dec_mechanical_angle_millis(0), 10_000_000);
        assert_eq!(p.dec_angle_millis(0), 33_200_000);
    }

    #[test]
    fn side_inference_from_mechanical_reading() {
        let mut p = position();
        p.sync_angles(0, 0, 20_000_000);
        assert_eq!(p.side_of_pier(), SideOfPier::Normal);

        // Drive the shaft well past the pole, then re-infer
        p.tracker_mut().sync_angles(0, 0, 30_000_000);
        p.set_side_from_mechanical(0);
        assert_eq!(p.side_of_pier(), SideOfPier::Flipped);
    }

    #[test]
    fn ra_survives_a_pier_flip() {
        let mut p = position();
        p.sync_angles(1_000, 40_000_000, 0);
        let before = p.ra_angle_millis(1_000);
        p.set_side_of_pier(SideOfPier::Flipped, 1_000);
        let after = p.ra_angle_millis(1_000);
        assert!((after - before).abs() <= 1);
    }
}
