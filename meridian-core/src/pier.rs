//! Pier-side coordinate transform
//!
//! An equatorial mount can point at the same declination with the optical
//! tube on either side of the pier; the mechanical shaft angle differs by
//! half a revolution between the two. The ambiguity is resolved by an
//! explicit side-of-pier bit carried alongside the tracked position, never
//! inferred silently.

use crate::astro::{DAY_MILLIS, HALF_DAY_MILLIS, QUARTER_DAY_MILLIS};

/// Which side of the pier the optical tube sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SideOfPier {
    /// Tube east of the pier, shaft angle equals declination
    #[default]
    Normal,
    /// Tube west of the pier ("beyond the pole")
    Flipped,
}

impl SideOfPier {
    /// Wire representation: 0 normal, 1 flipped
    pub fn as_u8(self) -> u8 {
        match self {
            SideOfPier::Normal => 0,
            SideOfPier::Flipped => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SideOfPier::Normal),
            1 => Some(SideOfPier::Flipped),
            _ => None,
        }
    }
}

/// Sky declination to mechanical shaft angle under the given side
pub fn sky_to_mechanical(dec_millis: i32, side: SideOfPier) -> i32 {
    match side {
        SideOfPier::Normal => dec_millis,
        SideOfPier::Flipped => HALF_DAY_MILLIS - dec_millis,
    }
}

/// Mechanical shaft angle to sky declination plus the side it implies
///
/// The shaft angle is normalized into one revolution; readings within a
/// quarter turn of the pole on the near side report `Normal` with the
/// angle folded into the [-quarter, quarter] band, everything else is a
/// flipped pointing.
pub fn mechanical_to_sky(mechanical_millis: i32) -> (i32, SideOfPier) {
    let wrapped = mechanical_millis.rem_euclid(DAY_MILLIS);
    if wrapped < QUARTER_DAY_MILLIS {
        (wrapped, SideOfPier::Normal)
    } else if wrapped > 3 * QUARTER_DAY_MILLIS {
        (wrapped - DAY_MILLIS, SideOfPier::Normal)
    } else {
        (HALF_DAY_MILLIS - wrapped, SideOfPier::Flipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_side_is_identity() {
        assert_eq!(sky_to_mechanical(10_000_000, SideOfPier::Normal), 10_000_000);
        assert_eq!(sky_to_mechanical(-5_000_000, SideOfPier::Normal), -5_000_000);
    }

    #[test]
    fn flipped_side_mirrors_through_half_turn() {
        assert_eq!(sky_to_mechanical(10_000_000, SideOfPier::Flipped), 33_200_000);
        assert_eq!(sky_to_mechanical(0, SideOfPier::Flipped), HALF_DAY_MILLIS);
    }

    #[test]
    fn near_pole_band_reads_normal() {
        assert_eq!(mechanical_to_sky(10_000_000), (10_000_000, SideOfPier::Normal));
        // Just below a full turn folds into the negative band
        assert_eq!(
            mechanical_to_sky(DAY_MILLIS - 1_000_000),
            (-1_000_000, SideOfPier::Normal)
        );
    }

    #[test]
    fn far_band_reads_flipped() {
        assert_eq!(
            mechanical_to_sky(33_200_000),
            (10_000_000, SideOfPier::Flipped)
        );
        assert_eq!(
            mechanical_to_sky(HALF_DAY_MILLIS),
            (0, SideOfPier::Flipped)
        );
    }

    #[test]
    fn transforms_are_mutual_inverses() {
        for mechanical in (-DAY_MILLIS..2 * DAY_MILLIS).step_by(1_234_567) {
            let (sky, side) = mechanical_to_sky(mechanical);
            let back = sky_to_mechanical(sky, side);
            assert_eq!(back.rem_euclid(DAY_MILLIS), mechanical.rem_euclid(DAY_MILLIS));
        }
    }

    #[test]
    fn sky_roundtrip_for_fixed_side() {
        for sky in (-QUARTER_DAY_MILLIS + 1..QUARTER_DAY_MILLIS).step_by(997_001) {
            let (angle, side) = mechanical_to_sky(sky_to_mechanical(sky, SideOfPier::Normal));
            assert_eq!((angle, side), (sky, SideOfPier::Normal));

            let (angle, side) = mechanical_to_sky(sky_to_mechanical(sky, SideOfPier::Flipped));
            assert_eq!((angle, side), (sky, SideOfPier::Flipped));
        }
    }

    #[test]
    fn wire_byte_roundtrip() {
        assert_eq!(SideOfPier::from_u8(SideOfPier::Normal.as_u8()), Some(SideOfPier::Normal));
        assert_eq!(SideOfPier::from_u8(SideOfPier::Flipped.as_u8()), Some(SideOfPier::Flipped));
        assert_eq!(SideOfPier::from_u8(7), None);
    }
}
