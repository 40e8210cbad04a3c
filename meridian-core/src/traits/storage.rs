//! Persistent storage for the drive calibration ratio

/// Errors from ratio storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Backing store unavailable or the operation failed
    Storage,
    /// Stored value present but unreadable
    Corrupted,
}

/// Key-value slot holding the scaled time ratio
///
/// The ratio is persisted as micros (ratio x 1 000 000) in a single signed
/// 32-bit slot. An empty slot means the mount runs uncalibrated at 1.0.
pub trait RatioStore {
    /// Read the stored scaled ratio, `None` when never written
    fn load(&mut self) -> Result<Option<i32>, StoreError>;

    /// Persist the scaled ratio
    fn save(&mut self, ratio_micros: i32) -> Result<(), StoreError>;
}
