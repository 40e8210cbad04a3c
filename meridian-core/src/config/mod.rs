//! Configuration type definitions
//!
//! Mount geometry, encoder feedback and focuser travel parameters. The
//! defaults describe the reference build; integrators override them from
//! their board definition.

pub mod calibration;
pub mod focuser;
pub mod mount;

pub use calibration::DriveCalibration;
pub use focuser::FocuserConfig;
pub use mount::{AxisDriveConfig, EncoderConfig, MountConfig};
