//! Hardware driver implementations
//!
//! This crate provides the concrete glue between the motion core and the
//! board peripherals:
//!
//! - Quadrature encoder edge decoder (feeds the position tracker)
//! - Step/dir drive sink over a pulse channel and two control lines
//! - Four-line unipolar output for the focuser coils

#![no_std]
#![deny(unsafe_code)]

pub mod fourphase;
pub mod gpio;
pub mod quadrature;
pub mod stepdir;

pub use fourphase::FourPhaseOutput;
pub use gpio::OutputPin;
pub use quadrature::{EncoderLine, EncoderStep, QuadratureDecoder};
pub use stepdir::{PulseChannel, StepDirDrive};
