//! Hardware abstraction traits
//!
//! These traits define the seams between the motion core and the hardware
//! it commands. Implementations live with the chip integration (PWM
//! peripherals, GPIO, hardware timers, flash); the core only ever sees
//! these interfaces. Wall-clock time is injected as monotonic milliseconds
//! captured by the caller rather than through a clock object, so every
//! read path stays a pure function of its inputs.

pub mod drive;
pub mod storage;
pub mod timer;

pub use drive::{Direction, DriveSink, DutyCycle};
pub use storage::{RatioStore, StoreError};
pub use timer::MotionTimer;
