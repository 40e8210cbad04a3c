//! Wire contracts for the Meridian mount controller
//!
//! The mount is commanded over single-datagram messages and reports its
//! state through two fixed-size records: an acknowledgement returned for
//! every command, and a periodic status broadcast.
//!
//! # Layout rules
//!
//! All multi-byte fields are big-endian. Offsets and sizes are
//! compatibility contracts with deployed client software and must be
//! reproduced bit-for-bit:
//!
//! ```text
//! command:    ┌────────┬─────────────────┐
//!             │ OPCODE │ OPERANDS 0-4B   │
//!             └────────┴─────────────────┘
//! ack:        18 bytes, see `ack`
//! broadcast:  32 bytes, see `broadcast`
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod ack;
pub mod broadcast;
pub mod command;

pub use ack::{Ack, AckError, ACK_SIZE};
pub use broadcast::{BroadcastError, StatusBroadcast, BROADCAST_SIZE};
pub use command::{Command, CommandError, GuideDirection, MAX_COMMAND_SIZE};
