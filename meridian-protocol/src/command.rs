//! Inbound command datagrams
//!
//! One datagram carries exactly one command: a single opcode byte followed
//! by its fixed operands. A datagram whose length does not match its
//! opcode is rejected whole; there is no framing to resynchronize.

use heapless::Vec;

/// Largest encoded command (opcode + i32 operand)
pub const MAX_COMMAND_SIZE: usize = 5;

const OP_PING: u8 = 0;
const OP_SET_TRACKING: u8 = 1;
const OP_SET_RA_RATE: u8 = 2;
const OP_SET_DEC_RATE: u8 = 3;
const OP_PULSE_GUIDE: u8 = 4;
const OP_SET_RA_GUIDE_RATE: u8 = 5;
const OP_SET_DEC_GUIDE_RATE: u8 = 6;

/// Guide pulse direction as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuideDirection {
    North = 1,
    South = 2,
    East = 3,
    West = 4,
}

impl GuideDirection {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(GuideDirection::North),
            2 => Some(GuideDirection::South),
            3 => Some(GuideDirection::East),
            4 => Some(GuideDirection::West),
            _ => None,
        }
    }
}

/// Errors from command decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Zero-length datagram
    Empty,
    /// First byte is not a known opcode
    UnknownOpcode,
    /// Datagram length does not match the opcode
    BadLength,
    /// Pulse-guide direction byte out of range
    BadGuideDirection,
}

/// A decoded mount command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Liveness probe; answered with a plain ack
    Ping,
    /// Set the tracking flag (nonzero tracks, sign selects hemisphere)
    SetTracking { mode: i8 },
    /// Set the RA pan rate in milli-cycles per sidereal day
    SetRaRate { millis: i32 },
    /// Set the DEC pan rate in milli-cycles per solar day
    SetDecRate { millis: i32 },
    /// Offset one axis at guide rate for the given duration
    PulseGuide {
        direction: GuideDirection,
        length_millis: u16,
    },
    /// Set the RA guide rate in milli-cycles per sidereal day
    SetRaGuideRate { millis: i32 },
    /// Set the DEC guide rate in milli-cycles per solar day
    SetDecGuideRate { millis: i32 },
}

fn operand_i32(buffer: &[u8]) -> Result<i32, CommandError> {
    if buffer.len() != 5 {
        return Err(CommandError::BadLength);
    }
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buffer[1..5]);
    Ok(i32::from_be_bytes(bytes))
}

impl Command {
    /// Decode one datagram
    pub fn decode(buffer: &[u8]) -> Result<Self, CommandError> {
        let opcode = *buffer.first().ok_or(CommandError::Empty)?;
        match opcode {
            OP_PING => {
                if buffer.len() != 1 {
                    return Err(CommandError::BadLength);
                }
                Ok(Command::Ping)
            }
            OP_SET_TRACKING => {
                if buffer.len() != 2 {
                    return Err(CommandError::BadLength);
                }
                Ok(Command::SetTracking {
                    mode: buffer[1] as i8,
                })
            }
            OP_SET_RA_RATE => Ok(Command::SetRaRate {
                millis: operand_i32(buffer)?,
            }),
            OP_SET_DEC_RATE => Ok(Command::SetDecRate {
                millis: operand_i32(buffer)?,
            }),
            OP_PULSE_GUIDE => {
                if buffer.len() != 4 {
                    return Err(CommandError::BadLength);
                }
                let direction = GuideDirection::from_u8(buffer[1])
                    .ok_or(CommandError::BadGuideDirection)?;
                Ok(Command::PulseGuide {
                    direction,
                    length_millis: u16::from_be_bytes([buffer[2], buffer[3]]),
                })
            }
            OP_SET_RA_GUIDE_RATE => Ok(Command::SetRaGuideRate {
                millis: operand_i32(buffer)?,
            }),
            OP_SET_DEC_GUIDE_RATE => Ok(Command::SetDecGuideRate {
                millis: operand_i32(buffer)?,
            }),
            _ => Err(CommandError::UnknownOpcode),
        }
    }

    /// Encode into a datagram, as a client would send it
    pub fn encode_to_vec(&self) -> Vec<u8, MAX_COMMAND_SIZE> {
        let mut out = Vec::new();
        match *self {
            Command::Ping => {
                let _ = out.push(OP_PING);
            }
            Command::SetTracking { mode } => {
                let _ = out.push(OP_SET_TRACKING);
                let _ = out.push(mode as u8);
            }
            Command::SetRaRate { millis } => {
                let _ = out.push(OP_SET_RA_RATE);
                let _ = out.extend_from_slice(&millis.to_be_bytes());
            }
            Command::SetDecRate { millis } => {
                let _ = out.push(OP_SET_DEC_RATE);
                let _ = out.extend_from_slice(&millis.to_be_bytes());
            }
            Command::PulseGuide {
                direction,
                length_millis,
            } => {
                let _ = out.push(OP_PULSE_GUIDE);
                let _ = out.push(direction.as_u8());
                let _ = out.extend_from_slice(&length_millis.to_be_bytes());
            }
            Command::SetRaGuideRate { millis } => {
                let _ = out.push(OP_SET_RA_GUIDE_RATE);
                let _ = out.extend_from_slice(&millis.to_be_bytes());
            }
            Command::SetDecGuideRate { millis } => {
                let _ = out.push(OP_SET_DEC_GUIDE_RATE);
                let _ = out.extend_from_slice(&millis.to_be_bytes());
            }
        }
        out
    }
}
