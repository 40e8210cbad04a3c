//! Command acknowledgement record
//!
//! Every inbound datagram is answered with this 18-byte snapshot of the
//! rate state:
//!
//! ```text
//! offset size field
//! 0      1    tracking flag (i8)
//! 1      1    active guide pulse direction (0 = none)
//! 2      4    ra pan rate, milli-cycles (i32)
//! 6      4    dec pan rate, milli-cycles (i32)
//! 10     4    ra guide rate, milli-cycles (i32)
//! 14     4    dec guide rate, milli-cycles (i32)
//! ```

use heapless::Vec;

/// Encoded size of the acknowledgement record
pub const ACK_SIZE: usize = 18;

/// Errors from ack encoding/decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckError {
    /// Output buffer shorter than [`ACK_SIZE`]
    BufferTooSmall,
    /// Input is not exactly [`ACK_SIZE`] bytes
    BadLength,
}

/// Rate-state snapshot returned for every command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ack {
    pub tracking: i8,
    /// Wire value of the active guide pulse, 0 when idle
    pub guide_pulse: u8,
    pub ra_rate_millis: i32,
    pub dec_rate_millis: i32,
    pub ra_guide_rate_millis: i32,
    pub dec_guide_rate_millis: i32,
}

impl Ack {
    /// Encode into the given buffer, returning the bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, AckError> {
        if buffer.len() < ACK_SIZE {
            return Err(AckError::BufferTooSmall);
        }
        buffer[0] = self.tracking as u8;
        buffer[1] = self.guide_pulse;
        buffer[2..6].copy_from_slice(&self.ra_rate_millis.to_be_bytes());
        buffer[6..10].copy_from_slice(&self.dec_rate_millis.to_be_bytes());
        buffer[10..14].copy_from_slice(&self.ra_guide_rate_millis.to_be_bytes());
        buffer[14..18].copy_from_slice(&self.dec_guide_rate_millis.to_be_bytes());
        Ok(ACK_SIZE)
    }

    /// Encode into a heapless Vec
    pub fn encode_to_vec(&self) -> Vec<u8, ACK_SIZE> {
        let mut buffer = [0u8; ACK_SIZE];
        // Infallible: the buffer is exactly ACK_SIZE
        let _ = self.encode(&mut buffer);
        let mut out = Vec::new();
        let _ = out.extend_from_slice(&buffer);
        out
    }

    /// Decode a record previously produced by [`Ack::encode`]
    pub fn decode(buffer: &[u8]) -> Result<Self, AckError> {
        if buffer.len() != ACK_SIZE {
            return Err(AckError::BadLength);
        }
        let read_i32 = |offset: usize| {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&buffer[offset..offset + 4]);
            i32::from_be_bytes(bytes)
        };
        Ok(Self {
            tracking: buffer[0] as i8,
            guide_pulse: buffer[1],
            ra_rate_millis: read_i32(2),
            dec_rate_millis: read_i32(6),
            ra_guide_rate_millis: read_i32(10),
            dec_guide_rate_millis: read_i32(14),
        })
    }
}
