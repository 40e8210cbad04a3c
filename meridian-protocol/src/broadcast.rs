//! Mount status broadcast record
//!
//! Periodically pushed to listening clients; 32 bytes, all multi-byte
//! fields big-endian:
//!
//! ```text
//! offset size field
//! 0      4    origin address (u32)
//! 4      2    origin port (u16)
//! 6      4    ra angle, day-millis (i32)
//! 10     4    dec sky angle, day-millis (i32)
//! 14     1    slewing flag
//! 15     1    tracking flag
//! 16     4    ra rate, milli-cycles (i32)
//! 20     4    dec rate, milli-cycles (i32)
//! 24     1    side of pier (0 normal, 1 flipped)
//! 25     4    focuser max steps (u32)
//! 29     2    focuser nanos per step (u16)
//! 31     1    focuser running flag
//! ```

use heapless::Vec;

/// Encoded size of the status record
pub const BROADCAST_SIZE: usize = 32;

/// Errors from broadcast encoding/decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BroadcastError {
    /// Output buffer shorter than [`BROADCAST_SIZE`]
    BufferTooSmall,
    /// Input is not exactly [`BROADCAST_SIZE`] bytes
    BadLength,
}

/// Complete mount status as pushed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusBroadcast {
    /// Controller address, so clients learn where to send commands
    pub address: u32,
    pub port: u16,
    pub ra_millis: i32,
    pub dec_millis: i32,
    pub slewing: bool,
    pub tracking: bool,
    pub ra_rate_millis: i32,
    pub dec_rate_millis: i32,
    /// 0 normal, 1 flipped (beyond the pole)
    pub side_of_pier: u8,
    pub focuser_max_steps: u32,
    pub focuser_nanos_per_step: u16,
    pub focuser_running: bool,
}

impl StatusBroadcast {
    /// Encode into the given buffer, returning the bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, BroadcastError> {
        if buffer.len() < BROADCAST_SIZE {
            return Err(BroadcastError::BufferTooSmall);
        }
        buffer[0..4].copy_from_slice(&self.address.to_be_bytes());
        buffer[4..6].copy_from_slice(&self.port.to_be_bytes());
        buffer[6..10].copy_from_slice(&self.ra_millis.to_be_bytes());
        buffer[10..14].copy_from_slice(&self.dec_millis.to_be_bytes());
        buffer[14] = self.slewing as u8;
        buffer[15] = self.tracking as u8;
        buffer[16..20].copy_from_slice(&self.ra_rate_millis.to_be_bytes());
        buffer[20..24].copy_from_slice(&self.dec_rate_millis.to_be_bytes());
        buffer[24] = self.side_of_pier;
        buffer[25..29].copy_from_slice(&self.focuser_max_steps.to_be_bytes());
        buffer[29..31].copy_from_slice(&self.focuser_nanos_per_step.to_be_bytes());
        buffer[31] = self.focuser_running as u8;
        Ok(BROADCAST_SIZE)
    }

    /// Encode into a heapless Vec
    pub fn encode_to_vec(&self) -> Vec<u8, BROADCAST_SIZE> {
        let mut buffer = [0u8; BROADCAST_SIZE];
        // Infallible: the buffer is exactly BROADCAST_SIZE
        let _ = self.encode(&mut buffer);
        let mut out = Vec::new();
        let _ = out.extend_from_slice(&buffer);
        out
    }

    /// Decode a record previously produced by [`StatusBroadcast::encode`]
    pub fn decode(buffer: &[u8]) -> Result<Self, BroadcastError> {
        if buffer.len() != BROADCAST_SIZE {
            return Err(BroadcastError::BadLength);
        }
        let read_u32 = |offset: usize| {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&buffer[offset..offset + 4]);
            u32::from_be_bytes(bytes)
        };
        Ok(Self {
            address: read_u32(0),
            port: u16::from_be_bytes([buffer[4], buffer[5]]),
            ra_millis: read_u32(6) as i32,
            dec_millis: read_u32(10) as i32,
            slewing: buffer[14] != 0,
            tracking: buffer[15] != 0,
            ra_rate_millis: read_u32(16) as i32,
            dec_rate_millis: read_u32(20) as i32,
            side_of_pier: buffer[24],
            focuser_max_steps: read_u32(25),
            focuser_nanos_per_step: u16::from_be_bytes([buffer[29], buffer[30]]),
            focuser_running: buffer[31] != 0,
        })
    }
}
