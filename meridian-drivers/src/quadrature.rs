//! Quadrature encoder edge decoder
//!
//! Decodes the two interrupt lines of an incremental encoder into a signed
//! count and a direction flag. Every edge on either line counts one pulse
//! in the current direction; a rising edge on line A samples line B to
//! detect direction changes. The decoder itself holds no angle knowledge -
//! its events are fed into the position tracker by the interrupt handler.

use meridian_core::traits::Direction;

/// Which encoder line an edge arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderLine {
    A,
    B,
}

/// Decoded consequence of one edge
///
/// `previous_count` is the count before the edge was applied; backlash
/// tracking anchors on it when a direction change is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderStep {
    pub previous_count: i32,
    pub count: i32,
    pub step: i8,
    pub direction_change: Option<Direction>,
}

/// Edge-fed decoder state for one encoder
///
/// Owned by the edge interrupt handler; the count and direction getters
/// are safe to read from other contexts through a shared snapshot.
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    count: i32,
    positive: bool,
    running: bool,
    reverse: bool,
}

impl QuadratureDecoder {
    pub fn new(reverse: bool) -> Self {
        Self {
            count: 0,
            positive: true,
            running: true,
            reverse,
        }
    }

    /// Decode one edge; `a_high`/`b_high` are the line levels at the edge
    ///
    /// Returns `None` while paused.
    pub fn edge(&mut self, line: EncoderLine, a_high: bool, b_high: bool) -> Option<EncoderStep> {
        if !self.running {
            return None;
        }

        let mut direction_change = None;
        if line == EncoderLine::A && a_high {
            let positive = b_high != self.reverse;
            if positive != self.positive {
                direction_change = Some(if positive {
                    Direction::Positive
                } else {
                    Direction::Negative
                });
            }
            self.positive = positive;
        }

        let step: i8 = if self.positive { 1 } else { -1 };
        let previous_count = self.count;
        self.count += step as i32;

        Some(EncoderStep {
            previous_count,
            count: self.count,
            step,
            direction_change,
        })
    }

    /// Stop decoding; edges are ignored until resumed
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Zero the raw count
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Raw pulse count since start or the last clear
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Current decoded direction
    pub fn direction(&self) -> Direction {
        if self.positive {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }
}
