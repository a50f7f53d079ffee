//! Per-tick encoder delta reads with configurable direction.

use crate::controls::EncoderSource;

/// Reads one encoder's accumulated steps, applying direction reversal.
///
/// Reversal is runtime-settable because it typically comes from persisted
/// user settings loaded after the hardware is up.
pub struct EncoderReader<E: EncoderSource> {
    source: E,
    reversed: bool,
}

impl<E: EncoderSource> EncoderReader<E> {
    /// Wraps an encoder source.
    pub fn new(source: E, reversed: bool) -> Self {
        Self { source, reversed }
    }

    /// Sets logical direction reversal.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// Returns true if the direction is reversed.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Drains the step accumulator and returns the signed delta for this
    /// tick. Returns 0 when the encoder did not move.
    pub fn read(&mut self) -> i32 {
        let delta = self.source.take_steps();
        if self.reversed { -delta } else { delta }
    }
}
