//! # Delay Line (Stereo Ring Buffer)
//!
//! A delay line stores audio samples and lets you read them back after a
//! specified time delay. Both time-based stages of the pedalboard are
//! built on it: the chorus/flanger reads at an LFO-swept offset, the
//! delay reads at a fixed offset. Each stage owns its own instance.
//!
//! ## How a Ring Buffer Works
//!
//! Imagine a circular tape loop. A "write head" records incoming audio
//! onto the tape, and a "read head" plays it back from a position further
//! behind on the tape. The distance between the two heads determines the
//! delay time.
//!
//! Here the tape has two tracks (left and right) that share one write
//! head. Each processed sample follows the same protocol:
//!
//! 1. Write the new sample for each channel at `write_pos`.
//! 2. Read each channel at `write_pos - offset`, wrapped into the buffer.
//! 3. Advance `write_pos` by 1, wrapping back to 0 at the end.
//!
//! Because the write happens first, an offset of 0 reads back the sample
//! that was just written.
//!
//! ## Linear Interpolation
//!
//! The read position is fractional. With `x` the integer part and `frac`
//! the remainder, we blend the slot at `x` with the slot after it:
//!
//! ```text
//! result = buffer[x] * (1 - frac) + buffer[x + 1] * frac
//! ```
//!
//! For position 441.3:
//! - `buffer[441]` gets weight 0.7
//! - `buffer[442]` gets weight 0.3
//!
//! When `frac` is exactly 0 the formula collapses to `buffer[x]`, so
//! whole-sample offsets are read back bit-exact.

use nih_plug::nih_debug_assert;

/// One side of the stereo pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Left,
    Right,
}

impl Channel {
    const fn index(self) -> usize {
        match self {
            Channel::Left => 0,
            Channel::Right => 1,
        }
    }
}

/// A two-channel ring buffer with a shared write head.
///
/// The buffers are allocated once in [`new()`](Self::new) and never
/// resized afterwards, so nothing in the read/write/advance path can
/// allocate.
pub struct StereoDelayLine {
    /// One circular buffer per channel. All values start at 0.0.
    buffers: [Vec<f32>; 2],

    /// Current write position, always in `[0, buffer_len)`.
    write_pos: usize,

    /// Cached buffer length.
    buffer_len: usize,
}

impl StereoDelayLine {
    /// Create a zeroed delay line holding `length` samples per channel.
    ///
    /// A zero length is rounded up to one slot so the modular arithmetic
    /// never divides by zero. `Engine::prepare` rejects configurations
    /// that would get here with zero anyway.
    pub fn new(length: usize) -> Self {
        let length = length.max(1);
        Self {
            buffers: [vec![0.0; length], vec![0.0; length]],
            write_pos: 0,
            buffer_len: length,
        }
    }

    /// Number of samples stored per channel.
    pub fn len(&self) -> usize {
        self.buffer_len
    }

    /// Current write head position.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Store `sample` at the write head for `channel`.
    ///
    /// **Important:** This does NOT advance the write position. Call
    /// [`advance()`](Self::advance) once per sample, after both channels
    /// have been written and read.
    pub fn write(&mut self, channel: Channel, sample: f32) {
        self.buffers[channel.index()][self.write_pos] = sample;
    }

    /// Read `offset` samples behind the write head with linear
    /// interpolation.
    ///
    /// `offset` is clamped to `[0, len]`, so a single wrap by the buffer
    /// length always lands the read position back inside the ring.
    pub fn read_interpolated(&self, channel: Channel, offset: f32) -> f32 {
        let len = self.buffer_len as f32;

        // An offset a fraction past `len` (e.g. 2 s at a fractional sample
        // rate) would leave `read_pos` negative after the wrap.
        let offset = offset.clamp(0.0, len);

        let mut read_pos = self.write_pos as f32 - offset;
        if read_pos < 0.0 {
            read_pos += len;
        }

        // Split into integer and fractional parts. Rounding in the wrap
        // above can land a hair below `len` onto exactly `len`, which is
        // the same slot as 0 on the ring.
        let mut x = read_pos as usize;
        let frac = read_pos - x as f32;
        if x >= self.buffer_len {
            x -= self.buffer_len;
        }
        let mut x1 = x + 1;
        if x1 >= self.buffer_len {
            x1 -= self.buffer_len;
        }

        nih_debug_assert!(x < self.buffer_len && x1 < self.buffer_len);

        let buffer = &self.buffers[channel.index()];
        (1.0 - frac) * buffer[x] + frac * buffer[x1]
    }

    /// Advance the write position by one sample, wrapping at the end.
    pub fn advance(&mut self) {
        self.write_pos += 1;
        if self.write_pos >= self.buffer_len {
            self.write_pos = 0;
        }
    }

    /// Clear both buffers to silence and reset the write position.
    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
        self.write_pos = 0;
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
