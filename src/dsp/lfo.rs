//! # Low-Frequency Oscillator
//!
//! A sine LFO driven by a phase accumulator. One phase feeds both stereo
//! sides: the left side reads the phase directly, the right side reads it
//! shifted by a phase offset, which is what gives the chorus its width.
//!
//! ```text
//! left  = sin(2π · phase)
//! right = sin(2π · ((phase + offset) mod 1))
//! ```
//!
//! The phase advances by `rate / sample_rate` per sample and wraps by a
//! single subtraction of 1.0, like a sawtooth. Rates faster than the
//! sample rate are not fully wrapped; the plugin caps rate at 10 Hz so
//! that never happens.

use std::f32::consts::TAU;

/// Phase accumulator producing a sine in `[-1, 1]`.
#[derive(Debug, Clone, Default)]
pub struct Lfo {
    /// Current phase in `[0, 1)`.
    phase: f32,
}

impl Lfo {
    /// Create an oscillator at phase 0, where the left output is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase, in cycles.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// LFO value for the left channel.
    pub fn next_left(&self) -> f32 {
        (TAU * self.phase).sin()
    }

    /// LFO value for the right channel, shifted by `phase_offset` cycles.
    pub fn next_right(&self, phase_offset: f32) -> f32 {
        let mut phase = self.phase + phase_offset;
        if phase >= 1.0 {
            phase -= 1.0;
        }
        (TAU * phase).sin()
    }

    /// Move the phase forward by one sample at `rate` Hz.
    pub fn advance(&mut self, rate: f32, sample_rate: f32) {
        self.phase += rate / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }

    /// Rewind to phase 0, as on a transport reset.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
