//! # DSP (Digital Signal Processing) Building Blocks
//!
//! - **`delay_line`**: A stereo ring buffer with one shared write head and
//!   fractional, linearly interpolated reads. Both time-based pedals are
//!   built on it.
//!
//! - **`lfo`**: A sine phase accumulator with a right-channel phase offset.
//!
//! - **`overdrive`**: The stateless arctangent waveshaper.
//!
//! - **`modulation`**: Chorus/flanger, an LFO-swept delay line with feedback.
//!
//! - **`delay`**: The echo pedal, a fixed-offset delay line with feedback.

pub mod delay;
pub mod delay_line;
pub mod lfo;
pub mod modulation;
pub mod overdrive;
