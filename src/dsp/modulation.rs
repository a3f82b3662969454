//! # Chorus / Flanger
//!
//! Both effects are a short delay whose length is swept by an LFO. The
//! only difference is the window the sweep covers (see
//! [`ModulationType::delay_range_seconds`]).
//!
//! ```text
//! in ──(+)──► [StereoDelayLine] ──► wet ──┬── × dry_wet ──►(+)──► out
//!       ▲        read offset =            │                 ▲
//!       │        map(lfo · depth) · sr    │                 │
//!       └──────── × feedback ◄────────────┘   in × (1 - dry_wet)
//! ```
//!
//! Per sample, for each channel:
//!
//! 1. Write `input + feedback` at the write head.
//! 2. Take the LFO value (right side phase-shifted), scale by `depth`,
//!    and map `[-1, 1]` linearly onto the delay window in seconds.
//! 3. Convert to samples and read the delay line with interpolation.
//! 4. Store `wet · feedback` for the next sample's write.
//!
//! Then the write head and the LFO each advance once, and the output is a
//! linear dry/wet crossfade.

use super::delay_line::{Channel, StereoDelayLine};
use super::lfo::Lfo;
use crate::snapshot::{ModulationSettings, ModulationType};

/// LFO-swept stereo delay with feedback.
pub struct ModulationStage {
    delay_line: StereoDelayLine,
    lfo: Lfo,
    /// `[left, right]` feedback carried to the next sample.
    feedback: [f32; 2],
    sample_rate: f32,
}

impl ModulationStage {
    /// Allocate a stage with `buffer_len` samples of history per channel.
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        Self {
            delay_line: StereoDelayLine::new(buffer_len),
            lfo: Lfo::new(),
            feedback: [0.0; 2],
            sample_rate,
        }
    }

    /// The oscillator sweeping the read offset. Its phase persists across
    /// blocks.
    pub fn lfo(&self) -> &Lfo {
        &self.lfo
    }

    /// The ring buffer this stage writes into and reads back from.
    pub fn delay_line(&self) -> &StereoDelayLine {
        &self.delay_line
    }

    /// Read offsets in samples for the current LFO position, `[left, right]`.
    pub fn read_offsets(&self, settings: &ModulationSettings) -> [f32; 2] {
        let left = self.lfo.next_left() * settings.depth;
        let right = self.lfo.next_right(settings.phase_offset) * settings.depth;
        [
            lfo_to_seconds(left, settings.kind) * self.sample_rate,
            lfo_to_seconds(right, settings.kind) * self.sample_rate,
        ]
    }

    /// Process one stereo frame. A disabled stage passes the frame through
    /// and leaves its buffer, head, feedback and LFO untouched.
    pub fn process(&mut self, left: f32, right: f32, settings: &ModulationSettings) -> (f32, f32) {
        if !settings.enabled {
            return (left, right);
        }

        // Step 1: WRITE the input plus last sample's feedback.
        self.delay_line.write(Channel::Left, left + self.feedback[0]);
        self.delay_line.write(Channel::Right, right + self.feedback[1]);

        // Step 2: SWEEP. The LFO picks where in the 1-30 ms window each
        // channel reads this sample. One phase step per frame drives both
        // channels; the right side just looks at it through the offset.
        let [offset_left, offset_right] = self.read_offsets(settings);
        self.lfo.advance(settings.rate, self.sample_rate);

        // Step 3: READ the delayed sample. The offset is almost never a
        // whole number of samples, so this interpolates.
        let wet_left = self.delay_line.read_interpolated(Channel::Left, offset_left);
        let wet_right = self.delay_line.read_interpolated(Channel::Right, offset_right);

        // Step 4: FEEDBACK. Scale the wet signal and hold it for the next
        // sample's write. High feedback on the flanger gives the metallic
        // resonant sweep.
        self.feedback = [wet_left * settings.feedback, wet_right * settings.feedback];

        // Step 5: ADVANCE the write head, once for both channels.
        self.delay_line.advance();

        // Step 6: MIX dry and wet with a linear crossfade.
        let dry_amount = 1.0 - settings.dry_wet;
        (
            left * dry_amount + wet_left * settings.dry_wet,
            right * dry_amount + wet_right * settings.dry_wet,
        )
    }

    /// Silence the buffer, drop pending feedback and rewind the LFO.
    pub fn reset(&mut self) {
        self.delay_line.clear();
        self.lfo.reset();
        self.feedback = [0.0; 2];
    }
}

/// Linear map of an LFO value in `[-1, 1]` onto the window for `kind`.
fn lfo_to_seconds(value: f32, kind: ModulationType) -> f32 {
    let (min, max) = kind.delay_range_seconds();
    min + (value + 1.0) * 0.5 * (max - min)
}
