//! # Engine (Block Processor)
//!
//! Owns the stateful stages and runs the per-sample loop over one host
//! block. The plugin wrapper in `lib.rs` is a thin adapter around this
//! type; everything here is plain Rust with no host types, which is also
//! what the integration tests drive.
//!
//! ## Signal Chain
//!
//! ```text
//! L ──► [Overdrive] ──┐                                    ┌──► L
//!                     ├──► [Chorus/Flanger] ──► [Delay] ──┤
//! R ──► [Overdrive] ──┘                                    └──► R
//! ```
//!
//! The loop is sample-major: for each sample index the overdrive runs on
//! each channel, then the stereo pair goes through the modulation stage
//! and then the delay. Each stage owns its own delay line, write head and
//! feedback, so enabling both never lets one overwrite the other.
//!
//! Mono blocks feed the single channel into both sides of the stereo
//! stages and keep the left result.

use nih_plug::nih_debug_assert;

use crate::dsp::delay::DelayStage;
use crate::dsp::modulation::ModulationStage;
use crate::dsp::overdrive;
use crate::error::EngineError;
use crate::snapshot::{ModulationType, ParamSnapshot};

/// Length of each ring buffer, in seconds. Matches the delay-time ceiling.
pub const MAX_DELAY_SECONDS: f32 = 2.0;

/// log10 of the -60 dB amplitude ratio (0.001), the level we call silence.
const SILENCE_DB_LOG10: f32 = -3.0;

struct Stages {
    modulation: ModulationStage,
    delay: DelayStage,
}

/// The pedalboard's DSP core.
pub struct Engine {
    sample_rate: f32,
    max_block_size: usize,
    channels: usize,
    /// `None` until `prepare()` succeeds. An unprepared engine passes
    /// audio through.
    stages: Option<Stages>,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            max_block_size: 0,
            channels: 2,
            stages: None,
        }
    }
}

impl Engine {
    /// Create an unprepared engine. Call [`prepare()`](Self::prepare)
    /// before processing audio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate zeroed ring buffers for `sample_rate` and reset all state.
    ///
    /// This is the only place the engine allocates. Hosts call it (through
    /// `Plugin::initialize`) whenever the sample rate or block size changes.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        channels: usize,
    ) -> Result<(), EngineError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(EngineError::ZeroBlockSize);
        }
        if !(1..=2).contains(&channels) {
            return Err(EngineError::UnsupportedChannelCount(channels));
        }

        // Round up so the longest delay-time setting always fits, even at
        // fractional sample rates.
        let buffer_len = (sample_rate * MAX_DELAY_SECONDS).ceil() as usize;
        if buffer_len == 0 {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.channels = channels;
        self.stages = Some(Stages {
            modulation: ModulationStage::new(buffer_len, sample_rate),
            delay: DelayStage::new(buffer_len, sample_rate),
        });

        Ok(())
    }

    /// Clear buffers, heads, feedback and LFO phase without reallocating.
    pub fn reset(&mut self) {
        if let Some(stages) = &mut self.stages {
            stages.modulation.reset();
            stages.delay.reset();
        }
    }

    /// Whether `prepare()` has allocated the ring buffers.
    pub fn is_prepared(&self) -> bool {
        self.stages.is_some()
    }

    /// Sample rate passed to the last successful `prepare()`.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Channel count passed to the last successful `prepare()`.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Ring buffer length per channel, or 0 before `prepare()`.
    pub fn buffer_len(&self) -> usize {
        self.stages
            .as_ref()
            .map_or(0, |stages| stages.delay.delay_line().len())
    }

    /// The chorus/flanger stage, once prepared.
    pub fn modulation(&self) -> Option<&ModulationStage> {
        self.stages.as_ref().map(|stages| &stages.modulation)
    }

    /// The delay stage, once prepared.
    pub fn delay(&self) -> Option<&DelayStage> {
        self.stages.as_ref().map(|stages| &stages.delay)
    }

    /// Process one block in place.
    ///
    /// `channels` holds one slice per output channel, all the same length.
    /// The first `num_input_channels` carry input audio; any output
    /// channel past that, and any channel past stereo, is zeroed.
    pub fn process_block(
        &mut self,
        channels: &mut [&mut [f32]],
        num_input_channels: usize,
        params: ParamSnapshot,
    ) {
        let active = num_input_channels.min(channels.len()).min(2);
        for channel in channels.iter_mut().skip(active) {
            channel.fill(0.0);
        }

        let Some(stages) = &mut self.stages else {
            return;
        };

        let (left_channel, rest) = match channels.split_first_mut() {
            Some(split) if active > 0 => split,
            _ => return,
        };
        let mut right_channel = if active == 2 {
            rest.first_mut()
        } else {
            None
        };

        nih_debug_assert!(left_channel.len() <= self.max_block_size);

        for i in 0..left_channel.len() {
            let mut left = overdrive::process(left_channel[i], &params.overdrive);
            let mut right = match right_channel.as_deref() {
                Some(right_channel) => overdrive::process(right_channel[i], &params.overdrive),
                None => left,
            };

            (left, right) = stages.modulation.process(left, right, &params.modulation);
            (left, right) = stages.delay.process(left, right, &params.delay);

            left_channel[i] = left;
            if let Some(right_channel) = right_channel.as_deref_mut() {
                right_channel[i] = right;
            }
        }
    }

    /// How many samples of output remain after the input goes silent,
    /// or `None` when no time-based stage is enabled.
    ///
    /// Each enabled stage contributes `period · repeats`, where `repeats`
    /// is how many trips round the feedback loop it takes to fall 60 dB.
    pub fn tail_samples(&self, params: &ParamSnapshot) -> Option<u32> {
        let mut tail = None;

        if params.modulation.enabled {
            let (_, max_window) = ModulationType::Chorus.delay_range_seconds();
            let period = max_window * self.sample_rate;
            tail = Some(decay_tail(period, params.modulation.feedback));
        }

        if params.delay.enabled {
            let period = params.delay.time * self.sample_rate;
            let delay_tail = decay_tail(period, params.delay.feedback);
            tail = Some(tail.unwrap_or(0).saturating_add(delay_tail));
        }

        tail
    }
}

/// Tail length of one feedback loop with the given period.
///
/// After N repeats the level is `feedback^N`; solving
/// `feedback^N = 0.001` gives `N = -3 / log10(feedback)`.
fn decay_tail(period_samples: f32, feedback: f32) -> u32 {
    if feedback > 0.001 {
        let repeats = SILENCE_DB_LOG10 / feedback.log10();
        (repeats * period_samples) as u32
    } else {
        period_samples as u32
    }
}
