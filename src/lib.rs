//! # PDLBOARD — A Guitar Pedalboard Plugin (AU/VST3/CLAP)
//!
//! Three pedals in a fixed chain, built with
//! [nih-plug](https://github.com/robbert-vdh/nih-plug): an arctangent
//! overdrive, an LFO-swept chorus/flanger, and a feedback delay. Each pedal
//! has its own on/off switch and knobs.
//!
//! ## Signal Flow
//!
//! ```text
//! Input ──► Overdrive ──► Chorus / Flanger ──► Delay ──► Output
//!          (per channel)    (stereo pair)      (stereo pair)
//!
//! Chorus / Flanger and Delay share the same shape:
//!
//! in ──┬──────────────────────────────────── × (1 - dry/wet) ──┐
//!      │                                                       │
//!      └──►(+)──► [Ring Buffer] ──► read @ offset ──┬─ × dry/wet ─►(+)──► out
//!           ▲                                       │
//!           └──────────────── × feedback ◄──────────┘
//!
//! offset = LFO-swept 1-30 ms (chorus/flanger) or the Delay knob (delay)
//! ```
//!
//! The DSP lives in [`engine`] and [`dsp`] and has no host types in it.
//! This file only adapts the engine to nih-plug's `Plugin` trait.

pub mod dsp;
pub mod engine;
pub mod error;
pub mod params;
pub mod snapshot;

use std::num::NonZeroU32;
use std::sync::Arc;

use engine::Engine;
use nih_plug::prelude::*;
use params::PluginParams;

/// The plugin struct.
///
/// Parameters (`PluginParams`) are shared with the host via `Arc` and can
/// be read from any thread. The engine is owned exclusively by the audio
/// thread and only touched in `initialize()`, `reset()` and `process()`.
pub struct Pdlboard {
    params: Arc<PluginParams>,
    engine: Engine,
}

impl Default for Pdlboard {
    fn default() -> Self {
        Self {
            params: Arc::new(PluginParams::default()),
            // Unprepared until initialize() tells us the sample rate.
            engine: Engine::new(),
        }
    }
}

impl Plugin for Pdlboard {
    const NAME: &'static str = "PDLBOARD";
    const VENDOR: &'static str = "Loveless Audio";
    const URL: &'static str = "";
    const EMAIL: &'static str = "steve.loveless@gmail.com";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // Stereo first since most DAW tracks are stereo, then mono. Any other
    // layout is refused by the host before we ever see a buffer.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
    ];

    const MIDI_INPUT: MidiConfig = MidiConfig::None;

    // Blocks are split at automation points, and each piece gets its own
    // parameter snapshot.
    const SAMPLE_ACCURATE_AUTOMATION: bool = true;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    /// Allocate the ring buffers for the negotiated sample rate.
    ///
    /// Returning `false` tells the host this configuration is unusable.
    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        let num_channels = audio_io_layout
            .main_input_channels
            .map(|c| c.get() as usize)
            .unwrap_or(2);

        match self.engine.prepare(
            buffer_config.sample_rate,
            buffer_config.max_buffer_size as usize,
            num_channels,
        ) {
            Ok(()) => {
                nih_log!(
                    "prepared for {} Hz, {} channel(s), {} samples of delay per channel",
                    buffer_config.sample_rate,
                    num_channels,
                    self.engine.buffer_len()
                );
                true
            }
            Err(err) => {
                nih_error!("cannot initialize: {err}");
                false
            }
        }
    }

    /// Called when playback stops or the plugin is bypassed. Clears the
    /// ring buffers so stale echoes don't bleed into the next playback.
    fn reset(&mut self) {
        self.engine.reset();
    }

    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        // One snapshot for the whole block.
        let snapshot = self.params.snapshot();

        // nih-plug processes in place: input and output share channels.
        let num_channels = buffer.channels();
        self.engine
            .process_block(buffer.as_slice(), num_channels, snapshot);

        // Keep the host calling process() while echoes ring out after the
        // input stops.
        match self.engine.tail_samples(&snapshot) {
            Some(tail) => ProcessStatus::Tail(tail),
            None => ProcessStatus::Normal,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Plugin format trait implementations
// ─────────────────────────────────────────────────────────────────────

impl ClapPlugin for Pdlboard {
    const CLAP_ID: &'static str = "com.loveless-audio.pdlboard";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("Overdrive, chorus/flanger and delay in one guitar pedalboard");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Mono,
        ClapFeature::Distortion,
        ClapFeature::Chorus,
        ClapFeature::Flanger,
        ClapFeature::Delay,
    ];
}

impl Vst3Plugin for Pdlboard {
    // The `*b"..."` syntax turns a 16-character ASCII literal into `[u8; 16]`.
    const VST3_CLASS_ID: [u8; 16] = *b"LvlssPdlboardv01";

    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] = &[
        Vst3SubCategory::Fx,
        Vst3SubCategory::Distortion,
        Vst3SubCategory::Modulation,
        Vst3SubCategory::Delay,
    ];
}

// ─────────────────────────────────────────────────────────────────────
// Export macros
// ─────────────────────────────────────────────────────────────────────
//
// nih_export_clap! exports the `clap_entry` symbol for CLAP hosts.
// nih_export_vst3! exports `GetPluginFactory` for VST3 hosts.
// clap_wrapper re-exports the CLAP entry point as AUv2 for Logic Pro.

nih_export_clap!(Pdlboard);
nih_export_vst3!(Pdlboard);

clap_wrapper::export_auv2!();
