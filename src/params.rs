//! # Plugin Parameters
//!
//! The knobs and switches the user sees in the DAW, grouped by pedal.
//! Each parameter has:
//!
//! - A **unique string ID** (`#[id = "..."]`) that the host uses to
//!   save and recall presets. These IDs are shared with earlier
//!   PDLBOARD releases, so never change them or existing sessions will
//!   lose their settings.
//! - A **human-readable name** shown in the DAW's UI.
//! - A **range** and a **default value**.
//!
//! ## No Smoothing
//!
//! The engine reads every parameter once per block through
//! [`PluginParams::snapshot()`] and holds those values for the whole
//! block. That keeps each block deterministic: a knob moved halfway
//! through a block takes effect at the start of the next one. Because
//! `SAMPLE_ACCURATE_AUTOMATION` is on, nih-plug splits blocks at
//! automation points, so automated moves still land on the right sample.

use nih_plug::prelude::*;

use crate::engine::MAX_DELAY_SECONDS;
use crate::snapshot::{
    DelaySettings, ModulationSettings, ModulationType, OverdriveSettings, ParamSnapshot,
};

/// Every user-facing parameter of the pedalboard.
#[derive(Params)]
pub struct PluginParams {
    #[nested(group = "Distortion")]
    pub overdrive: OverdriveParams,

    #[nested(group = "Chorus")]
    pub modulation: ModulationParams,

    #[nested(group = "Delay")]
    pub delay: DelayParams,
}

/// Overdrive pedal.
#[derive(Params)]
pub struct OverdriveParams {
    /// **Overdrive** — how hard the signal is pushed into the arctangent
    /// curve, together with Range.
    #[id = "overdrive"]
    pub drive: FloatParam,

    /// **Range** — multiplier on drive. At 300 with full drive, even
    /// quiet picking is squared off.
    #[id = "range"]
    pub range: FloatParam,

    /// **Blend** — 0 is fully clean, 1 is fully shaped.
    #[id = "blend"]
    pub blend: FloatParam,

    /// **Volume** — makeup gain after the waveshaper.
    #[id = "volume"]
    pub volume: FloatParam,

    #[id = "onoff1"]
    pub enabled: BoolParam,
}

/// Chorus/flanger pedal.
#[derive(Params)]
pub struct ModulationParams {
    #[id = "dry/wet1"]
    pub dry_wet: FloatParam,

    /// **Depth** — how far the LFO sweeps the delay window.
    #[id = "depth"]
    pub depth: FloatParam,

    /// **Rate** — LFO speed in Hz.
    #[id = "rate"]
    pub rate: FloatParam,

    /// **Phase Offset** — right-channel LFO lead in cycles. 0 is mono
    /// modulation, 0.5 swings the channels in opposite directions.
    #[id = "offset"]
    pub phase_offset: FloatParam,

    /// **Feedback** — capped at 0.98 so the loop always decays.
    #[id = "feedback1"]
    pub feedback: FloatParam,

    #[id = "type"]
    pub kind: EnumParam<ModulationType>,

    #[id = "onoff2"]
    pub enabled: BoolParam,
}

/// Delay pedal.
#[derive(Params)]
pub struct DelayParams {
    #[id = "dry/wet2"]
    pub dry_wet: FloatParam,

    /// **Feedback** — capped at 0.98 so the repeats always decay.
    #[id = "feedback2"]
    pub feedback: FloatParam,

    /// **Delay** — time between repeats, up to the full ring buffer.
    #[id = "delaytime"]
    pub time: FloatParam,

    #[id = "onoff3"]
    pub enabled: BoolParam,
}

impl PluginParams {
    /// Copy every current value into a [`ParamSnapshot`] for one block.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            overdrive: OverdriveSettings {
                enabled: self.overdrive.enabled.value(),
                drive: self.overdrive.drive.value(),
                range: self.overdrive.range.value(),
                blend: self.overdrive.blend.value(),
                volume: self.overdrive.volume.value(),
            },
            modulation: ModulationSettings {
                enabled: self.modulation.enabled.value(),
                dry_wet: self.modulation.dry_wet.value(),
                depth: self.modulation.depth.value(),
                rate: self.modulation.rate.value(),
                phase_offset: self.modulation.phase_offset.value(),
                feedback: self.modulation.feedback.value(),
                kind: self.modulation.kind.value(),
            },
            delay: DelaySettings {
                enabled: self.delay.enabled.value(),
                dry_wet: self.delay.dry_wet.value(),
                feedback: self.delay.feedback.value(),
                time: self.delay.time.value(),
            },
        }
    }
}

/// All continuous knobs move in 0.01 steps.
fn knob(name: &str, default: f32, min: f32, max: f32) -> FloatParam {
    FloatParam::new(name, default, FloatRange::Linear { min, max }).with_step_size(0.01)
}

fn percentage_knob(name: &str, default: f32, max: f32) -> FloatParam {
    knob(name, default, 0.0, max)
        .with_unit("%")
        .with_value_to_string(formatters::v2s_f32_percentage(0))
        .with_string_to_value(formatters::s2v_f32_percentage())
}

impl Default for PluginParams {
    fn default() -> Self {
        Self {
            overdrive: OverdriveParams::default(),
            modulation: ModulationParams::default(),
            delay: DelayParams::default(),
        }
    }
}

impl Default for OverdriveParams {
    fn default() -> Self {
        Self {
            drive: knob("Overdrive", 0.5, 0.0, 1.0),
            range: knob("Range", 0.5, 0.0, 300.0),
            blend: percentage_knob("Blend", 0.5, 1.0),
            volume: knob("Volume", 0.5, 0.0, 3.0),
            enabled: BoolParam::new("On / Off", false),
        }
    }
}

impl Default for ModulationParams {
    fn default() -> Self {
        Self {
            dry_wet: percentage_knob("Dry / Wet", 0.5, 1.0),
            depth: percentage_knob("Depth", 0.5, 1.0),
            rate: knob("Rate", 0.5, 0.0, 10.0).with_unit(" Hz"),
            phase_offset: knob("Phase Offset", 0.0, 0.0, 1.0),
            // Capped below 1.0 for stability.
            feedback: percentage_knob("Feedback", 0.5, 0.98),
            kind: EnumParam::new("Type", ModulationType::Chorus),
            enabled: BoolParam::new("On / Off", false),
        }
    }
}

impl Default for DelayParams {
    fn default() -> Self {
        Self {
            dry_wet: percentage_knob("Dry / Wet", 0.5, 1.0),
            feedback: percentage_knob("Feedback", 0.5, 0.98),
            time: knob("Delay", 0.5, 0.0, MAX_DELAY_SECONDS).with_unit(" s"),
            enabled: BoolParam::new("On / Off", false),
        }
    }
}
