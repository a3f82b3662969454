//! # Parameter Snapshot
//!
//! The DSP engine never touches the host-facing [`Params`] types. Once per
//! processed block the plugin copies every knob's current value into a
//! [`ParamSnapshot`] and hands that to the engine by value. The whole
//! sample loop then sees one consistent set of values, no matter what the
//! UI or automation thread does in the meantime.
//!
//! [`Params`]: nih_plug::prelude::Params

use nih_plug::prelude::Enum;

/// Which delay-time window the modulation stage sweeps.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModulationType {
    /// 5 ms to 30 ms: audible doubling and shimmer.
    #[default]
    Chorus,
    /// 1 ms to 5 ms: comb-filter sweep.
    Flanger,
}

impl ModulationType {
    /// Delay window in seconds that an LFO swing of `[-1, 1]` maps onto.
    pub const fn delay_range_seconds(self) -> (f32, f32) {
        match self {
            ModulationType::Chorus => (0.005, 0.03),
            ModulationType::Flanger => (0.001, 0.005),
        }
    }
}

/// Overdrive controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverdriveSettings {
    pub enabled: bool,
    /// 0..1
    pub drive: f32,
    /// 0..300, multiplies drive before the waveshaper.
    pub range: f32,
    /// 0..1, shaped vs. clean balance.
    pub blend: f32,
    /// 0..3, makeup gain.
    pub volume: f32,
}

/// Chorus/flanger controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulationSettings {
    pub enabled: bool,
    pub dry_wet: f32,
    pub depth: f32,
    /// LFO rate in Hz, 0..10.
    pub rate: f32,
    /// Right-channel LFO phase offset in cycles, 0..1.
    pub phase_offset: f32,
    /// 0..0.98
    pub feedback: f32,
    pub kind: ModulationType,
}

/// Delay controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaySettings {
    pub enabled: bool,
    pub dry_wet: f32,
    /// 0..0.98
    pub feedback: f32,
    /// Delay time in seconds, 0..2.
    pub time: f32,
}

/// Every control value the engine needs for one block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParamSnapshot {
    pub overdrive: OverdriveSettings,
    pub modulation: ModulationSettings,
    pub delay: DelaySettings,
}

// Defaults mirror the plugin's parameter defaults: every stage off, knobs
// at their resting positions.

impl Default for OverdriveSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            drive: 0.5,
            range: 0.5,
            blend: 0.5,
            volume: 0.5,
        }
    }
}

impl Default for ModulationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            dry_wet: 0.5,
            depth: 0.5,
            rate: 0.5,
            phase_offset: 0.0,
            feedback: 0.5,
            kind: ModulationType::Chorus,
        }
    }
}

impl Default for DelaySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            dry_wet: 0.5,
            feedback: 0.5,
            time: 0.5,
        }
    }
}
