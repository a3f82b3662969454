//! # Overdrive
//!
//! A stateless arctangent waveshaper with a clean-blend and makeup volume.
//!
//! ```text
//! shaped = atan(x · drive · range) · 2/π        // soft clip into (-1, 1)
//! mixed  = (shaped · blend + x · (1 - blend)) / 2
//! out    = mixed · volume
//! ```
//!
//! `drive · range` sets how hard the signal hits the curve: near 0 the
//! arctangent is almost linear, at a few hundred it is close to a square
//! wave. The halving keeps a fully blended signal in roughly the same
//! level range as the input, and `volume` (0..3) makes up the difference.
//!
//! There is no state, so each channel is processed independently with the
//! same function. Extreme settings may saturate; that is accepted output.

use std::f32::consts::FRAC_2_PI;

use crate::snapshot::OverdriveSettings;

/// Run one sample through the overdrive. Returns `x` untouched when the
/// stage is disabled.
pub fn process(x: f32, settings: &OverdriveSettings) -> f32 {
    if !settings.enabled {
        return x;
    }

    let shaped = (x * settings.drive * settings.range).atan() * FRAC_2_PI;
    let mixed = (shaped * settings.blend + x * (1.0 - settings.blend)) / 2.0;
    mixed * settings.volume
}
