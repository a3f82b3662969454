//! Property-based tests for the DSP invariants.
//!
//! Uses proptest to sweep every knob across its declared range and check
//! that disabled pedals are transparent, reads never leave the ring
//! buffer, feedback always decays, and the output stays finite.

use proptest::prelude::*;

use pdlboard::dsp::delay::DelayStage;
use pdlboard::dsp::delay_line::StereoDelayLine;
use pdlboard::dsp::modulation::ModulationStage;
use pdlboard::dsp::overdrive;
use pdlboard::engine::Engine;
use pdlboard::snapshot::{
    DelaySettings, ModulationSettings, ModulationType, OverdriveSettings, ParamSnapshot,
};

const SAMPLE_RATE: f32 = 48_000.0;

fn modulation_type() -> impl Strategy<Value = ModulationType> {
    prop_oneof![Just(ModulationType::Chorus), Just(ModulationType::Flanger)]
}

prop_compose! {
    fn overdrive_settings()(
        enabled in any::<bool>(),
        drive in 0.0f32..=1.0,
        range in 0.0f32..=300.0,
        blend in 0.0f32..=1.0,
        volume in 0.0f32..=3.0,
    ) -> OverdriveSettings {
        OverdriveSettings { enabled, drive, range, blend, volume }
    }
}

prop_compose! {
    fn modulation_settings()(
        enabled in any::<bool>(),
        dry_wet in 0.0f32..=1.0,
        depth in 0.0f32..=1.0,
        rate in 0.0f32..=10.0,
        phase_offset in 0.0f32..=1.0,
        feedback in 0.0f32..=0.98,
        kind in modulation_type(),
    ) -> ModulationSettings {
        ModulationSettings { enabled, dry_wet, depth, rate, phase_offset, feedback, kind }
    }
}

prop_compose! {
    fn delay_settings()(
        enabled in any::<bool>(),
        dry_wet in 0.0f32..=1.0,
        feedback in 0.0f32..=0.98,
        time in 0.0f32..=2.0,
    ) -> DelaySettings {
        DelaySettings { enabled, dry_wet, feedback, time }
    }
}

prop_compose! {
    fn snapshot()(
        overdrive in overdrive_settings(),
        modulation in modulation_settings(),
        delay in delay_settings(),
    ) -> ParamSnapshot {
        ParamSnapshot { overdrive, modulation, delay }
    }
}

fn prepared_engine() -> Engine {
    let mut engine = Engine::new();
    engine
        .prepare(SAMPLE_RATE, 64, 2)
        .expect("48 kHz stereo is supported");
    engine
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// With every pedal switched off, output equals input bit for bit and
    /// no stage state moves.
    #[test]
    fn disabled_chain_is_identity(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        mut params in snapshot(),
    ) {
        params.overdrive.enabled = false;
        params.modulation.enabled = false;
        params.delay.enabled = false;

        let mut engine = prepared_engine();
        let mut left = input;
        let mut right = input.map(|s| -s);
        engine.process_block(&mut [&mut left, &mut right], 2, params);

        prop_assert_eq!(left, input);
        prop_assert_eq!(right, input.map(|s| -s));
        prop_assert_eq!(engine.delay().map(|d| d.delay_line().write_pos()), Some(0));
        prop_assert_eq!(engine.modulation().map(|m| m.delay_line().write_pos()), Some(0));
        prop_assert_eq!(engine.modulation().map(|m| m.lfo().phase()), Some(0.0));
    }

    /// The LFO-driven read offset stays inside the ring buffer for every
    /// depth, rate, phase offset and type, at every point of the sweep.
    #[test]
    fn modulation_offset_stays_in_buffer(
        mut settings in modulation_settings(),
        steps in 1usize..20_000,
    ) {
        settings.enabled = true;
        let buffer_len = (SAMPLE_RATE * 2.0) as usize;
        let mut stage = ModulationStage::new(buffer_len, SAMPLE_RATE);
        let (min_s, max_s) = settings.kind.delay_range_seconds();

        for _ in 0..steps {
            for offset in stage.read_offsets(&settings) {
                prop_assert!(offset >= 0.0 && offset <= buffer_len as f32);
                prop_assert!(offset >= min_s * SAMPLE_RATE - 1e-2);
                prop_assert!(offset <= max_s * SAMPLE_RATE + 1e-2);
            }
            stage.process(0.0, 0.0, &settings);
        }
    }

    /// With blend at 0 the shaped path contributes nothing: the result is
    /// the clean signal times volume / 2 for any drive and range.
    #[test]
    fn overdrive_blend_zero_is_clean_half_volume(
        x in -1.0f32..=1.0,
        mut settings in overdrive_settings(),
    ) {
        settings.enabled = true;
        settings.blend = 0.0;

        let out = overdrive::process(x, &settings);
        let expected = x * settings.volume / 2.0;
        prop_assert!((out - expected).abs() <= 1e-6, "expected {}, got {}", expected, out);
    }

    /// A disabled overdrive hands the sample back unchanged.
    #[test]
    fn overdrive_disabled_is_identity(
        x in -1.0f32..=1.0,
        mut settings in overdrive_settings(),
    ) {
        settings.enabled = false;
        prop_assert_eq!(overdrive::process(x, &settings), x);
    }

    /// Each recirculation of an impulse is `feedback` times the previous
    /// one, so the echoes strictly shrink.
    #[test]
    fn delay_feedback_decays(
        delay_samples in 2usize..200,
        feedback in 0.05f32..=0.95,
    ) {
        // At 1024 Hz, n / 1024 seconds is exactly n samples.
        let sample_rate = 1_024.0;
        let settings = DelaySettings {
            enabled: true,
            dry_wet: 1.0,
            feedback,
            time: delay_samples as f32 / sample_rate,
        };
        let mut stage = DelayStage::new(2_048, sample_rate);

        let total = 4 * (delay_samples + 1) + 1;
        let mut outputs = Vec::with_capacity(total);
        outputs.push(stage.process(1.0, 1.0, &settings).0);
        for _ in 1..total {
            outputs.push(stage.process(0.0, 0.0, &settings).0);
        }

        let mut previous = f32::INFINITY;
        for k in 0..4 {
            let echo = outputs[delay_samples + k * (delay_samples + 1)];
            let expected = feedback.powi(k as i32);
            prop_assert!((echo - expected).abs() < 1e-5, "echo {} was {}, expected {}", k, echo, expected);
            prop_assert!(echo < previous);
            previous = echo;
        }
    }

    /// After exactly `len` advances the write head is back at 0.
    #[test]
    fn write_head_wraps_after_len_advances(len in 1usize..5_000) {
        let mut line = StereoDelayLine::new(len);
        for _ in 0..len {
            line.advance();
        }
        prop_assert_eq!(line.write_pos(), 0);
    }

    /// Any in-range settings with input in [-1, 1] give finite output.
    #[test]
    fn chain_output_is_finite(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        params in snapshot(),
    ) {
        let mut engine = prepared_engine();
        let mut left = input;
        let mut right = input;
        for _ in 0..8 {
            engine.process_block(&mut [&mut left, &mut right], 2, params);
            prop_assert!(left.iter().chain(right.iter()).all(|s| s.is_finite()));
        }
    }
}
