//! # Delay
//!
//! A stereo echo: the same write/read/feedback/advance protocol as the
//! chorus, with a read offset that comes straight from the delay-time knob
//! instead of an LFO.
//!
//! ```text
//! delay_samples = time · sample_rate
//! ```
//!
//! With `feedback = f`, each recirculation is `f` times the previous one,
//! so an impulse decays as 1, f, f², ... Feedback written on sample `n`
//! is read on sample `n + delay_samples + 1`, because the scaled wet
//! signal is stored after the read and enters the buffer on the next
//! sample's write.

use super::delay_line::{Channel, StereoDelayLine};
use crate::snapshot::DelaySettings;

/// Fixed-offset stereo delay with feedback.
pub struct DelayStage {
    delay_line: StereoDelayLine,
    /// `[left, right]` feedback carried to the next sample.
    feedback: [f32; 2],
    sample_rate: f32,
}

impl DelayStage {
    /// Allocate a stage with `buffer_len` samples of history per channel.
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        Self {
            delay_line: StereoDelayLine::new(buffer_len),
            feedback: [0.0; 2],
            sample_rate,
        }
    }

    /// The ring buffer this stage writes into and reads back from.
    pub fn delay_line(&self) -> &StereoDelayLine {
        &self.delay_line
    }

    /// Delay time converted to samples. The ring is sized to hold the 2 s
    /// knob ceiling, and the delay line clamps anything past one full lap.
    pub fn delay_samples(&self, settings: &DelaySettings) -> f32 {
        settings.time * self.sample_rate
    }

    /// Process one stereo frame. A disabled stage passes the frame through
    /// and leaves its buffer, head and feedback untouched.
    pub fn process(&mut self, left: f32, right: f32, settings: &DelaySettings) -> (f32, f32) {
        if !settings.enabled {
            return (left, right);
        }

        // Step 1: WRITE the input plus last sample's feedback. This is the
        // recursion that turns one echo into a train of echoes.
        self.delay_line.write(Channel::Left, left + self.feedback[0]);
        self.delay_line.write(Channel::Right, right + self.feedback[1]);

        // Step 2: READ `time` seconds behind the write head. At 48 kHz a
        // 0.5 s delay reads the sample written 24000 samples ago.
        let offset = self.delay_samples(settings);
        let wet_left = self.delay_line.read_interpolated(Channel::Left, offset);
        let wet_right = self.delay_line.read_interpolated(Channel::Right, offset);

        // Step 3: FEEDBACK. With feedback = 0.5 the repeats fall to 50%,
        // 25%, 12.5%, ... of the original.
        self.feedback = [wet_left * settings.feedback, wet_right * settings.feedback];

        // Step 4: ADVANCE the write head, once for both channels.
        self.delay_line.advance();

        // Step 5: MIX dry and wet:
        //   dry_wet = 0.0 → input only
        //   dry_wet = 1.0 → echoes only
        let dry_amount = 1.0 - settings.dry_wet;
        (
            left * dry_amount + wet_left * settings.dry_wet,
            right * dry_amount + wet_right * settings.dry_wet,
        )
    }

    /// Silence the buffer and drop any pending feedback.
    pub fn reset(&mut self) {
        self.delay_line.clear();
        self.feedback = [0.0; 2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(time: f32, feedback: f32, dry_wet: f32) -> DelaySettings {
        DelaySettings {
            enabled: true,
            dry_wet,
            feedback,
            time,
        }
    }

    /// 10 ms at 1 kHz = 10 samples.
    #[test]
    fn test_single_echo_at_delay_time() {
        let mut stage = DelayStage::new(2_000, 1_000.0);
        let s = settings(0.01, 0.0, 1.0);

        let mut outputs = vec![stage.process(1.0, 1.0, &s).0];
        for _ in 0..30 {
            outputs.push(stage.process(0.0, 0.0, &s).0);
        }

        for (i, out) in outputs.iter().enumerate() {
            let expected = if i == 10 { 1.0 } else { 0.0 };
            assert_eq!(*out, expected, "sample {i}");
        }
    }

    /// Each recirculation is smaller than the last by the feedback factor.
    #[test]
    fn test_feedback_decays_geometrically() {
        let mut stage = DelayStage::new(2_000, 1_000.0);
        let s = settings(0.01, 0.5, 1.0);

        let mut outputs = vec![stage.process(1.0, 1.0, &s).0];
        for _ in 0..60 {
            outputs.push(stage.process(0.0, 0.0, &s).0);
        }

        assert_eq!(outputs[10], 1.0);
        assert_eq!(outputs[21], 0.5);
        assert_eq!(outputs[32], 0.25);
        assert_eq!(outputs[43], 0.125);
        assert!(outputs[10] > outputs[21] && outputs[21] > outputs[32]);
    }

    /// dry_wet = 0 outputs the dry signal exactly, even while the stage
    /// keeps recording.
    #[test]
    fn test_fully_dry() {
        let mut stage = DelayStage::new(100, 1_000.0);
        let s = settings(0.005, 0.9, 0.0);
        for x in [0.2, -0.4, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0] {
            assert_eq!(stage.process(x, x, &s), (x, x));
        }
        assert_eq!(stage.delay_line().write_pos(), 8);
    }

    #[test]
    fn test_disabled_passes_through_without_state_change() {
        let mut stage = DelayStage::new(100, 1_000.0);
        let s = DelaySettings {
            enabled: false,
            ..settings(0.01, 0.5, 1.0)
        };
        for x in [0.3, -0.7, 1.0] {
            assert_eq!(stage.process(x, -x, &s), (x, -x));
        }
        assert_eq!(stage.delay_line().write_pos(), 0);
    }

    /// Zero delay time reads back the frame just written.
    #[test]
    fn test_zero_time_is_transparent_wet() {
        let mut stage = DelayStage::new(100, 1_000.0);
        let s = settings(0.0, 0.0, 1.0);
        assert_eq!(stage.process(0.6, -0.2, &s), (0.6, -0.2));
    }

    /// The maximum delay time reads a full lap behind the head, which is
    /// the slot being written right now.
    #[test]
    fn test_max_time_stays_in_bounds() {
        let mut stage = DelayStage::new(2_000, 1_000.0);
        let s = settings(2.0, 0.98, 1.0);
        for i in 0..5_000 {
            let (l, r) = stage.process((i % 7) as f32 * 0.1, 0.0, &s);
            assert!(l.is_finite() && r.is_finite());
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut stage = DelayStage::new(100, 1_000.0);
        let s = settings(0.01, 0.5, 1.0);
        for _ in 0..50 {
            stage.process(1.0, 1.0, &s);
        }
        stage.reset();
        assert_eq!(stage.delay_line().write_pos(), 0);
        for _ in 0..50 {
            assert_eq!(stage.process(0.0, 0.0, &s), (0.0, 0.0));
        }
    }
}
