//! Errors raised while preparing the engine for playback.
//!
//! Only the non-realtime `prepare` path can fail. Once prepared, block
//! processing has no error conditions.

use thiserror::Error;

/// Reasons a host configuration cannot be used by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Sample rate was zero, negative, or not a number.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// Host announced a maximum block size of zero.
    #[error("block size must be greater than zero")]
    ZeroBlockSize,

    /// Only mono and stereo are supported.
    #[error("unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannelCount(usize),
}
