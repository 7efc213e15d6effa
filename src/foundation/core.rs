use std::time::Duration;

use crate::foundation::error::{GreenkeyError, GreenkeyResult};

/// Pixel dimensions of a frame or surface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Build a size from width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    ///
    /// Fails on overflow rather than wrapping.
    pub fn rgba_len(self) -> GreenkeyResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| {
                GreenkeyError::validation(format!(
                    "rgba buffer size overflow for {}x{}",
                    self.width, self.height
                ))
            })
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Playback state reported by a video source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing loaded or playback never started.
    #[default]
    Idle,
    /// Frames are advancing.
    Playing,
    /// Playback halted by the host.
    Paused,
    /// A non-looping source reached its end.
    Ended,
    /// The decoder failed.
    Error,
}

impl PlaybackState {
    /// `true` only while frames are advancing.
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create validated FPS (`num > 0`, `den > 0`).
    pub fn new(num: u32, den: u32) -> GreenkeyResult<Self> {
        if den == 0 {
            return Err(GreenkeyError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GreenkeyError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of a single frame.
    pub fn frame_duration(self) -> Duration {
        Duration::from_secs_f64(f64::from(self.den) / f64::from(self.num))
    }

    /// Index of the frame shown at `elapsed`, rounded down.
    pub fn frames_at(self, elapsed: Duration) -> u64 {
        (elapsed.as_secs_f64() * self.as_f64()).floor().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}
