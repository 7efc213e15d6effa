use crate::foundation::core::{PlaybackState, Size};
use crate::foundation::error::GreenkeyResult;
use crate::surface::buffer::PixelBuffer;

/// Playback lifecycle notifications a video source emits to its host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoEvent {
    /// The first frame is decoded and available.
    LoadedData,
    /// Playback started or resumed.
    Play,
    /// Playback was paused by the host.
    Pause,
    /// A non-looping source reached its last frame.
    Ended,
    /// Loading or decoding failed.
    Error(String),
}

impl VideoEvent {
    /// Events after which the host may reveal the composited surface.
    ///
    /// `Error` counts too: compositing is best effort and must not hold back the page.
    pub fn signals_readiness(&self) -> bool {
        matches!(self, Self::LoadedData | Self::Play | Self::Error(_))
    }
}

/// Read-only view of a decoding video, owned by the host.
///
/// The compositor never changes playback state through this trait.
pub trait VideoSource {
    /// Native decoded size, or `None` before the first frame is available.
    fn intrinsic_size(&self) -> Option<Size>;

    /// Current playback state.
    fn playback_state(&self) -> PlaybackState;

    /// The frame that should be shown now.
    ///
    /// Fails with [`crate::GreenkeyError::FrameAccess`] when the frame cannot be read.
    fn current_frame(&self) -> GreenkeyResult<&PixelBuffer>;
}
