use std::collections::VecDeque;
use std::time::Duration;

use crate::foundation::core::{Fps, PlaybackState, Size};
use crate::foundation::error::{GreenkeyError, GreenkeyResult};
use crate::surface::buffer::PixelBuffer;
use crate::video::source::{VideoEvent, VideoSource};

/// Decoded in-memory clip with host-driven playback.
///
/// The host loads, plays, pauses and advances the clip; events it produces are queued and
/// handed to the host through [`ClipSource::drain_events`].
#[derive(Debug)]
pub struct ClipSource {
    frames: Vec<PixelBuffer>,
    fps: Fps,
    looping: bool,
    state: PlaybackState,
    loaded: bool,
    elapsed: Duration,
    access_restricted: bool,
    events: VecDeque<VideoEvent>,
}

impl ClipSource {
    /// Looping clip over `frames` shown at `fps`.
    pub fn new(frames: Vec<PixelBuffer>, fps: Fps) -> Self {
        Self {
            frames,
            fps,
            looping: true,
            state: PlaybackState::Idle,
            loaded: false,
            elapsed: Duration::ZERO,
            access_restricted: false,
            events: VecDeque::new(),
        }
    }

    /// Stop at the last frame instead of wrapping.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Number of decoded frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame rate the clip advances at.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Index of the frame shown now.
    pub fn frame_index(&self) -> usize {
        if self.frames.is_empty() {
            return 0;
        }
        let n = self.frames.len() as u64;
        let i = self.fps.frames_at(self.elapsed);
        let i = if self.looping { i % n } else { i.min(n - 1) };
        i as usize
    }

    /// Finish loading. Emits `LoadedData`, or `Error` when there is nothing to show.
    pub fn load(&mut self) {
        if self.loaded || self.state == PlaybackState::Error {
            return;
        }
        if self.frames.is_empty() {
            self.fail("clip has no decodable frames");
            return;
        }
        self.loaded = true;
        self.events.push_back(VideoEvent::LoadedData);
    }

    /// Start or resume playback. Loads first when needed.
    pub fn play(&mut self) {
        if !self.loaded {
            self.load();
        }
        if !self.loaded || self.state == PlaybackState::Playing {
            return;
        }
        if self.state == PlaybackState::Ended {
            self.elapsed = Duration::ZERO;
        }
        self.state = PlaybackState::Playing;
        self.events.push_back(VideoEvent::Play);
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.events.push_back(VideoEvent::Pause);
        }
    }

    /// Put the source into the error state.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.state = PlaybackState::Error;
        self.events.push_back(VideoEvent::Error(reason.into()));
    }

    /// Simulate frames that decode but cannot be read back (cross-origin style).
    pub fn set_access_restricted(&mut self, restricted: bool) {
        self.access_restricted = restricted;
    }

    /// Advance the playhead by `dt` while playing.
    pub fn advance(&mut self, dt: Duration) {
        if self.state != PlaybackState::Playing || self.frames.is_empty() {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if !self.looping && self.fps.frames_at(self.elapsed) >= self.frames.len() as u64 {
            self.state = PlaybackState::Ended;
            self.events.push_back(VideoEvent::Ended);
        }
    }

    /// Take all events emitted since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<VideoEvent> {
        self.events.drain(..).collect()
    }
}

impl VideoSource for ClipSource {
    fn intrinsic_size(&self) -> Option<Size> {
        if !self.loaded {
            return None;
        }
        self.frames.get(self.frame_index()).map(PixelBuffer::size)
    }

    fn playback_state(&self) -> PlaybackState {
        self.state
    }

    fn current_frame(&self) -> GreenkeyResult<&PixelBuffer> {
        if self.state == PlaybackState::Error {
            return Err(GreenkeyError::frame_access("video source is in error state"));
        }
        if !self.loaded {
            return Err(GreenkeyError::frame_access("no frame decoded yet"));
        }
        if self.access_restricted {
            return Err(GreenkeyError::frame_access(
                "frame pixels are not readable (access restricted)",
            ));
        }
        self.frames
            .get(self.frame_index())
            .ok_or_else(|| GreenkeyError::frame_access("frame index out of range"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/clip.rs"]
mod tests;
