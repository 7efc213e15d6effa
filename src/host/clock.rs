use std::collections::HashMap;
use std::time::Duration;

use crate::foundation::core::Fps;

/// Handle returned by [`FrameClock::request_animation_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Handle returned by [`FrameClock::set_timeout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Single-threaded host event loop: per-refresh frame callbacks plus one-shot timers.
///
/// Time only moves through [`FrameClock::advance_frame`] / [`FrameClock::advance_by`], so
/// hosts and tests drive it deterministically. A frame request made during frame `n` is due
/// at frame `n + 1`; owners claim due requests with [`FrameClock::take_frame`].
#[derive(Debug)]
pub struct FrameClock {
    refresh: Fps,
    now: Duration,
    frame: u64,
    next_id: u64,
    // request id -> frame number it was requested in
    frame_requests: HashMap<u64, u64>,
    // timer id -> deadline
    timers: HashMap<u64, Duration>,
}

impl FrameClock {
    /// Clock refreshing at `refresh`, starting at time zero, frame zero.
    pub fn new(refresh: Fps) -> Self {
        Self {
            refresh,
            now: Duration::ZERO,
            frame: 0,
            next_id: 1,
            frame_requests: HashMap::new(),
            timers: HashMap::new(),
        }
    }

    /// Time elapsed since the clock started.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of display refreshes so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Interval between refreshes.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh.frame_duration()
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ask for a callback at the next display refresh.
    pub fn request_animation_frame(&mut self) -> FrameRequestId {
        let id = self.alloc_id();
        self.frame_requests.insert(id, self.frame);
        FrameRequestId(id)
    }

    /// Withdraw a frame request. Returns `false` when it was already taken or cancelled.
    pub fn cancel_animation_frame(&mut self, id: FrameRequestId) -> bool {
        self.frame_requests.remove(&id.0).is_some()
    }

    /// Claim `id` if it is due at the current frame. A claimed request is consumed.
    pub fn take_frame(&mut self, id: FrameRequestId) -> bool {
        match self.frame_requests.get(&id.0) {
            Some(&requested_in) if requested_in < self.frame => {
                self.frame_requests.remove(&id.0);
                true
            }
            _ => false,
        }
    }

    /// Frame requests not yet taken or cancelled.
    pub fn pending_frames(&self) -> usize {
        self.frame_requests.len()
    }

    /// Schedule a one-shot timer `delay` from now.
    pub fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = self.alloc_id();
        self.timers.insert(id, self.now.saturating_add(delay));
        TimerId(id)
    }

    /// Cancel a timer. Returns `false` when it already fired or was cleared.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id.0).is_some()
    }

    /// Claim `id` if its deadline has passed. A claimed timer is consumed.
    pub fn take_timer(&mut self, id: TimerId) -> bool {
        match self.timers.get(&id.0) {
            Some(&deadline) if deadline <= self.now => {
                self.timers.remove(&id.0);
                true
            }
            _ => false,
        }
    }

    /// Timers not yet fired or cleared.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Move to the next display refresh.
    pub fn advance_frame(&mut self) -> u64 {
        self.now = self.now.saturating_add(self.refresh_interval());
        self.frame += 1;
        self.frame
    }

    /// Move time forward without a display refresh (timers only).
    pub fn advance_by(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Fps::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/clock.rs"]
mod tests;
