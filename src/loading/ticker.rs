use std::time::Duration;

use crate::host::clock::{FrameClock, TimerId};

/// Status lines the overlay cycles through while the video loads.
pub const DEFAULT_STATUS_LINES: &[&str] = &[
    "CONNECTING_TO_SERVER...",
    "BYPASSING_FIREWALL...",
    "DECRYPTING_PACKETS...",
    "SYNCING_MISSION_DATA...",
    "LOADING_ASSETS...",
    "RENDERING_TARGET...",
    "ESTABLISHING_SECURE_LINE...",
    "ACCESS_GRANTED.",
];

const PROGRESS_TICK: Duration = Duration::from_millis(200);
const LOG_TICK: Duration = Duration::from_millis(400);
const MAX_PROGRESS_STEP: f32 = 8.0;

/// Deterministic xorshift32 for progress jitter.
#[derive(Clone, Debug)]
struct Rng32 {
    state: u32,
}

impl Rng32 {
    fn from_seed(seed: u32) -> Self {
        Self { state: seed | 1 }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)`.
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / ((1u32 << 24) as f32)
    }
}

/// Fake progress bar and rotating status line shown beside the compositor.
///
/// All state lives in the instance; two overlays never share counters.
#[derive(Debug)]
pub struct LoadingTicker {
    rng: Rng32,
    lines: Vec<String>,
    progress: f32,
    line_index: usize,
    progress_timer: Option<TimerId>,
    log_timer: Option<TimerId>,
}

impl LoadingTicker {
    /// Ticker over [`DEFAULT_STATUS_LINES`].
    pub fn new(seed: u32) -> Self {
        Self::with_lines(seed, DEFAULT_STATUS_LINES.iter().map(|s| s.to_string()))
    }

    /// Ticker over custom status lines. An empty list yields an empty status.
    pub fn with_lines(seed: u32, lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            rng: Rng32::from_seed(seed),
            lines: lines.into_iter().collect(),
            progress: 0.0,
            line_index: 0,
            progress_timer: None,
            log_timer: None,
        }
    }

    /// Progress in percent, `0..=100`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Status line shown now.
    pub fn status(&self) -> &str {
        self.lines
            .get(self.line_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// `true` while timers are scheduled.
    pub fn is_running(&self) -> bool {
        self.progress_timer.is_some() || self.log_timer.is_some()
    }

    /// Schedule the progress and status timers.
    pub fn start(&mut self, clock: &mut FrameClock) {
        if self.progress_timer.is_none() {
            self.progress_timer = Some(clock.set_timeout(PROGRESS_TICK));
        }
        if self.log_timer.is_none() {
            self.log_timer = Some(clock.set_timeout(LOG_TICK));
        }
    }

    /// Apply expired ticks and re-arm them.
    pub fn pump(&mut self, clock: &mut FrameClock) {
        if let Some(t) = self.progress_timer
            && clock.take_timer(t)
        {
            self.step_progress();
            self.progress_timer = Some(clock.set_timeout(PROGRESS_TICK));
        }
        if let Some(t) = self.log_timer
            && clock.take_timer(t)
        {
            if !self.lines.is_empty() {
                self.line_index = (self.line_index + 1) % self.lines.len();
            }
            self.log_timer = Some(clock.set_timeout(LOG_TICK));
        }
    }

    /// Cancel both timers.
    pub fn stop(&mut self, clock: &mut FrameClock) {
        for t in [self.progress_timer.take(), self.log_timer.take()]
            .into_iter()
            .flatten()
        {
            clock.clear_timeout(t);
        }
    }

    fn step_progress(&mut self) {
        if self.progress >= 100.0 {
            self.progress = 100.0;
            return;
        }
        let step = self.rng.next_f32() * MAX_PROGRESS_STEP;
        self.progress = (self.progress + step).min(100.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loading/ticker.rs"]
mod tests;
