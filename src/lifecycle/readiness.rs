use std::time::Duration;

use crate::host::clock::{FrameClock, TimerId};

/// Why the host may reveal the composited surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadySource {
    /// The video loaded, started playing, or failed.
    VideoEvent,
    /// The fallback timer expired first.
    FallbackTimer,
}

/// One-shot readiness latch with a fallback timer.
///
/// Becomes ready on the first video readiness event or when the timer expires, whichever
/// comes first. The host observes the transition exactly once via [`Readiness::take_signal`].
#[derive(Debug, Default)]
pub(crate) struct Readiness {
    source: Option<ReadySource>,
    signalled: bool,
    fallback: Option<TimerId>,
}

impl Readiness {
    pub(crate) fn arm(&mut self, clock: &mut FrameClock, timeout: Duration) {
        if self.fallback.is_none() && self.source.is_none() {
            self.fallback = Some(clock.set_timeout(timeout));
        }
    }

    pub(crate) fn disarm(&mut self, clock: &mut FrameClock) {
        if let Some(t) = self.fallback.take() {
            clock.clear_timeout(t);
        }
    }

    pub(crate) fn mark(&mut self, source: ReadySource, clock: &mut FrameClock) {
        if self.source.is_none() {
            self.source = Some(source);
        }
        self.disarm(clock);
    }

    /// Returns `true` when the fallback timer fired on this call.
    pub(crate) fn poll_fallback(&mut self, clock: &mut FrameClock) -> bool {
        match self.fallback {
            Some(t) if clock.take_timer(t) => {
                self.fallback = None;
                if self.source.is_none() {
                    self.source = Some(ReadySource::FallbackTimer);
                }
                true
            }
            _ => false,
        }
    }

    pub(crate) fn source(&self) -> Option<ReadySource> {
        self.source
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    pub(crate) fn take_signal(&mut self) -> bool {
        if self.is_ready() && !self.signalled {
            self.signalled = true;
            return true;
        }
        false
    }
}
