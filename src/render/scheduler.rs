use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::core::Size;
use crate::foundation::error::GreenkeyResult;
use crate::host::clock::{FrameClock, FrameRequestId};
use crate::keying::filter::KeyingMode;
use crate::keying::threshold::Threshold;
use crate::surface::{Surface, ensure_size};
use crate::video::source::VideoSource;

/// Cancellation token for one running render loop.
///
/// Clones share the same flag. Once stopped, a handle never becomes active again; a restart
/// issues a new handle.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    id: u64,
    alive: Arc<AtomicBool>,
}

impl LoopHandle {
    fn new(id: u64) -> Self {
        Self {
            id,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Identifier unique within the owning [`RenderLoop`].
    pub fn id(&self) -> u64 {
        self.id
    }

    /// `true` until the loop is stopped.
    pub fn is_active(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    fn invalidate(&self) -> bool {
        self.alive.swap(false, Ordering::AcqRel)
    }
}

impl PartialEq for LoopHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.alive, &other.alive)
    }
}

impl Eq for LoopHandle {}

/// What one dispatched frame callback did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Frame drawn, keyed, written back and presented.
    Presented,
    /// Video not playing; nothing drawn, next cycle scheduled.
    Skipped,
    /// Draw or pixel access failed; logged, next cycle scheduled.
    Failed,
    /// Loop stopped or stale request; nothing touched, nothing scheduled.
    Cancelled,
}

/// Counters over the lifetime of a [`RenderLoop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Cycles that presented a keyed frame.
    pub presented: u64,
    /// Cycles skipped because the video was not playing.
    pub skipped: u64,
    /// Cycles abandoned after a draw or pixel access failure.
    pub failed: u64,
    /// Surface resizes triggered by intrinsic size changes.
    pub resizes: u64,
}

struct ActiveLoop {
    handle: LoopHandle,
    pending: Option<FrameRequestId>,
}

/// Drives draw → read → key → write → present once per display refresh.
///
/// Cycles never overlap: the next frame is requested only after the current cycle's
/// write-back and present have finished, so at most one request is pending.
pub struct RenderLoop {
    threshold: Threshold,
    keying: KeyingMode,
    active: Option<ActiveLoop>,
    next_loop_id: u64,
    stats: LoopStats,
}

impl RenderLoop {
    /// Loop keying with `threshold`.
    pub fn new(threshold: Threshold, keying: KeyingMode) -> Self {
        Self {
            threshold,
            keying,
            active: None,
            next_loop_id: 1,
            stats: LoopStats::default(),
        }
    }

    /// Handle of the running loop, if any.
    pub fn handle(&self) -> Option<&LoopHandle> {
        self.active
            .as_ref()
            .map(|a| &a.handle)
            .filter(|h| h.is_active())
    }

    /// `true` while a loop is scheduled.
    pub fn is_running(&self) -> bool {
        self.handle().is_some()
    }

    /// Frame request the loop waits on.
    pub fn pending_request(&self) -> Option<FrameRequestId> {
        self.active.as_ref().and_then(|a| a.pending)
    }

    /// Lifetime counters.
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Begin scheduling cycles.
    ///
    /// Idempotent: while a loop is running this returns its handle and schedules nothing.
    pub fn start(&mut self, clock: &mut FrameClock) -> LoopHandle {
        if let Some(h) = self.handle() {
            return h.clone();
        }
        let handle = LoopHandle::new(self.next_loop_id);
        self.next_loop_id += 1;
        let pending = Some(clock.request_animation_frame());
        tracing::debug!(loop_id = handle.id(), "render loop started");
        self.active = Some(ActiveLoop {
            handle: handle.clone(),
            pending,
        });
        handle
    }

    /// Cancel future cycles of `handle`.
    ///
    /// No-op for a handle that is already stopped or belongs to an earlier loop.
    pub fn stop(&mut self, handle: &LoopHandle, clock: &mut FrameClock) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.handle != *handle || !handle.invalidate() {
            return;
        }
        if let Some(req) = active.pending.take() {
            clock.cancel_animation_frame(req);
        }
        self.active = None;
        tracing::debug!(loop_id = handle.id(), "render loop stopped");
    }

    /// Run the cycle for a frame callback the host dispatched.
    pub fn on_frame(
        &mut self,
        request: FrameRequestId,
        video: &dyn VideoSource,
        surface: &mut dyn Surface,
        clock: &mut FrameClock,
    ) -> CycleOutcome {
        // Top-of-cycle cancellation check.
        let Some(active) = self.active.as_mut() else {
            return CycleOutcome::Cancelled;
        };
        if !active.handle.is_active() || active.pending != Some(request) {
            return CycleOutcome::Cancelled;
        }
        active.pending = None;

        let outcome = match video.intrinsic_size() {
            Some(size) if video.playback_state().is_playing() => {
                match self.composite(size, video, surface) {
                    Ok(()) => CycleOutcome::Presented,
                    Err(e) => {
                        tracing::warn!(error = %e, "compositing cycle skipped");
                        CycleOutcome::Failed
                    }
                }
            }
            _ => CycleOutcome::Skipped,
        };
        match outcome {
            CycleOutcome::Presented => self.stats.presented += 1,
            CycleOutcome::Skipped => self.stats.skipped += 1,
            CycleOutcome::Failed => self.stats.failed += 1,
            CycleOutcome::Cancelled => {}
        }

        // Schedule the next cycle only once this one is complete.
        if let Some(active) = self.active.as_mut()
            && active.handle.is_active()
        {
            active.pending = Some(clock.request_animation_frame());
        }
        outcome
    }

    fn composite(
        &mut self,
        size: Size,
        video: &dyn VideoSource,
        surface: &mut dyn Surface,
    ) -> GreenkeyResult<()> {
        if ensure_size(surface, size)? {
            self.stats.resizes += 1;
        }
        surface.draw_frame(video)?;
        let mut pixels = surface.read_pixels()?;
        pixels.chroma_key(&self.threshold, self.keying);
        surface.write_pixels(pixels)?;
        surface.present()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
