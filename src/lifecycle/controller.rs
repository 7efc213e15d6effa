use crate::config::CompositorConfig;
use crate::host::clock::FrameClock;
use crate::lifecycle::readiness::{ReadySource, Readiness};
use crate::render::scheduler::{CycleOutcome, LoopHandle, LoopStats, RenderLoop};
use crate::surface::Surface;
use crate::video::source::{VideoEvent, VideoSource};

/// Where a [`Compositor`] is in its mount/play/unmount lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositorState {
    /// No video attached, no loop.
    #[default]
    Idle,
    /// Mounted and listening; waiting for the first `Play`.
    Armed,
    /// Render loop scheduled. Pausing the video does not leave this state.
    Running,
    /// Unmounted. Terminal.
    TornDown,
}

/// What one [`Compositor::pump`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Outcome of the frame callback, when one was due.
    pub cycle: Option<CycleOutcome>,
    /// `true` exactly once per compositor: the first pump after readiness.
    pub ready_signal: bool,
}

/// Chroma-key compositor bound to one host component.
///
/// The host owns the video and the clock and forwards video events; the compositor owns the
/// surface and the render loop.
pub struct Compositor<S: Surface> {
    config: CompositorConfig,
    state: CompositorState,
    surface: S,
    render: RenderLoop,
    handle: Option<LoopHandle>,
    readiness: Readiness,
}

impl<S: Surface> Compositor<S> {
    /// Idle compositor presenting into `surface`.
    pub fn new(config: CompositorConfig, surface: S) -> Self {
        let render = RenderLoop::new(config.threshold, config.keying);
        Self {
            config,
            state: CompositorState::Idle,
            surface,
            render,
            handle: None,
            readiness: Readiness::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CompositorState {
        self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// The display surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Handle of the running render loop.
    pub fn loop_handle(&self) -> Option<&LoopHandle> {
        self.handle.as_ref()
    }

    /// Render loop counters.
    pub fn loop_stats(&self) -> LoopStats {
        self.render.stats()
    }

    /// `true` once the surface may be revealed instead of the fallback spinner.
    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    /// What made the compositor ready, if it is.
    pub fn ready_source(&self) -> Option<ReadySource> {
        self.readiness.source()
    }

    /// Consume the one-shot readiness signal.
    ///
    /// Shares its latch with [`PumpReport::ready_signal`]; across both, `true` is observed once.
    pub fn take_ready_signal(&mut self) -> bool {
        self.readiness.take_signal()
    }

    /// Attach to the host component: start listening and arm the fallback timer.
    pub fn mount(&mut self, clock: &mut FrameClock) {
        if self.state != CompositorState::Idle {
            tracing::debug!(state = ?self.state, "mount ignored");
            return;
        }
        self.readiness.arm(clock, self.config.fallback_timeout());
        self.state = CompositorState::Armed;
        tracing::debug!("compositor armed");
    }

    /// Forward a video lifecycle event.
    ///
    /// Ignored unless mounted. The first `Play` starts the render loop.
    pub fn handle_event(&mut self, event: &VideoEvent, clock: &mut FrameClock) {
        if !matches!(
            self.state,
            CompositorState::Armed | CompositorState::Running
        ) {
            return;
        }
        if event.signals_readiness() {
            self.readiness.mark(ReadySource::VideoEvent, clock);
        }
        if let VideoEvent::Error(reason) = event {
            tracing::warn!(%reason, "video failed; compositing disabled for this source");
        }
        if *event == VideoEvent::Play && self.state == CompositorState::Armed {
            self.handle = Some(self.render.start(clock));
            self.state = CompositorState::Running;
            tracing::debug!("compositor running");
        }
    }

    /// Dispatch this compositor's due frame callback and fallback timer.
    pub fn pump(&mut self, video: &dyn VideoSource, clock: &mut FrameClock) -> PumpReport {
        let mut report = PumpReport::default();
        if self.state == CompositorState::TornDown {
            return report;
        }

        self.readiness.poll_fallback(clock);
        if self.state == CompositorState::Running
            && let Some(req) = self.render.pending_request()
            && clock.take_frame(req)
        {
            report.cycle = Some(self.render.on_frame(req, video, &mut self.surface, clock));
        }
        report.ready_signal = self.readiness.take_signal();
        report
    }

    /// Detach from the host component: stop the loop, clear timers, release the surface.
    pub fn unmount(&mut self, clock: &mut FrameClock) {
        if self.state == CompositorState::TornDown {
            return;
        }
        if let Some(h) = self.handle.take() {
            self.render.stop(&h, clock);
        }
        self.readiness.disarm(clock);
        self.surface.reset();
        self.state = CompositorState::TornDown;
        tracing::debug!("compositor torn down");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/controller.rs"]
mod tests;
