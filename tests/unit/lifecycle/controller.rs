use std::time::Duration;

use super::*;
use crate::foundation::core::{Fps, Size};
use crate::surface::buffer::PixelBuffer;
use crate::surface::cpu::CpuSurface;
use crate::video::clip::ClipSource;

fn clip() -> ClipSource {
    ClipSource::new(
        vec![PixelBuffer::filled(Size::new(2, 2), [0, 255, 0, 255]).unwrap()],
        Fps::new(60, 1).unwrap(),
    )
}

fn forward(comp: &mut Compositor<CpuSurface>, video: &mut ClipSource, clock: &mut FrameClock) {
    for ev in video.drain_events() {
        comp.handle_event(&ev, clock);
    }
}

#[test]
fn starts_idle_and_mount_arms() {
    let mut clock = FrameClock::default();
    let mut comp = Compositor::new(CompositorConfig::default(), CpuSurface::new());
    assert_eq!(comp.state(), CompositorState::Idle);
    comp.mount(&mut clock);
    assert_eq!(comp.state(), CompositorState::Armed);
    assert_eq!(clock.pending_timers(), 1);
    assert!(!comp.is_ready());
}

#[test]
fn events_before_mount_are_ignored() {
    let mut clock = FrameClock::default();
    let mut comp = Compositor::new(CompositorConfig::default(), CpuSurface::new());
    comp.handle_event(&VideoEvent::Play, &mut clock);
    assert_eq!(comp.state(), CompositorState::Idle);
    assert!(!comp.is_ready());
}

#[test]
fn play_starts_running_and_marks_ready() {
    let mut clock = FrameClock::default();
    let mut video = clip();
    let mut comp = Compositor::new(CompositorConfig::default(), CpuSurface::new());
    comp.mount(&mut clock);
    video.play();
    forward(&mut comp, &mut video, &mut clock);

    assert_eq!(comp.state(), CompositorState::Running);
    assert_eq!(comp.ready_source(), Some(ReadySource::VideoEvent));
    assert_eq!(clock.pending_timers(), 0);

    clock.advance_frame();
    let report = comp.pump(&video, &mut clock);
    assert_eq!(report.cycle, Some(CycleOutcome::Presented));
    assert!(report.ready_signal);
    assert!(!comp.take_ready_signal());
}

#[test]
fn second_play_does_not_start_another_loop() {
    let mut clock = FrameClock::default();
    let mut comp = Compositor::new(CompositorConfig::default(), CpuSurface::new());
    comp.mount(&mut clock);
    comp.handle_event(&VideoEvent::Play, &mut clock);
    let first = comp.loop_handle().cloned();
    comp.handle_event(&VideoEvent::Pause, &mut clock);
    comp.handle_event(&VideoEvent::Play, &mut clock);
    assert_eq!(comp.loop_handle().cloned(), first);
    assert_eq!(comp.state(), CompositorState::Running);
    assert_eq!(clock.pending_frames(), 1);
}

#[test]
fn error_marks_ready_without_running() {
    let mut clock = FrameClock::default();
    let mut comp = Compositor::new(CompositorConfig::default(), CpuSurface::new());
    comp.mount(&mut clock);
    comp.handle_event(&VideoEvent::Error("404".into()), &mut clock);
    assert!(comp.is_ready());
    assert_eq!(comp.state(), CompositorState::Armed);
    assert!(comp.take_ready_signal());
}

#[test]
fn fallback_timer_fires_once_without_video() {
    let mut clock = FrameClock::default();
    let video = clip();
    let mut comp = Compositor::new(
        CompositorConfig {
            fallback_timeout_ms: 100,
            ..CompositorConfig::default()
        },
        CpuSurface::new(),
    );
    comp.mount(&mut clock);

    clock.advance_by(Duration::from_millis(99));
    assert!(!comp.pump(&video, &mut clock).ready_signal);
    clock.advance_by(Duration::from_millis(1));
    assert!(comp.pump(&video, &mut clock).ready_signal);
    assert_eq!(comp.ready_source(), Some(ReadySource::FallbackTimer));

    comp.handle_event(&VideoEvent::LoadedData, &mut clock);
    clock.advance_by(Duration::from_secs(5));
    assert!(!comp.pump(&video, &mut clock).ready_signal);
    assert_eq!(comp.ready_source(), Some(ReadySource::FallbackTimer));
}

#[test]
fn unmount_is_terminal_and_stops_everything() {
    let mut clock = FrameClock::default();
    let mut video = clip();
    let mut comp = Compositor::new(CompositorConfig::default(), CpuSurface::new());
    comp.mount(&mut clock);
    video.play();
    forward(&mut comp, &mut video, &mut clock);
    clock.advance_frame();
    comp.pump(&video, &mut clock);
    let handle = comp.loop_handle().cloned().unwrap();

    comp.unmount(&mut clock);
    assert_eq!(comp.state(), CompositorState::TornDown);
    assert!(!handle.is_active());
    assert_eq!(clock.pending_frames(), 0);
    assert_eq!(clock.pending_timers(), 0);
    assert!(comp.surface().pixels().is_none());

    comp.mount(&mut clock);
    comp.handle_event(&VideoEvent::Play, &mut clock);
    assert_eq!(comp.state(), CompositorState::TornDown);
    clock.advance_frame();
    assert_eq!(comp.pump(&video, &mut clock), PumpReport::default());
    comp.unmount(&mut clock);
}

#[test]
fn unmount_before_play_clears_fallback() {
    let mut clock = FrameClock::default();
    let video = clip();
    let mut comp = Compositor::new(CompositorConfig::default(), CpuSurface::new());
    comp.mount(&mut clock);
    comp.unmount(&mut clock);
    clock.advance_by(Duration::from_secs(10));
    assert!(!comp.pump(&video, &mut clock).ready_signal);
    assert!(!comp.is_ready());
}
