use super::*;

fn solid(size: Size, px: [u8; 4]) -> PixelBuffer {
    PixelBuffer::filled(size, px).unwrap()
}

fn clip3() -> ClipSource {
    let s = Size::new(2, 2);
    ClipSource::new(
        vec![
            solid(s, [1, 0, 0, 255]),
            solid(s, [2, 0, 0, 255]),
            solid(s, [3, 0, 0, 255]),
        ],
        Fps::new(10, 1).unwrap(),
    )
}

#[test]
fn nothing_is_readable_before_load() {
    let c = clip3();
    assert_eq!(c.intrinsic_size(), None);
    assert_eq!(c.playback_state(), PlaybackState::Idle);
    assert!(matches!(
        c.current_frame(),
        Err(GreenkeyError::FrameAccess(_))
    ));
}

#[test]
fn play_emits_loaded_then_play() {
    let mut c = clip3();
    c.play();
    assert_eq!(
        c.drain_events(),
        vec![VideoEvent::LoadedData, VideoEvent::Play]
    );
    assert!(c.playback_state().is_playing());
    assert_eq!(c.intrinsic_size(), Some(Size::new(2, 2)));
    assert!(c.drain_events().is_empty());
}

#[test]
fn looping_clip_wraps() {
    let mut c = clip3();
    c.play();
    c.advance(Duration::from_millis(250));
    assert_eq!(c.frame_index(), 2);
    c.advance(Duration::from_millis(100));
    assert_eq!(c.frame_index(), 0);
    assert_eq!(c.current_frame().unwrap().pixel(0, 0), Some([1, 0, 0, 255]));
}

#[test]
fn non_looping_clip_ends() {
    let mut c = clip3().with_looping(false);
    c.play();
    c.drain_events();
    c.advance(Duration::from_millis(400));
    assert_eq!(c.playback_state(), PlaybackState::Ended);
    assert_eq!(c.drain_events(), vec![VideoEvent::Ended]);
    assert_eq!(c.frame_index(), 2);
}

#[test]
fn paused_clip_does_not_advance() {
    let mut c = clip3();
    c.play();
    c.pause();
    c.advance(Duration::from_millis(150));
    assert_eq!(c.frame_index(), 0);
    assert_eq!(c.playback_state(), PlaybackState::Paused);
}

#[test]
fn empty_clip_errors_on_load() {
    let mut c = ClipSource::new(Vec::new(), Fps::default());
    c.play();
    let events = c.drain_events();
    assert!(matches!(events.as_slice(), [VideoEvent::Error(_)]));
    assert!(events[0].signals_readiness());
    assert_eq!(c.playback_state(), PlaybackState::Error);
}

#[test]
fn restricted_access_fails_frame_reads() {
    let mut c = clip3();
    c.play();
    c.set_access_restricted(true);
    assert!(c.current_frame().is_err());
    c.set_access_restricted(false);
    assert!(c.current_frame().is_ok());
}

#[test]
fn pause_and_ended_do_not_signal_readiness() {
    assert!(!VideoEvent::Pause.signals_readiness());
    assert!(!VideoEvent::Ended.signals_readiness());
    assert!(VideoEvent::LoadedData.signals_readiness());
}
