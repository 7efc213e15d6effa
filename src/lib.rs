//! Greenkey composites a green-screen video over a page in real time.
//!
//! Each display refresh, the current video frame is drawn into an offscreen
//! [`Surface`], green background pixels are made fully transparent, and the result is
//! presented. The crate is host-agnostic:
//!
//! - Feed frames through a [`VideoSource`] (a decoded [`ClipSource`], or your own)
//! - Drive time with a [`FrameClock`]
//! - Mount a [`Compositor`], forward [`VideoEvent`]s, and [`Compositor::pump`] each refresh
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;

pub(crate) mod host;
pub(crate) mod keying;
pub(crate) mod lifecycle;
pub(crate) mod loading;
pub(crate) mod render;
pub(crate) mod surface;
pub(crate) mod video;

pub use crate::config::CompositorConfig;
pub use crate::foundation::core::{Fps, PlaybackState, Size};
pub use crate::foundation::error::{GreenkeyError, GreenkeyResult};

pub use crate::host::clock::{FrameClock, FrameRequestId, TimerId};
pub use crate::keying::filter::{
    KeyingMode, apply_chroma_key, apply_chroma_key_par, apply_chroma_key_with,
};
pub use crate::keying::threshold::Threshold;
pub use crate::lifecycle::controller::{Compositor, CompositorState, PumpReport};
pub use crate::lifecycle::readiness::ReadySource;
pub use crate::loading::ticker::{DEFAULT_STATUS_LINES, LoadingTicker};
pub use crate::render::scheduler::{CycleOutcome, LoopHandle, LoopStats, RenderLoop};
pub use crate::surface::buffer::PixelBuffer;
pub use crate::surface::cpu::CpuSurface;
pub use crate::surface::{Surface, ensure_size};
pub use crate::video::clip::ClipSource;
pub use crate::video::media::{VideoSourceInfo, decode_clip, probe_video};
pub use crate::video::source::{VideoEvent, VideoSource};
