use std::path::{Path, PathBuf};

use crate::foundation::core::{Fps, Size};
use crate::foundation::error::{GreenkeyError, GreenkeyResult};
#[cfg(feature = "media-ffmpeg")]
use crate::surface::buffer::PixelBuffer;
use crate::video::clip::ClipSource;

#[derive(Clone, Debug)]
/// Basic metadata about a source video file.
pub struct VideoSourceInfo {
    /// Source path used for probing/decoding.
    #[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
    pub source_path: PathBuf,
    /// Intrinsic size of the first video stream.
    pub size: Size,
    /// Frame rate reported by the container, when it parses.
    pub fps: Option<Fps>,
}

/// Probe source video metadata through `ffprobe`.
#[cfg(feature = "media-ffmpeg")]
#[tracing::instrument]
pub fn probe_video(source_path: &Path) -> GreenkeyResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(source_path)
        .output()
        .map_err(|e| GreenkeyError::decode(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(GreenkeyError::decode(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| GreenkeyError::decode(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| GreenkeyError::decode("no video stream found"))?;
    let width = stream
        .width
        .ok_or_else(|| GreenkeyError::decode("missing video width from ffprobe"))?;
    let height = stream
        .height
        .ok_or_else(|| GreenkeyError::decode("missing video height from ffprobe"))?;

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        size: Size::new(width, height),
        fps: stream.r_frame_rate.as_deref().and_then(parse_rational_fps),
    })
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Probe source video metadata through `ffprobe`.
///
/// Returns an error when `media-ffmpeg` feature is disabled.
pub fn probe_video(_source_path: &Path) -> GreenkeyResult<VideoSourceInfo> {
    Err(GreenkeyError::decode(
        "video decoding requires the 'media-ffmpeg' feature",
    ))
}

/// Decode up to `max_frames` RGBA frames of `source_path` into a looping [`ClipSource`].
///
/// Audio is dropped; the clip plays silent. `fallback_fps` is used when the container does
/// not report a usable rate.
#[cfg(feature = "media-ffmpeg")]
#[tracing::instrument]
pub fn decode_clip(
    source_path: &Path,
    max_frames: u32,
    fallback_fps: Fps,
) -> GreenkeyResult<ClipSource> {
    if max_frames == 0 {
        return Err(GreenkeyError::validation("max_frames must be > 0"));
    }
    let info = probe_video(source_path)?;
    let frame_len = info.size.rgba_len()?;
    if frame_len == 0 {
        return Err(GreenkeyError::decode(
            "decoded video frame size is zero (invalid source dimensions)",
        ));
    }

    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(&info.source_path)
        .args([
            "-an",
            "-frames:v",
            &max_frames.to_string(),
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "pipe:1",
        ])
        .output()
        .map_err(|e| GreenkeyError::decode(format!("failed to run ffmpeg for decode: {e}")))?;
    if !out.status.success() {
        return Err(GreenkeyError::decode(format!(
            "ffmpeg decode failed for '{}': {}",
            info.source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    if out.stdout.is_empty() || !out.stdout.len().is_multiple_of(frame_len) {
        return Err(GreenkeyError::decode(format!(
            "decoded video has invalid size: got {} bytes, expected multiples of {frame_len}",
            out.stdout.len()
        )));
    }

    let frames = out
        .stdout
        .chunks_exact(frame_len)
        .map(|chunk| PixelBuffer::from_rgba(info.size, chunk.to_vec()))
        .collect::<GreenkeyResult<Vec<_>>>()?;
    tracing::debug!(frames = frames.len(), size = %info.size, "decoded clip");

    Ok(ClipSource::new(frames, info.fps.unwrap_or(fallback_fps)))
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Decode up to `max_frames` RGBA frames of `source_path` into a looping [`ClipSource`].
///
/// Returns an error when `media-ffmpeg` feature is disabled.
pub fn decode_clip(
    _source_path: &Path,
    _max_frames: u32,
    _fallback_fps: Fps,
) -> GreenkeyResult<ClipSource> {
    Err(GreenkeyError::decode(
        "video decoding requires the 'media-ffmpeg' feature",
    ))
}

/// Parse ffprobe's `num/den` rate notation.
#[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
pub(crate) fn parse_rational_fps(s: &str) -> Option<Fps> {
    let (num, den) = s.split_once('/')?;
    Fps::new(num.trim().parse().ok()?, den.trim().parse().ok()?).ok()
}
