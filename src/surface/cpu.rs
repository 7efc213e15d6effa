use image::{RgbaImage, imageops};

use crate::foundation::core::Size;
use crate::foundation::error::{GreenkeyError, GreenkeyResult};
use crate::surface::Surface;
use crate::surface::buffer::PixelBuffer;
use crate::video::source::VideoSource;

/// In-memory surface; doubles as the display surface.
///
/// Written pixels are what the host shows. `presented_frames` counts presents so hosts and
/// tests can observe that the loop is (or is no longer) producing frames.
#[derive(Debug, Default)]
pub struct CpuSurface {
    size: Size,
    // `None` while the pixels are checked out, or after `reset`.
    pixels: Option<PixelBuffer>,
    presented_frames: u64,
    writes: u64,
}

impl CpuSurface {
    /// Empty 0x0 surface. The first cycle sizes it to the video.
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed pixels, if any.
    pub fn pixels(&self) -> Option<&PixelBuffer> {
        self.pixels.as_ref()
    }

    /// Number of completed presents.
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    /// Number of accepted pixel write-backs.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Copy of the displayed pixels as an `image` buffer.
    pub fn to_image(&self) -> Option<RgbaImage> {
        let px = self.pixels.as_ref()?;
        RgbaImage::from_raw(px.width(), px.height(), px.as_bytes().to_vec())
    }

    fn checked_out() -> GreenkeyError {
        GreenkeyError::surface_access("surface pixels are checked out or released")
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) -> GreenkeyResult<()> {
        self.pixels = Some(PixelBuffer::new(size)?);
        self.size = size;
        Ok(())
    }

    fn draw_frame(&mut self, video: &dyn VideoSource) -> GreenkeyResult<()> {
        let frame = video.current_frame()?;
        let dst = self.pixels.as_mut().ok_or_else(Self::checked_out)?;
        if dst.size().is_empty() {
            return Ok(());
        }
        if frame.size() == dst.size() {
            dst.as_bytes_mut().copy_from_slice(frame.as_bytes());
            return Ok(());
        }

        let src = RgbaImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
            .ok_or_else(|| GreenkeyError::frame_access("frame bytes do not match its size"))?;
        let scaled = imageops::resize(
            &src,
            dst.width(),
            dst.height(),
            imageops::FilterType::Nearest,
        );
        dst.as_bytes_mut().copy_from_slice(scaled.as_raw());
        Ok(())
    }

    fn read_pixels(&mut self) -> GreenkeyResult<PixelBuffer> {
        self.pixels.take().ok_or_else(Self::checked_out)
    }

    fn write_pixels(&mut self, pixels: PixelBuffer) -> GreenkeyResult<()> {
        if pixels.size() != self.size {
            // Keep the surface usable for the next cycle.
            self.pixels = Some(PixelBuffer::new(self.size)?);
            return Err(GreenkeyError::surface_access(format!(
                "write of {} pixels into {} surface",
                pixels.size(),
                self.size
            )));
        }
        self.pixels = Some(pixels);
        self.writes += 1;
        Ok(())
    }

    fn present(&mut self) -> GreenkeyResult<()> {
        if self.pixels.is_none() {
            return Err(Self::checked_out());
        }
        self.presented_frames += 1;
        Ok(())
    }

    fn reset(&mut self) {
        self.pixels = None;
        self.size = Size::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/cpu.rs"]
mod tests;
