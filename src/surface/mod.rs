pub(crate) mod buffer;
pub(crate) mod cpu;

use crate::foundation::core::Size;
use crate::foundation::error::GreenkeyResult;
use crate::surface::buffer::PixelBuffer;
use crate::video::source::VideoSource;

/// Pixel surface the compositor draws video frames into and presents from.
///
/// A cycle calls, in order: [`ensure_size`], [`Surface::draw_frame`],
/// [`Surface::read_pixels`], [`Surface::write_pixels`], [`Surface::present`]. Between read and
/// write the caller owns the pixels; the surface holds no copy.
pub trait Surface {
    /// Current backing size.
    fn size(&self) -> Size;

    /// Replace the backing store with a transparent one of `size`.
    fn resize(&mut self, size: Size) -> GreenkeyResult<()>;

    /// Copy the video's current frame over the whole surface, scaling when sizes differ.
    fn draw_frame(&mut self, video: &dyn VideoSource) -> GreenkeyResult<()>;

    /// Check the pixels out for in-place processing.
    fn read_pixels(&mut self) -> GreenkeyResult<PixelBuffer>;

    /// Return processed pixels. Size must match [`Surface::size`].
    fn write_pixels(&mut self, pixels: PixelBuffer) -> GreenkeyResult<()>;

    /// Make written pixels visible.
    ///
    /// On-page surfaces show written pixels immediately, so the default does nothing.
    fn present(&mut self) -> GreenkeyResult<()> {
        Ok(())
    }

    /// Drop the backing store.
    fn reset(&mut self);
}

/// Resize `surface` only when its size differs from `size`.
///
/// Returns `true` when a resize happened; prior content is discarded.
pub fn ensure_size(surface: &mut dyn Surface, size: Size) -> GreenkeyResult<bool> {
    if surface.size() == size {
        return Ok(false);
    }
    tracing::debug!(from = %surface.size(), to = %size, "resizing surface");
    surface.resize(size)?;
    Ok(true)
}
