use crate::foundation::core::Size;
use crate::foundation::error::{GreenkeyError, GreenkeyResult};
use crate::keying::filter::{KeyingMode, apply_chroma_key_with};
use crate::keying::threshold::Threshold;

/// Row-major straight-alpha RGBA8 pixels.
///
/// The only constructors validate `data.len() == width * height * 4`, so every buffer holds
/// whole pixels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer of `size`.
    pub fn new(size: Size) -> GreenkeyResult<Self> {
        let len = size.rgba_len()?;
        Ok(Self {
            size,
            data: vec![0; len],
        })
    }

    /// Wrap existing RGBA8 bytes.
    pub fn from_rgba(size: Size, data: Vec<u8>) -> GreenkeyResult<Self> {
        let expected = size.rgba_len()?;
        if data.len() != expected {
            return Err(GreenkeyError::validation(format!(
                "rgba buffer for {size} must be {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self { size, data })
    }

    /// Buffer of `size` with every pixel set to `px`.
    pub fn filled(size: Size, px: [u8; 4]) -> GreenkeyResult<Self> {
        let _ = size.rgba_len()?;
        Ok(Self {
            size,
            data: px.repeat(size.pixel_count()),
        })
    }

    /// Dimensions in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Bytes in one row.
    pub fn row_bytes(&self) -> usize {
        self.size.width as usize * 4
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 bytes. Length cannot change through this view.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give up the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Resize to `size` when it differs, discarding prior content.
    ///
    /// Returns `true` when a resize happened.
    pub fn ensure_size(&mut self, size: Size) -> GreenkeyResult<bool> {
        if self.size == size {
            return Ok(false);
        }
        *self = Self::new(size)?;
        Ok(true)
    }

    /// Key out the green background in place.
    pub fn chroma_key(&mut self, threshold: &Threshold, mode: KeyingMode) {
        let row_bytes = self.row_bytes();
        apply_chroma_key_with(&mut self.data, threshold, row_bytes, mode);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/buffer.rs"]
mod tests;
