use rayon::prelude::*;

use crate::keying::threshold::Threshold;

/// How the color-key filter walks a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyingMode {
    /// One pass on the calling thread.
    #[default]
    Sequential,
    /// Rows are split across the rayon pool. Output is bit-identical to `Sequential`.
    Parallel,
}

/// Force alpha to zero for every background pixel of a straight-alpha RGBA8 slice.
///
/// Non-background pixels are left untouched, alpha included. Trailing bytes that do not
/// form a whole pixel are ignored.
pub fn apply_chroma_key(pixels: &mut [u8], threshold: &Threshold) {
    for px in pixels.chunks_exact_mut(4) {
        if threshold.is_background(px[0], px[1], px[2]) {
            px[3] = 0;
        }
    }
}

/// Row-parallel variant of [`apply_chroma_key`].
///
/// `row_bytes` is the stride of one row (`width * 4`). A stride that is zero or not a
/// multiple of 4 falls back to the sequential walk.
pub fn apply_chroma_key_par(pixels: &mut [u8], threshold: &Threshold, row_bytes: usize) {
    if row_bytes == 0 || !row_bytes.is_multiple_of(4) {
        apply_chroma_key(pixels, threshold);
        return;
    }
    pixels
        .par_chunks_mut(row_bytes)
        .for_each(|row| apply_chroma_key(row, threshold));
}

/// Dispatch on [`KeyingMode`].
pub fn apply_chroma_key_with(
    pixels: &mut [u8],
    threshold: &Threshold,
    row_bytes: usize,
    mode: KeyingMode,
) {
    match mode {
        KeyingMode::Sequential => apply_chroma_key(pixels, threshold),
        KeyingMode::Parallel => apply_chroma_key_par(pixels, threshold, row_bytes),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/keying/filter.rs"]
mod tests;
