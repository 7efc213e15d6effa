use crate::foundation::error::{GreenkeyError, GreenkeyResult};

/// Green-screen classification thresholds.
///
/// A pixel is background when `g > green_min`, `g > r * green_vs_red` and
/// `g > b * green_vs_blue`. Ratios are compared in `f64`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Threshold {
    /// Minimum green channel value for a background pixel (exclusive).
    pub green_min: u8,
    /// How much green must dominate red (exclusive ratio).
    pub green_vs_red: f64,
    /// How much green must dominate blue (exclusive ratio).
    pub green_vs_blue: f64,
}

impl Threshold {
    /// Thresholds tuned for the bundled green-screen loops.
    pub const DEFAULT: Self = Self {
        green_min: 90,
        green_vs_red: 1.4,
        green_vs_blue: 1.4,
    };

    /// Classify one straight-alpha pixel.
    #[inline]
    pub fn is_background(&self, r: u8, g: u8, b: u8) -> bool {
        let gf = f64::from(g);
        g > self.green_min
            && gf > f64::from(r) * self.green_vs_red
            && gf > f64::from(b) * self.green_vs_blue
    }

    /// Reject ratios that are not finite or negative.
    pub fn validate(&self) -> GreenkeyResult<()> {
        for (name, v) in [
            ("green_vs_red", self.green_vs_red),
            ("green_vs_blue", self.green_vs_blue),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GreenkeyError::validation(format!(
                    "threshold {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}
