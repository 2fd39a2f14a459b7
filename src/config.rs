use image::imageops::FilterType;

use crate::error::{ExtractError, Result};

/// Side length of the square canvas every image is resampled to before counting.
pub const CANVAS_SIZE: u32 = 150;

/// Largest canvas side accepted by [`ExtractConfig::validate`].
pub const MAX_CANVAS: u32 = 1024;

/// Number of colors returned when the caller does not ask for a specific amount.
pub const DEFAULT_NUM_COLORS: usize = 10;

/// Controls the normalization step of the extraction pipeline.
///
/// The canvas size bounds the work done per image: counting always visits
/// `width * height` samples no matter how large the source is. The filter must
/// be deterministic so that the same source always yields the same samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractConfig {
    pub width: u32,
    pub height: u32,
    pub filter: FilterType,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
            filter: FilterType::CatmullRom,
        }
    }
}

impl ExtractConfig {
    /// Resample onto a `width` x `height` canvas instead of the default square.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Use `filter` for the resampling step.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Number of samples produced by the normalization step.
    pub fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject canvases that are empty or larger than [`MAX_CANVAS`] on either side.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ExtractError::invalid(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_CANVAS || self.height > MAX_CANVAS {
            return Err(ExtractError::invalid(format!(
                "canvas must be at most {MAX_CANVAS}x{MAX_CANVAS}, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Convert a signed count coming from a boundary (JS number, CLI flag) into a usable one.
pub fn checked_num_colors(requested: i64) -> Result<usize> {
    usize::try_from(requested)
        .map_err(|_| ExtractError::invalid(format!("num_colors must be >= 0, got {requested}")))
}
