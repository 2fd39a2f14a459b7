// ------------------------------------------------------------
// Top-color extraction pipeline
// ------------------------------------------------------------
//
// normalize -> flatten -> count -> rank -> encode
//
// Only counts matter for the result, so the flattening order is irrelevant
// except for ties: equal counts keep the order in which their colors were
// first met while scanning the canvas row by row.

use std::collections::HashMap;

use image::{DynamicImage, GenericImageView, RgbImage, imageops};
use log::{debug, trace};

use crate::config::ExtractConfig;
use crate::error::{ExtractError, Result};
use crate::sample::{ColorSample, RankedColor};

/// Frequency of every distinct color, remembering first-seen order.
#[derive(Clone, Debug, Default)]
pub struct ColorCount {
    index: HashMap<ColorSample, usize>,
    entries: Vec<RankedColor>,
}

impl ColorCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, color: ColorSample) {
        match self.index.get(&color) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(color, self.entries.len());
                self.entries.push(RankedColor { color, count: 1 });
            }
        }
    }

    pub fn get(&self, color: &ColorSample) -> usize {
        self.index.get(color).map_or(0, |&slot| self.entries[slot].count)
    }

    /// Number of distinct colors seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of samples counted.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Most frequent colors first, at most `num_colors` of them.
    ///
    /// The sort is stable over first-seen order, so among equally frequent
    /// colors the one encountered earliest wins.
    pub fn into_ranked(self, num_colors: usize) -> Vec<RankedColor> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(num_colors);
        entries
    }
}

impl FromIterator<ColorSample> for ColorCount {
    fn from_iter<I: IntoIterator<Item = ColorSample>>(iter: I) -> Self {
        let mut counts = ColorCount::new();
        for color in iter {
            counts.add(color);
        }
        counts
    }
}

/// Count every sample of the sequence.
pub fn count_colors<I>(samples: I) -> ColorCount
where
    I: IntoIterator<Item = ColorSample>,
{
    samples.into_iter().collect()
}

/// Drop alpha and resample onto the fixed canvas.
pub fn normalize(img: &DynamicImage, config: &ExtractConfig) -> Result<RgbImage> {
    config.validate()?;

    let (in_w, in_h) = img.dimensions();
    if in_w == 0 || in_h == 0 {
        return Err(ExtractError::EmptyImage {
            width: in_w,
            height: in_h,
        });
    }

    let rgb = img.to_rgb8();
    let canvas = imageops::resize(&rgb, config.width, config.height, config.filter);
    debug!(
        "resampled {in_w}x{in_h} -> {}x{} ({:?})",
        config.width, config.height, config.filter
    );
    Ok(canvas)
}

/// Row-major sequence of the canvas samples.
pub fn flatten(canvas: &RgbImage) -> impl Iterator<Item = ColorSample> + '_ {
    canvas.pixels().map(|&p| ColorSample::from(p))
}

/// The `num_colors` most frequent colors of `img`, with their counts.
pub fn rank_colors(img: &DynamicImage, num_colors: usize) -> Result<Vec<RankedColor>> {
    rank_colors_with(img, num_colors, &ExtractConfig::default())
}

/// Same as [`rank_colors`] with an explicit canvas and filter.
pub fn rank_colors_with(
    img: &DynamicImage,
    num_colors: usize,
    config: &ExtractConfig,
) -> Result<Vec<RankedColor>> {
    let canvas = normalize(img, config)?;
    let counts = count_colors(flatten(&canvas));
    trace!("counted {} samples, {} distinct colors", counts.total(), counts.len());

    let ranked = counts.into_ranked(num_colors);
    debug!("kept {} of {num_colors} requested colors", ranked.len());
    Ok(ranked)
}

/// The `num_colors` most frequent colors of `img` as `#rrggbb`, most frequent first.
///
/// Returns fewer entries when the image holds fewer distinct colors, and an
/// empty list for `num_colors == 0`.
pub fn extract_top_colors(img: &DynamicImage, num_colors: usize) -> Result<Vec<String>> {
    extract_top_colors_with(img, num_colors, &ExtractConfig::default())
}

/// Same as [`extract_top_colors`] with an explicit canvas and filter.
pub fn extract_top_colors_with(
    img: &DynamicImage,
    num_colors: usize,
    config: &ExtractConfig,
) -> Result<Vec<String>> {
    let ranked = rank_colors_with(img, num_colors, config)?;
    Ok(ranked.iter().map(RankedColor::hex).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    const RED: ColorSample = ColorSample::new(255, 0, 0);
    const BLUE: ColorSample = ColorSample::new(0, 0, 255);

    #[test]
    fn counts_keep_first_seen_order() {
        let counts = count_colors([BLUE, RED, RED, BLUE, RED]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.get(&RED), 3);
        assert_eq!(counts.get(&BLUE), 2);
        assert_eq!(counts.get(&ColorSample::new(1, 2, 3)), 0);

        let ranked = counts.into_ranked(10);
        assert_eq!(ranked[0], RankedColor { color: RED, count: 3 });
        assert_eq!(ranked[1], RankedColor { color: BLUE, count: 2 });
    }

    #[test]
    fn ties_go_to_first_encountered() {
        let ranked = count_colors([BLUE, RED, RED, BLUE]).into_ranked(1);
        assert_eq!(ranked, vec![RankedColor { color: BLUE, count: 2 }]);
    }

    #[test]
    fn ranking_truncates_without_padding() {
        let counts = count_colors([RED, BLUE]);
        assert_eq!(counts.clone().into_ranked(0).len(), 0);
        assert_eq!(counts.into_ranked(5).len(), 2);
    }

    #[test]
    fn normalize_bounds_sample_count() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(640, 37, Rgb([9, 9, 9])));
        let canvas = normalize(&img, &ExtractConfig::default()).unwrap();
        assert_eq!(canvas.dimensions(), (150, 150));
        assert_eq!(flatten(&canvas).count(), 22_500);
    }

    #[test]
    fn normalize_drops_alpha() {
        let mut rgba = RgbaImage::new(20, 20);
        for (x, _, p) in rgba.enumerate_pixels_mut() {
            *p = Rgba([10, 20, 30, (x * 12) as u8]);
        }
        let img = DynamicImage::ImageRgba8(rgba);
        let colors = extract_top_colors(&img, 10).unwrap();
        assert_eq!(colors, vec!["#0a141e".to_string()]);
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let err = extract_top_colors(&img, 3).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn huge_canvas_fails_before_resampling() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])));
        let config = ExtractConfig::default().with_canvas(u32::MAX, u32::MAX);
        let err = rank_colors_with(&img, 1, &config).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidArgument(_)));
    }

    #[test]
    fn nearest_filter_keeps_source_palette() {
        let mut rgb = RgbImage::new(300, 300);
        for (x, y, p) in rgb.enumerate_pixels_mut() {
            *p = if (x / 100 + y / 100) % 2 == 0 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            };
        }
        let img = DynamicImage::ImageRgb8(rgb);
        let config = ExtractConfig::default().with_filter(imageops::FilterType::Nearest);
        let ranked = rank_colors_with(&img, 10, &config).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked.iter().map(|r| r.count).sum::<usize>(), 22_500);
        // 5 of the 9 blocks are red
        assert_eq!(ranked[0].color, RED);
    }
}
