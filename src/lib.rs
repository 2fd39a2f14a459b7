use js_sys::Array;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod extract;
pub mod sample;

pub use config::{
    CANVAS_SIZE, DEFAULT_NUM_COLORS, ExtractConfig, MAX_CANVAS, checked_num_colors,
};
pub use error::{ExtractError, Result};
pub use extract::{
    ColorCount, count_colors, extract_top_colors, extract_top_colors_with, flatten, normalize,
    rank_colors, rank_colors_with,
};
pub use sample::{ColorSample, RankedColor};

/// Extract the most frequent colors of an encoded image.
///
/// `num_colors` defaults to 10 when omitted. The returned array holds
/// lowercase `#rrggbb` strings, most frequent first.
#[wasm_bindgen]
pub fn top_colors(
    input: Vec<u8>,
    num_colors: Option<i32>,
) -> std::result::Result<Array, JsValue> {
    let num_colors = match num_colors {
        Some(n) => checked_num_colors(i64::from(n)),
        None => Ok(DEFAULT_NUM_COLORS),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let img = image::load_from_memory(&input)
        .map_err(|e| JsValue::from_str(&ExtractError::from(e).to_string()))?;
    let colors = extract_top_colors(&img, num_colors)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let out = Array::new();
    for hex in colors {
        out.push(&JsValue::from_str(&hex));
    }
    Ok(out)
}

/// Decode `input` from memory and extract its top colors.
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_top_colors_bytes(input: &[u8], num_colors: usize) -> Result<Vec<String>> {
    extract_top_colors_bytes_with(input, num_colors, &ExtractConfig::default())
}

/// Same as [`extract_top_colors_bytes`] with an explicit canvas and filter.
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_top_colors_bytes_with(
    input: &[u8],
    num_colors: usize,
    config: &ExtractConfig,
) -> Result<Vec<String>> {
    let ranked = rank_colors_bytes_with(input, num_colors, config)?;
    Ok(ranked.iter().map(RankedColor::hex).collect())
}

/// Decode `input` from memory and rank its colors, keeping the counts.
#[cfg(not(target_arch = "wasm32"))]
pub fn rank_colors_bytes_with(
    input: &[u8],
    num_colors: usize,
    config: &ExtractConfig,
) -> Result<Vec<RankedColor>> {
    let img = image::load_from_memory(input)?;
    rank_colors_with(&img, num_colors, config)
}

/// Open the image at `path` and extract its top colors.
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_top_colors_path(
    path: impl AsRef<std::path::Path>,
    num_colors: usize,
) -> Result<Vec<String>> {
    let img = image::open(path)?;
    extract_top_colors(&img, num_colors)
}
