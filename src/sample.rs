use std::fmt;
use std::str::FromStr;

use image::Rgb;
use palette::Srgb;
use palette::rgb::FromHexError;

/// One pixel's color after the alpha channel has been dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorSample {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorSample {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Accepts `#rrggbb`, `rrggbb`, `#rgb` and `rgb`.
impl FromStr for ColorSample {
    type Err = FromHexError;

    fn from_str(hex: &str) -> Result<Self, Self::Err> {
        let srgb: Srgb<u8> = hex.parse()?;
        Ok(srgb.into())
    }
}

impl From<Rgb<u8>> for ColorSample {
    fn from(Rgb([red, green, blue]): Rgb<u8>) -> Self {
        Self { red, green, blue }
    }
}

impl From<Srgb<u8>> for ColorSample {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

impl From<ColorSample> for Srgb<u8> {
    fn from(c: ColorSample) -> Self {
        Srgb::new(c.red, c.green, c.blue)
    }
}

/// A distinct color together with how many samples carried it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedColor {
    pub color: ColorSample,
    pub count: usize,
}

impl RankedColor {
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }
}
