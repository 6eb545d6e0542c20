use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// 8-bit RGB color. Serialized as six lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    #[must_use]
    pub const fn grey(level: u8) -> Self {
        Self::new(level, level, level)
    }

    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self::new(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    /// Parses six hex digits, with or without a leading `#`.
    #[must_use]
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_u32)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Moves each channel `fraction` of the way toward white (positive) or
    /// black (negative).
    #[must_use]
    pub fn shade(self, fraction: f64) -> Self {
        let target = if fraction < 0.0 { 0.0 } else { 255.0 };
        let amount = fraction.abs().min(1.0);
        let mix = |channel: u8| {
            let channel = f64::from(channel);
            ((target - channel) * amount + channel).round() as u8
        };
        Self::new(mix(self.red), mix(self.green), mix(self.blue))
    }

    /// Luminosity grey of the color after lifting dark channels and capping
    /// bright ones, so greyed categories stay distinguishable but muted.
    #[must_use]
    pub fn to_muted_grey(self) -> Self {
        const MAX_CHANNEL: u16 = 200;
        const LIFT: u16 = 20;
        let lift = |channel: u8| f64::from((u16::from(channel) + LIFT).min(MAX_CHANNEL));
        let level =
            0.2126 * lift(self.red) + 0.7152 * lift(self.green) + 0.0722 * lift(self.blue);
        Self::grey(level.round() as u8)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or_else(|| format!("`{value}` is not a six-digit hex color"))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// Fill of non-selected points while a selection is active.
pub const UNSELECTED_GREY: Rgb = Rgb::grey(0xb2);
/// Fill of non-emphasized circles in emphasis mode.
pub const NON_EMPHASIS_GREY: Rgb = Rgb::grey(0xbb);
/// Fill of non-emphasized single pixels in emphasis mode.
pub const NON_EMPHASIS_PIXEL_GREY: Rgb = Rgb::grey(0xdd);

/// Ordered category colors; index `i` is the color of category `i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    #[must_use]
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Parses hex strings. Malformed entries degrade to black so one bad
    /// value never stops the rest of the plot from rendering.
    #[must_use]
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Self {
        let colors = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Rgb::parse_hex(entry.as_ref()).unwrap_or_else(|| {
                    warn!(
                        index,
                        value = entry.as_ref(),
                        "illegal palette color, not a six-digit hex code; using black"
                    );
                    Rgb::BLACK
                })
            })
            .collect();
        Self { colors }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color of a category, black for unknown indices.
    #[must_use]
    pub fn color(&self, index: u8) -> Rgb {
        self.colors
            .get(usize::from(index))
            .copied()
            .unwrap_or(Rgb::BLACK)
    }

    /// Same palette with every entry replaced by its muted grey.
    #[must_use]
    pub fn muted_grey(&self) -> Self {
        Self {
            colors: self.colors.iter().map(|c| c.to_muted_grey()).collect(),
        }
    }

    /// Stable content hash used as sprite cache key component.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.colors.hash(&mut hasher);
        hasher.finish()
    }
}
