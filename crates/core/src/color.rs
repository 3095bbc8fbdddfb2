//! The 3-byte RGB color type, hex parsing, channel blending, and the
//! HSL hue-cycle transform.
//!
//! Colors travel through the configuration layer as bare 6-digit hex strings
//! (`"rrggbb"`, no hash), so that is the canonical wire form here: serde
//! serializes to it and `from_hex` also tolerates a leading `#`.

use crate::error::FlowError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 3-byte RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parses a hex color like `"ff00aa"` or `"#FF00AA"` (case insensitive).
    ///
    /// Anything that is not a 2-hex-digit triplet is `FlowError::InvalidColor`
    /// — a fatal configuration error, detected at build time.
    pub fn from_hex(hex: &str) -> Result<Rgb, FlowError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(FlowError::InvalidColor(hex.to_string()));
        }
        let channel = |range| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| FlowError::InvalidColor(hex.to_string()))
        };
        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Formats as lowercase `"rrggbb"` (no hash).
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation from `self` toward `other` by `t`.
    ///
    /// Per channel: `floor(a − (a − b)·t)`, computed in f64. `t = 0` returns
    /// `self` and `t = 1` returns `other` exactly; the gradient interpolator
    /// depends on both endpoints being exact.
    pub fn blend(self, other: Rgb, t: f64) -> Rgb {
        let channel = |a: u8, b: u8| {
            let a = a as f64;
            let b = b as f64;
            (a - (a - b) * t).floor().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    /// Converts HSL to RGB. Hue in degrees (normalized into [0, 360) first),
    /// saturation and lightness in [0, 1].
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Rgb {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let quantize = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb {
            r: quantize(r),
            g: quantize(g),
            b: quantize(b),
        }
    }
}

/// The cyclic-hue color mode: `percent` in [0, 1) maps to a fully saturated,
/// half-lightness hue sweep around the color wheel.
pub fn hue_cycle(percent: f64) -> Rgb {
    Rgb::from_hsl(percent * 360.0, 1.0, 0.5)
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
