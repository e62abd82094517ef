// SPDX-License-Identifier: MIT
//
// ditto-color color system — OKLCH-native with f64 channels.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Ramp matching needs three things from a color: a perceptual distance,
// an interpolation that walks the hue wheel the short way, and exact
// round-trips through the L/C/H channels so an input color can be pinned
// into a generated scale without drift. All of it happens in OKLCH; sRGB
// only appears at the edges (hex in, hex out).
//
// Conversion pipeline:
//
//   OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB ↔ hex
//
// Out-of-gamut values are clamped channel by channel on the way out.
// There is deliberately no gamut mapping.

use std::fmt;

/// Chroma below this is treated as "no hue". Conversions from sRGB grays
/// land a few ULPs away from zero; those are snapped to `c = 0, h = 0`.
pub const ACHROMATIC_EPSILON: f64 = 1e-6;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A perceptual color stored in OKLCH space.
///
/// OKLCH is the cylindrical form of Björn Ottosson's Oklab space: equal
/// numerical steps in lightness and chroma produce roughly equal visual
/// steps, and hue is an angle on the color wheel.
///
/// Every channel is always present. A color without a meaningful hue (a
/// gray) carries `h = 0.0` rather than an "undefined" marker.
///
/// # Examples
///
/// ```
/// use ditto_color::Color;
///
/// let blue = Color::hex("#3b82f6").unwrap();
/// let red = Color::oklch(0.637, 0.237, 25.3);
///
/// let purple = blue.mix(&red, 0.5);
/// assert!(purple.distance(&blue) < red.distance(&blue));
/// ```
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f64,

    /// Chroma (colorfulness): 0.0 (gray) upward, ~0.37 at the sRGB edge.
    pub c: f64,

    /// Hue angle in degrees.
    /// 0° = pink/red, 90° = yellow, 180° = cyan/green, 270° = blue/purple.
    pub h: f64,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from OKLCH values. No clamping or normalization.
    #[inline]
    #[must_use]
    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Create a color from Oklab coordinates.
    #[must_use]
    pub fn oklab(l: f64, a: f64, b: f64) -> Self {
        let (l, c, h) = oklab_to_oklch(l, a, b);
        Self { l, c, h }
    }

    /// Create a color from sRGB values (0.0 to 1.0 range).
    #[must_use]
    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Self { l, c, h }
    }

    /// Create a color from 8-bit sRGB values (0 to 255).
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Create a color from a hex string.
    ///
    /// Supports `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (with or without `#`).
    /// An alpha component is accepted and discarded.
    ///
    /// Returns `None` if the string is not a valid hex color.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Create a pure gray color at the given OKLCH lightness.
    #[inline]
    #[must_use]
    pub const fn gray(lightness: f64) -> Self {
        Self::oklch(lightness, 0.0, 0.0)
    }

    /// Pure black.
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    /// Whether this color is achromatic (no visible chroma).
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < ACHROMATIC_EPSILON
    }

    // ─── Channel Replacement ─────────────────────────────────────────────

    /// Set lightness to an absolute value (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub const fn set_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Set chroma to an absolute value (clamped to >= 0.0).
    #[inline]
    #[must_use]
    pub const fn set_chroma(self, c: f64) -> Self {
        Self {
            c: c.max(0.0),
            ..self
        }
    }

    /// Set hue to an absolute angle (normalized to 0°–360°).
    #[inline]
    #[must_use]
    pub fn set_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }

    /// Replace the hue verbatim, keeping lightness and chroma.
    ///
    /// Unlike [`set_hue`](Self::set_hue) the angle is not normalized, so a
    /// hue copied from another color comes through bit-for-bit.
    #[inline]
    #[must_use]
    pub const fn with_hue(self, h: f64) -> Self {
        Self { h, ..self }
    }

    // ─── Perceptual Operations ───────────────────────────────────────────

    /// Mix this color with another in OKLCH space.
    ///
    /// `t` = 0.0 returns `self`, `t` = 1.0 returns `other`. Lightness and
    /// chroma are interpolated linearly; hue takes the shortest path around
    /// the wheel. When one side has no hue, the other side's hue is used
    /// unchanged.
    #[must_use]
    pub fn mix(self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        let h = if self.is_achromatic() {
            other.h
        } else if other.is_achromatic() {
            self.h
        } else {
            interpolate_hue(self.h, other.h, t)
        };

        Self {
            l: self.l.mul_add(inv_t, other.l * t),
            c: self.c.mul_add(inv_t, other.c * t),
            h,
        }
    }

    /// Compute the perceptual distance to another color.
    ///
    /// Euclidean distance in Oklab (L, a, b). This is the same quantity as
    /// the Euclidean OKLCH difference with the hue term weighted by chroma.
    /// Values below ~0.02 are generally imperceptible.
    #[must_use]
    pub fn distance(self, other: &Self) -> f64 {
        let (l1, a1, b1) = oklch_to_oklab(self.l, self.c, self.h);
        let (l2, a2, b2) = oklch_to_oklab(other.l, other.c, other.h);
        let dl = l1 - l2;
        let da = a1 - a2;
        let db = b1 - b2;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }

    /// Angular distance between the two hues, in degrees (0–180).
    #[inline]
    #[must_use]
    pub fn hue_distance(self, other: &Self) -> f64 {
        hue_diff(self.h, other.h)
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Convert to Oklab `(L, a, b)`.
    #[must_use]
    pub fn to_oklab(self) -> (f64, f64, f64) {
        oklch_to_oklab(self.l, self.c, self.h)
    }

    /// Convert to sRGB. Values may fall outside 0.0–1.0.
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        oklch_to_srgb(self.l, self.c, self.h)
    }

    /// Convert to 8-bit sRGB, clamping each channel to the sRGB cube.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_srgb();
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Convert to a `#rrggbb` hex string.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Whether this color is within the sRGB gamut.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        const EPS: f64 = 1e-7;
        let (r, g, b) = self.to_srgb();
        [r, g, b].iter().all(|v| (-EPS..=1.0 + EPS).contains(v))
    }

    /// CSS `oklch()` notation with channels rounded to `precision` decimals.
    ///
    /// ```
    /// use ditto_color::Color;
    /// assert_eq!(Color::oklch(0.5, 0.1, 120.0).to_css_oklch(3), "oklch(0.5 0.1 120)");
    /// ```
    #[must_use]
    pub fn to_css_oklch(self, precision: usize) -> String {
        format!(
            "oklch({} {} {})",
            round_channel(self.l, precision),
            round_channel(self.c, precision),
            round_channel(self.h, precision),
        )
    }

    /// CSS `oklab()` notation with channels rounded to `precision` decimals.
    #[must_use]
    pub fn to_css_oklab(self, precision: usize) -> String {
        let (l, a, b) = self.to_oklab();
        format!(
            "oklab({} {} {})",
            round_channel(l, precision),
            round_channel(a, precision),
            round_channel(b, precision),
        )
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        // Compare with small epsilon for floating point
        const EPS: f64 = 1e-9;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.is_achromatic()
                || other.is_achromatic()
                || hue_diff(self.h, other.h) < EPS)
    }
}

impl Default for Color {
    /// Default is black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// Oklab math by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/
//
// Pipeline: OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Absolute hue difference (shortest arc on the color wheel).
#[inline]
#[must_use]
pub fn hue_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// Interpolate between two hue angles taking the shortest path.
#[inline]
fn interpolate_hue(h1: f64, h2: f64, t: f64) -> f64 {
    let diff = h2 - h1;
    let diff = if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    };
    normalize_hue(diff.mul_add(t, h1))
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

#[inline]
fn oklch_to_oklab(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let h_rad = h.to_radians();
    (l, c * h_rad.cos(), c * h_rad.sin())
}

#[inline]
fn oklab_to_oklch(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let c = a.hypot(b);
    if c < ACHROMATIC_EPSILON {
        // Achromatic — hue is undefined, default to 0
        return (l, 0.0, 0.0);
    }
    let h = b.atan2(a).to_degrees();
    (l, c, if h < 0.0 { h + 360.0 } else { h })
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// Both directions pass through LMS cone space. Matrices from Ottosson's
// original post.

fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let l_ = 0.215_803_757_3f64.mul_add(b, 0.396_337_777_4f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_8f64.mul_add(-b, 0.105_561_345_8f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548_0f64.mul_add(-b, 0.089_484_177_5f64.mul_add(-a, l_ok));

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 0.230_969_929_2f64.mul_add(s, 4.076_741_662_1f64.mul_add(l, -(3.307_711_591_3 * m)));
    let g = 0.341_319_396_5f64.mul_add(-s, (-1.268_438_004_6f64).mul_add(l, 2.609_757_401_1 * m));
    let bl = 1.707_614_701_0f64.mul_add(s, (-0.004_196_086_3f64).mul_add(l, -(0.703_418_614_7 * m)));

    (r, g, bl)
}

fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let l = 0.051_445_992_9f64.mul_add(b, 0.412_221_470_8f64.mul_add(r, 0.536_332_536_3 * g));
    let m = 0.107_396_956_6f64.mul_add(b, 0.211_903_498_2f64.mul_add(r, 0.680_699_545_1 * g));
    let s = 0.629_978_700_5f64.mul_add(b, 0.088_302_461_9f64.mul_add(r, 0.281_718_837_6 * g));

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.004_072_046_8f64.mul_add(-s_, 0.210_454_255_3f64.mul_add(l_, 0.793_617_785_0 * m_));
    let a = 0.450_593_709_9f64.mul_add(s_, 1.977_998_495_1f64.mul_add(l_, -(2.428_592_205_0 * m_)));
    let b_ok = 0.808_675_766_0f64.mul_add(-s_, 0.025_904_037_1f64.mul_add(l_, 0.782_771_766_2 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c.abs() <= 0.003_130_8 {
        c * 12.92
    } else {
        c.signum() * 1.055f64.mul_add(c.abs().powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c.abs() <= 0.040_45 {
        c / 12.92
    } else {
        c.signum() * ((c.abs() + 0.055) / 1.055).powf(2.4)
    }
}

fn srgb_to_oklch(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (l, a, b_ok) = linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    oklab_to_oklch(l, a, b_ok)
}

fn oklch_to_srgb(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let (l, a, b) = oklch_to_oklab(l, c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB, #RGBA
        3 | 4 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            if bytes.len() == 4 {
                parse_hex_digit(bytes[3])?;
            }
            Some(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB, #RRGGBBAA
        6 | 8 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            if bytes.len() == 8 {
                parse_hex_byte(&bytes[6..8])?;
            }
            Some(Color::rgb8(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

/// Round to `precision` decimals and drop trailing zeros (`0.500` → `0.5`).
fn round_channel(v: f64, precision: usize) -> String {
    let text = format!("{v:.precision$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" { "0".to_owned() } else { text.to_owned() }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
