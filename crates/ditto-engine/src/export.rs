//! CSS export — a generated scale as `:root` custom properties.
//!
//! ```text
//! :root {
//!   /* brand: blend from blue (62%) + violet (38%) @ shade 500 */
//!   --brand-50: oklch(0.97 0.014 283.4);
//!   ...
//! }
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use ditto_color::Color;
use thiserror::Error;

use crate::generate::GenerateResult;

/// Decimal places for functional notations.
const PRECISION: usize = 3;

/// How each shade's color is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorFormat {
    /// `oklch(L C H)`
    #[default]
    Oklch,
    /// `oklab(L a b)`
    Oklab,
    /// `#rrggbb`, clamped to sRGB.
    Hex,
}

impl ColorFormat {
    /// All formats, in the order they are listed to users.
    pub const ALL: [Self; 3] = [Self::Oklch, Self::Oklab, Self::Hex];

    /// Format name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oklch => "oklch",
            Self::Oklab => "oklab",
            Self::Hex => "hex",
        }
    }

    /// Render one color.
    #[must_use]
    pub fn format(self, color: Color) -> String {
        match self {
            Self::Oklch => color.to_css_oklch(PRECISION),
            Self::Oklab => color.to_css_oklab(PRECISION),
            Self::Hex => color.to_hex(),
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color format `{0}` (expected oklch, oklab or hex)")]
pub struct UnknownFormatError(pub String);

impl FromStr for ColorFormat {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == lower)
            .ok_or_else(|| UnknownFormatError(s.to_owned()))
    }
}

/// Render `result` as a `:root` block of `--<name>-<shade>` properties.
///
/// `name` is used as given; pass it through [`sanitize_name`] first if it
/// comes from a user.
#[must_use]
pub fn to_css(result: &GenerateResult, name: &str, format: ColorFormat) -> String {
    let info = result
        .sources
        .iter()
        .map(|source| format!("{} ({:.0}%)", source.name, source.weight * 100.0))
        .collect::<Vec<_>>()
        .join(" + ");

    let mut lines = vec![format!(
        "  /* {name}: {} from {info} @ shade {} */",
        result.method, result.matched_shade
    )];

    let mut shades: Vec<(&str, Color)> = result.scale.iter().collect();
    shades.sort_by(|(a, _), (b, _)| shade_order(a, b));

    lines.extend(
        shades
            .into_iter()
            .map(|(shade, color)| format!("  --{name}-{shade}: {};", format.format(color))),
    );

    format!(":root {{\n{}\n}}", lines.join("\n"))
}

/// Numeric shades ascending, then everything else in its original order.
fn shade_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

/// Turn free text into a CSS identifier fragment: lowercase, runs of
/// anything outside `[a-z0-9]` become a single `-`, no leading or trailing
/// `-`.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
