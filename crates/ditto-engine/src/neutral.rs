//! Neutral path — grays skip hue matching entirely.
//!
//! An input with chroma below [`NEUTRAL_CHROMA`](crate::NEUTRAL_CHROMA) has
//! no hue worth matching. The registry's least colorful ramp supplies the
//! lightness/chroma shape, every shade takes the input's hue (so a faint
//! tint survives), and the nearest shade is replaced by the input itself.

use ditto_color::Color;

use crate::matcher::closest_shade;
use crate::ramp::Ramp;

/// Build a scale from the neutral ramp. Returns the matched shade and the
/// scale.
#[must_use]
pub fn neutral_scale(neutral: &Ramp, input: Color) -> (String, Ramp) {
    let shade = closest_shade(neutral, input).unwrap_or_default().to_owned();

    let scale = neutral
        .iter()
        .map(|(s, color)| {
            let color = if s == shade { input } else { color.with_hue(input.h) };
            (s.to_owned(), color)
        })
        .collect();

    (shade, scale)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
