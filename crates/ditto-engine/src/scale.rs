//! Scale builder — re-hue a reference ramp and pin it to the input color.
//!
//! Three steps:
//!
//! 1. **Rotate**: every shade keeps its reference L and C but takes the
//!    target's hue.
//! 2. **Anchor**: at the matched shade, measure how far the rotated color
//!    is from the target. Lightness is always an additive offset. Chroma is
//!    a ratio when the anchor has usable chroma, otherwise an additive
//!    offset (a ratio against ~0 would explode).
//! 3. **Propagate**: apply both to every shade, clamp L to 0–1 and C to
//!    >= 0.
//!
//! The matched shade therefore lands on the target exactly, and every other
//! shade keeps the reference ramp's relative shape.

use ditto_color::Color;

use crate::NEUTRAL_CHROMA;
use crate::ramp::Ramp;

/// How chroma moves from the reference shape onto the target.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ChromaShift {
    /// Multiply by the target/anchor ratio.
    Scale(f64),
    /// Add the target − anchor difference.
    Offset(f64),
}

impl ChromaShift {
    fn between(anchor: f64, target: f64) -> Self {
        if anchor > NEUTRAL_CHROMA {
            Self::Scale(target / anchor)
        } else {
            Self::Offset(target - anchor)
        }
    }

    fn apply(self, c: f64) -> f64 {
        match self {
            Self::Scale(ratio) => c * ratio,
            Self::Offset(diff) => c + diff,
        }
    }
}

/// Replace the hue of every shade with `hue`.
#[must_use]
pub fn rotate_hue(ramp: &Ramp, hue: f64) -> Ramp {
    ramp.iter()
        .map(|(shade, color)| (shade.to_owned(), color.with_hue(hue)))
        .collect()
}

/// Build the output scale from `reference`, anchored so that
/// `scale[matched_shade] == target`.
///
/// If `matched_shade` is not in `reference`, the hue-rotated reference is
/// returned without anchoring.
#[must_use]
pub fn build_scale(reference: &Ramp, target: Color, matched_shade: &str) -> Ramp {
    let rotated = rotate_hue(reference, target.h);

    let Some(anchor) = rotated.get(matched_shade) else {
        return rotated;
    };

    let delta_l = target.l - anchor.l;
    let chroma = ChromaShift::between(anchor.c, target.c);

    rotated
        .iter()
        .map(|(shade, color)| {
            let l = (color.l + delta_l).clamp(0.0, 1.0);
            let c = chroma.apply(color.c).max(0.0);
            (shade.to_owned(), Color::oklch(l, c, color.h))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reference() -> Ramp {
        [
            ("100", Color::oklch(0.95, 0.04, 250.0)),
            ("500", Color::oklch(0.60, 0.20, 255.0)),
            ("900", Color::oklch(0.30, 0.10, 265.0)),
        ]
        .into_iter()
        .map(|(s, c)| (s.to_owned(), c))
        .collect()
    }

    #[test]
    fn rotation_replaces_hue_only() {
        let rotated = rotate_hue(&reference(), 30.0);
        for ((_, before), (_, after)) in reference().iter().zip(rotated.iter()) {
            assert!((before.l - after.l).abs() < f64::EPSILON);
            assert!((before.c - after.c).abs() < f64::EPSILON);
            assert!((after.h - 30.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn matched_shade_equals_target() {
        let target = Color::oklch(0.55, 0.16, 30.0);
        let scale = build_scale(&reference(), target, "500");
        let got = scale.get("500").unwrap();
        assert!((got.l - target.l).abs() < 1e-12);
        assert!((got.c - target.c).abs() < 1e-12);
        assert!((got.h - target.h).abs() < f64::EPSILON);
    }

    #[test]
    fn chroma_scales_multiplicatively() {
        // Anchor C = 0.20, target C = 0.10 → ratio 0.5.
        let scale = build_scale(&reference(), Color::oklch(0.60, 0.10, 30.0), "500");
        assert!((scale.get("100").unwrap().c - 0.02).abs() < 1e-12);
        assert!((scale.get("900").unwrap().c - 0.05).abs() < 1e-12);
    }

    #[test]
    fn lightness_shifts_additively_and_clamps() {
        let scale = build_scale(&reference(), Color::oklch(0.70, 0.20, 30.0), "500");
        assert!((scale.get("900").unwrap().l - 0.40).abs() < 1e-12);
        assert!((scale.get("100").unwrap().l - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn near_neutral_anchor_shifts_chroma_additively() {
        let gray: Ramp = [
            ("100", Color::oklch(0.95, 0.005, 0.0)),
            ("500", Color::oklch(0.60, 0.010, 0.0)),
            ("900", Color::oklch(0.30, 0.015, 0.0)),
        ]
        .into_iter()
        .map(|(s, c)| (s.to_owned(), c))
        .collect();

        let scale = build_scale(&gray, Color::oklch(0.60, 0.08, 140.0), "500");
        assert!((scale.get("100").unwrap().c - 0.075).abs() < 1e-12);
        assert!((scale.get("500").unwrap().c - 0.080).abs() < 1e-12);
        assert!((scale.get("900").unwrap().c - 0.085).abs() < 1e-12);
    }

    #[test]
    fn negative_chroma_clamps_to_zero() {
        let gray: Ramp = [
            ("100", Color::oklch(0.95, 0.0, 0.0)),
            ("500", Color::oklch(0.60, 0.015, 0.0)),
        ]
        .into_iter()
        .map(|(s, c)| (s.to_owned(), c))
        .collect();

        // Offset = 0.0 − 0.015; shade 100 would go negative.
        let scale = build_scale(&gray, Color::oklch(0.60, 0.0, 0.0), "500");
        assert!(scale.get("100").unwrap().c.abs() < f64::EPSILON);
    }

    #[test]
    fn chroma_exactly_at_threshold_uses_offset() {
        assert_eq!(ChromaShift::between(NEUTRAL_CHROMA, 0.1), ChromaShift::Offset(0.1 - NEUTRAL_CHROMA));
        assert_eq!(ChromaShift::between(0.2, 0.1), ChromaShift::Scale(0.5));
    }

    #[test]
    fn unknown_shade_returns_rotation() {
        let scale = build_scale(&reference(), Color::oklch(0.5, 0.1, 90.0), "nope");
        assert_eq!(scale, rotate_hue(&reference(), 90.0));
    }
}
