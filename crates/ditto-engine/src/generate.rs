//! Top-level generation — one color in, one full scale out.
//!
//! Decision flow for a parsed input:
//!
//! ```text
//! chroma < NEUTRAL_CHROMA ──────────────────────────► neutral ramp   (exact)
//! closest distance < EXACT_THRESHOLD ───────────────► closest ramp   (exact)
//! no ramp with chroma at the matched shade ─────────► closest ramp   (single)
//! otherwise ────────────────────────────────────────► blend of two   (blend)
//! ```
//!
//! Each call is a pure function of the registry and the input; nothing is
//! cached between calls.

use std::fmt;

use ditto_color::{Color, parse_color};
use log::debug;
use serde::Serialize;

use crate::blend::blend;
use crate::error::InvalidColorError;
use crate::matcher::{Match, find_closest, find_second_closest};
use crate::neutral::neutral_scale;
use crate::ramp::Ramp;
use crate::registry::RampRegistry;
use crate::scale::build_scale;
use crate::{EXACT_THRESHOLD, NEUTRAL_CHROMA};

/// How a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Near-identical to a reference shade, or a neutral input.
    Exact,
    /// One reference ramp; no usable blend partner.
    Single,
    /// Two reference ramps mixed.
    Blend,
}

impl Method {
    /// Lowercase name, as used in CSS comments and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Single => "single",
            Self::Blend => "blend",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference ramp that contributed to a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    /// Ramp name in the registry.
    pub name: String,
    /// Oklab distance from the input to this ramp at the matched shade.
    /// Zero by convention on the neutral path.
    pub distance: f64,
    /// Share of this ramp in the result. Weights of all sources sum to 1.
    pub weight: f64,
}

impl Source {
    fn new(name: &str, distance: f64, weight: f64) -> Self {
        Self {
            name: name.to_owned(),
            distance,
            weight,
        }
    }
}

/// The generated scale and how it was derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    /// The parsed input color.
    pub input_color: Color,
    /// The shade the input was pinned to.
    pub matched_shade: String,
    /// Which path produced the scale.
    pub method: Method,
    /// Contributing ramps, closest first.
    pub sources: Vec<Source>,
    /// One color per registry shade; `scale[matched_shade]` is the input.
    pub scale: Ramp,
}

/// The ramp matching engine over a fixed registry.
///
/// ```
/// use ditto_engine::{DittoTones, Method, builtin};
///
/// let ditto = DittoTones::new(builtin::ramp_set("tailwind-v3").unwrap());
/// let result = ditto.generate("#3b82f6").unwrap();
///
/// assert_eq!(result.method, Method::Exact);
/// assert_eq!(result.matched_shade, "500");
/// assert_eq!(result.sources[0].name, "blue");
/// ```
#[derive(Debug, Clone)]
pub struct DittoTones {
    registry: RampRegistry,
}

impl DittoTones {
    /// Wrap a validated registry.
    #[must_use]
    pub const fn new(registry: RampRegistry) -> Self {
        Self { registry }
    }

    /// The registry this engine matches against.
    #[must_use]
    pub const fn registry(&self) -> &RampRegistry {
        &self.registry
    }

    /// Parse `color` and generate a scale for it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColorError`] if `color` is not valid color text.
    pub fn generate(&self, color: &str) -> Result<GenerateResult, InvalidColorError> {
        let parsed = parse_color(color).map_err(|source| InvalidColorError {
            input: color.to_owned(),
            source,
        })?;
        Ok(self.generate_color(parsed))
    }

    /// Generate a scale for an already-parsed color.
    #[must_use]
    pub fn generate_color(&self, input: Color) -> GenerateResult {
        if input.c < NEUTRAL_CHROMA {
            return self.generate_neutral(input);
        }

        let Some(closest) = find_closest(&self.registry, input) else {
            return self.generate_neutral(input);
        };

        if closest.distance < EXACT_THRESHOLD {
            return Self::generate_single(input, &closest, Method::Exact);
        }

        match find_second_closest(&self.registry, input, closest.shade, closest.ramp_name) {
            Some(second) => Self::generate_blended(input, &closest, &second),
            None => Self::generate_single(input, &closest, Method::Single),
        }
    }

    fn generate_neutral(&self, input: Color) -> GenerateResult {
        let (name, ramp) = self.registry.neutral_ramp();
        let (matched_shade, scale) = neutral_scale(ramp, input);
        debug!("neutral input {input:?}: {name}[{matched_shade}]");

        GenerateResult {
            input_color: input,
            matched_shade,
            method: Method::Exact,
            sources: vec![Source::new(name, 0.0, 1.0)],
            scale,
        }
    }

    fn generate_single(input: Color, closest: &Match<'_>, method: Method) -> GenerateResult {
        debug!(
            "{method} input {input:?}: {}[{}] at {:.4}",
            closest.ramp_name, closest.shade, closest.distance
        );

        GenerateResult {
            input_color: input,
            matched_shade: closest.shade.to_owned(),
            method,
            sources: vec![Source::new(closest.ramp_name, closest.distance, 1.0)],
            scale: build_scale(closest.ramp, input, closest.shade),
        }
    }

    fn generate_blended(input: Color, first: &Match<'_>, second: &Match<'_>) -> GenerateResult {
        let mixed = blend(first.ramp, second.ramp, first.distance, second.distance);
        debug!(
            "blend input {input:?}: {} ({:.2}) + {} ({:.2}) at shade {}",
            first.ramp_name,
            mixed.first_weight(),
            second.ramp_name,
            mixed.second_weight(),
            first.shade,
        );

        GenerateResult {
            input_color: input,
            matched_shade: first.shade.to_owned(),
            method: Method::Blend,
            sources: vec![
                Source::new(first.ramp_name, first.distance, mixed.first_weight()),
                Source::new(second.ramp_name, second.distance, mixed.second_weight()),
            ],
            scale: build_scale(&mixed.ramp, input, first.shade),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use ditto_color::ParseColorError;
    use pretty_assertions::assert_eq;

    const TOL: f64 = 1e-9;

    fn shaped(hue: f64, chroma: f64) -> Ramp {
        [
            ("100", 0.93, 0.3),
            ("300", 0.80, 0.7),
            ("500", 0.62, 1.0),
            ("700", 0.45, 0.8),
            ("900", 0.30, 0.5),
        ]
        .into_iter()
        .map(|(shade, l, k)| (shade.to_owned(), Color::oklch(l, chroma * k, hue)))
        .collect()
    }

    fn blue_red() -> DittoTones {
        let registry = RampRegistry::from_ramps([
            ("blue", shaped(262.0, 0.2)),
            ("red", shaped(25.0, 0.2)),
        ])
        .unwrap();
        DittoTones::new(registry)
    }

    fn tailwind() -> DittoTones {
        DittoTones::new(builtin::ramp_set("tailwind-v3").unwrap())
    }

    fn assert_invariants(ditto: &DittoTones, result: &GenerateResult) {
        let total: f64 = result.sources.iter().map(|s| s.weight).sum();
        assert!((total - 1.0).abs() < TOL, "weights sum to {total}");

        if result.method != Method::Blend {
            assert_eq!(result.sources.len(), 1);
            assert!((result.sources[0].weight - 1.0).abs() < TOL);
        }

        let mut keys: Vec<&str> = result.scale.shades().collect();
        let mut expected: Vec<&str> = ditto.registry().shades().iter().map(String::as_str).collect();
        keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(keys, expected);

        let pinned = result.scale.get(&result.matched_shade).unwrap();
        assert!((pinned.l - result.input_color.l).abs() < TOL);
        assert!((pinned.c - result.input_color.c).abs() < TOL);

        for (_, color) in result.scale.iter() {
            assert!((color.h - result.input_color.h).abs() < TOL, "hue drifted: {color:?}");
            assert!((0.0..=1.0).contains(&color.l));
            assert!(color.c >= 0.0);
        }
    }

    // ── Properties ───────────────────────────────────────────────────────

    #[test]
    fn reference_colors_match_exactly() {
        let ditto = tailwind();
        for (name, ramp) in ditto.registry().iter() {
            for (shade, color) in ramp.iter() {
                let result = ditto.generate_color(color);
                assert_invariants(&ditto, &result);
                assert_eq!(result.method, Method::Exact, "{name}-{shade}");
                if color.c >= NEUTRAL_CHROMA {
                    assert_eq!(result.matched_shade, shade, "{name}-{shade}");
                    assert_eq!(result.sources[0].name, name, "{name}-{shade}");
                }
            }
        }
    }

    #[test]
    fn invariants_hold_across_the_wheel() {
        let ditto = tailwind();
        for step in 0..36 {
            for &(l, c) in &[(0.3, 0.08), (0.55, 0.15), (0.75, 0.12), (0.9, 0.05)] {
                let input = Color::oklch(l, c, f64::from(step) * 10.0);
                assert_invariants(&ditto, &ditto.generate_color(input));
            }
        }
    }

    #[test]
    fn generate_is_idempotent() {
        let ditto = tailwind();
        for text in ["#7c3aed", "#123456", "rgb(10 200 90)", "#808080", "oklch(0.7 0.1 200)"] {
            let a = ditto.generate(text).unwrap();
            let b = ditto.generate(text).unwrap();
            assert_eq!(a.method, b.method);
            assert_eq!(a.matched_shade, b.matched_shade);
            assert_eq!(a.sources, b.sources);
            for ((sa, ca), (sb, cb)) in a.scale.iter().zip(b.scale.iter()) {
                assert_eq!(sa, sb);
                assert_eq!(ca.l.to_bits(), cb.l.to_bits());
                assert_eq!(ca.c.to_bits(), cb.c.to_bits());
                assert_eq!(ca.h.to_bits(), cb.h.to_bits());
            }
        }
    }

    // ── Neutral boundary ─────────────────────────────────────────────────

    #[test]
    fn chroma_at_threshold_is_not_neutral() {
        let ditto = blue_red();
        let result = ditto.generate_color(Color::oklch(0.62, NEUTRAL_CHROMA, 262.0));
        assert_ne!(result.sources[0].distance, 0.0);
        assert_invariants(&ditto, &result);
    }

    #[test]
    fn chroma_below_threshold_is_neutral() {
        let ditto = blue_red();
        let input = Color::oklch(0.62, NEUTRAL_CHROMA - 1e-9, 262.0);
        let result = ditto.generate_color(input);
        assert_eq!(result.method, Method::Exact);
        assert_eq!(result.sources, vec![Source::new(ditto.registry().neutral_ramp_name(), 0.0, 1.0)]);
        assert_eq!(result.scale.get(&result.matched_shade), Some(input));
    }

    #[test]
    fn neutral_path_uses_neutral_ramp() {
        let ditto = tailwind();
        let result = ditto.generate("#777777").unwrap();
        assert_eq!(result.method, Method::Exact);
        assert_eq!(result.sources[0].name, ditto.registry().neutral_ramp_name());
        assert_eq!(result.matched_shade, "500");
        assert_invariants(&ditto, &result);
    }

    // ── Methods ──────────────────────────────────────────────────────────

    #[test]
    fn purple_between_blue_and_red_blends_evenly() {
        let ditto = blue_red();
        // Midway between blue-500 and red-500 on the short arc, at 323.5°.
        // Both are equally far, so which one leads is down to rounding.
        let blue = ditto.registry().ramp("blue").unwrap().get("500").unwrap();
        let red = ditto.registry().ramp("red").unwrap().get("500").unwrap();
        let purple = blue.mix(&red, 0.5);

        let result = ditto.generate_color(purple);
        assert_eq!(result.method, Method::Blend);
        assert_eq!(result.matched_shade, "500");
        let mut names: Vec<&str> = result.sources.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["blue", "red"]);
        assert!((result.sources[0].weight - 0.5).abs() < 1e-6);
        assert!((result.sources[1].weight - 0.5).abs() < 1e-6);

        let pinned = result.scale.get("500").unwrap();
        assert!(pinned.distance(&purple) < 1e-9);
        assert_invariants(&ditto, &result);
    }

    #[test]
    fn blend_weight_follows_distance_ratio() {
        let ditto = blue_red();
        let input = Color::oklch(0.62, 0.2, 300.0);
        let result = ditto.generate_color(input);
        assert_eq!(result.method, Method::Blend);

        let (d1, d2) = (result.sources[0].distance, result.sources[1].distance);
        assert!((result.sources[1].weight - d1 / (d1 + d2)).abs() < TOL);
        assert!((result.sources[0].weight - d2 / (d1 + d2)).abs() < TOL);
    }

    #[test]
    fn single_when_no_partner_has_chroma() {
        let registry = RampRegistry::from_ramps([
            ("gray", shaped(0.0, 0.0)),
            ("green", shaped(145.0, 0.18)),
        ])
        .unwrap();
        let ditto = DittoTones::new(registry);
        let result = ditto.generate_color(Color::oklch(0.6, 0.12, 150.0));
        assert_eq!(result.method, Method::Single);
        assert_eq!(result.sources[0].name, "green");
        assert_invariants(&ditto, &result);
    }

    #[test]
    fn single_ramp_registry_never_blends() {
        let registry = RampRegistry::from_ramps([("only", shaped(200.0, 0.15))]).unwrap();
        let ditto = DittoTones::new(registry);
        let result = ditto.generate_color(Color::oklch(0.5, 0.3, 20.0));
        assert_eq!(result.method, Method::Single);
        assert_invariants(&ditto, &result);
    }

    #[test]
    fn out_of_range_text_is_normalized_before_matching() {
        let ditto = tailwind();

        let bright = ditto.generate("oklch(1e200 0.1 30)").unwrap();
        assert!((bright.input_color.l - 1.0).abs() < f64::EPSILON);
        assert!(bright.sources.iter().all(|s| s.distance.is_finite()));
        assert_invariants(&ditto, &bright);

        let wrapped = ditto.generate("oklch(0.6 0.2 400)").unwrap();
        assert!((wrapped.input_color.h - 40.0).abs() < 1e-9);
        assert!((wrapped.scale.get("500").unwrap().h - 40.0).abs() < 1e-9);
        assert_invariants(&ditto, &wrapped);
    }

    #[test]
    fn unbounded_chroma_still_pins_a_real_shade() {
        let ditto = blue_red();
        let result = ditto.generate_color(Color::oklch(0.6, f64::MAX, 30.0));

        assert!(result.scale.contains(&result.matched_shade));
        let total: f64 = result.sources.iter().map(|s| s.weight).sum();
        assert!((total - 1.0).abs() < TOL);
        assert!(result.sources.iter().all(|s| s.weight.is_finite()));
    }

    // ── Errors ───────────────────────────────────────────────────────────

    #[test]
    fn invalid_color_is_reported() {
        let err = blue_red().generate("not-a-color").unwrap_err();
        assert_eq!(err.input, "not-a-color");
        assert_eq!(err.source, ParseColorError::UnknownName("not-a-color".into()));
    }

    // ── Sharing ──────────────────────────────────────────────────────────

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DittoTones>();

        let ditto = tailwind();
        let expected = ditto.generate("#0ea5e9").unwrap();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| assert_eq!(ditto.generate("#0ea5e9").unwrap(), expected));
            }
        });
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let result = blue_red().generate_color(Color::oklch(0.62, 0.2, 262.0));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["method"], "exact");
        assert_eq!(json["matchedShade"], "500");
        assert_eq!(json["sources"][0]["name"], "blue");
        assert!(json["scale"]["900"]["l"].is_number());
        assert!(json["inputColor"]["h"].is_number());
    }
}
