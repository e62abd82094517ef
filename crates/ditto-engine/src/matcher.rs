//! Match finder — which reference ramp (and shade) does a color belong to?
//!
//! Two different questions, answered with two different metrics:
//!
//! - **Closest**: scan every (ramp, shade) pair and keep the smallest
//!   Oklab distance. Strict `<`, so the first minimum in registry order
//!   wins ties.
//! - **Second closest**: at the already-matched shade only, among the other
//!   ramps with usable chroma there, keep the smallest *hue* distance. The
//!   partner is picked for hue compatibility; its Oklab distance is still
//!   reported because the blend weights are built from it.

use ditto_color::Color;
use log::trace;

use crate::NEUTRAL_CHROMA;
use crate::ramp::Ramp;
use crate::registry::RampRegistry;

/// A candidate pairing of reference ramp and shade.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    /// Name of the reference ramp.
    pub ramp_name: &'a str,
    /// The reference ramp itself.
    pub ramp: &'a Ramp,
    /// The shade key within that ramp.
    pub shade: &'a str,
    /// Oklab distance from the target color to `ramp[shade]`.
    pub distance: f64,
}

/// Find the (ramp, shade) pair nearest to `color`.
///
/// The first pair scanned is always a candidate, so even when every
/// distance is infinite the result names a real shade. `None` only for a
/// registry without shades, which [`RampRegistry::new`] rejects.
#[must_use]
pub fn find_closest(registry: &RampRegistry, color: Color) -> Option<Match<'_>> {
    let mut best: Option<Match<'_>> = None;

    for (ramp_name, ramp) in registry.iter() {
        for (shade, candidate) in ramp.iter() {
            let distance = color.distance(&candidate);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Match {
                    ramp_name,
                    ramp,
                    shade,
                    distance,
                });
            }
        }
    }

    if let Some(m) = &best {
        trace!("closest: {}[{}] at {:.4}", m.ramp_name, m.shade, m.distance);
    }
    best
}

/// Find a blend partner for `color` at `shade`, skipping `exclude`.
///
/// Candidates whose color at `shade` has chroma below [`NEUTRAL_CHROMA`]
/// are ignored: they carry no hue to contribute. Among the rest the one
/// with the smallest circular hue distance wins, first in registry order on
/// ties. Returns `None` when no ramp qualifies.
#[must_use]
pub fn find_second_closest<'a>(
    registry: &'a RampRegistry,
    color: Color,
    shade: &str,
    exclude: &str,
) -> Option<Match<'a>> {
    let mut best: Option<(Match<'a>, f64)> = None;

    for (ramp_name, ramp) in registry.iter() {
        if ramp_name == exclude {
            continue;
        }
        let Some((matched, candidate)) = ramp.get_key_value(shade) else {
            continue;
        };
        if candidate.c < NEUTRAL_CHROMA {
            trace!("second: {ramp_name}[{matched}] skipped, chroma {:.4}", candidate.c);
            continue;
        }

        let hue_distance = color.hue_distance(&candidate);
        trace!("second: {ramp_name}[{matched}] hue distance {hue_distance:.2}");

        if best.as_ref().is_none_or(|(_, best_hue)| hue_distance < *best_hue) {
            let found = Match {
                ramp_name,
                ramp,
                shade: matched,
                distance: color.distance(&candidate),
            };
            best = Some((found, hue_distance));
        }
    }

    best.map(|(found, _)| found)
}

/// The shade of `ramp` nearest to `color`, first minimum wins.
///
/// Returns `None` only for an empty ramp.
#[must_use]
pub fn closest_shade(ramp: &Ramp, color: Color) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;

    for (shade, candidate) in ramp.iter() {
        let distance = color.distance(&candidate);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((shade, distance));
        }
    }

    best.map(|(shade, _)| shade)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
