//! Blend engine — mix two reference ramps shade by shade.
//!
//! The mixing ratio `t` is the share of the *second* ramp:
//!
//! ```text
//! t = d1 / (d1 + d2)      (0.5 when both distances are zero)
//! ```
//!
//! so the second ramp's weight grows with the first ramp's distance. Note
//! that this also means the second ramp's weight grows with its *own*
//! distance relative to the first: a far-away partner pulls harder than a
//! near one. Existing palettes were generated with this convention and it is
//! kept as-is.

use log::debug;

use crate::ramp::Ramp;

/// Two ramps mixed at a single ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Blend {
    /// The interpolated reference ramp.
    pub ramp: Ramp,
    /// Share of the second ramp, 0.0–1.0.
    pub t: f64,
}

impl Blend {
    /// Weight of the first ramp (`1 - t`).
    #[must_use]
    pub fn first_weight(&self) -> f64 {
        1.0 - self.t
    }

    /// Weight of the second ramp (`t`).
    #[must_use]
    pub const fn second_weight(&self) -> f64 {
        self.t
    }
}

/// Mixing ratio for two match distances. See the module docs.
///
/// Falls back to 0.5 when the ratio is undefined (both zero, or both
/// infinite).
#[must_use]
pub fn mix_ratio(distance1: f64, distance2: f64) -> f64 {
    let t = distance1 / (distance1 + distance2);
    if t.is_finite() { t } else { 0.5 }
}

/// Interpolate `ramp1` toward `ramp2` at [`mix_ratio`]`(distance1, distance2)`.
///
/// Walks `ramp1`'s shades in order; a shade missing from `ramp2` is left
/// out of the result.
#[must_use]
pub fn blend(ramp1: &Ramp, ramp2: &Ramp, distance1: f64, distance2: f64) -> Blend {
    let t = mix_ratio(distance1, distance2);
    debug!("blend: d1 = {distance1:.4}, d2 = {distance2:.4}, t = {t:.4}");

    let ramp = ramp1
        .iter()
        .filter_map(|(shade, c1)| {
            let c2 = ramp2.get(shade)?;
            Some((shade.to_owned(), c1.mix(&c2, t)))
        })
        .collect();

    Blend { ramp, t }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
