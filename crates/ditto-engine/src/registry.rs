//! The ramp registry — a validated, read-only set of reference ramps.
//!
//! Construction checks two things and caches one:
//!
//! - at least one ramp, and the first ramp has at least one shade;
//! - every ramp has exactly the first ramp's shade keys (order-free);
//! - the *neutral ramp*: lowest mean chroma, first one wins ties.
//!
//! After that the registry is never mutated. Replacing the ramp set means
//! building a new registry.

use indexmap::IndexMap;
use log::debug;

use crate::error::ConfigError;
use crate::ramp::Ramp;

/// Named reference ramps in definition order, plus the cached neutral ramp.
#[derive(Debug, Clone)]
pub struct RampRegistry {
    ramps: IndexMap<String, Ramp>,
    shades: Vec<String>,
    neutral: usize,
    neutral_name: String,
}

impl RampRegistry {
    /// Validate `ramps` and build a registry.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Empty`] if `ramps` is empty.
    /// - [`ConfigError::NoShades`] if the first ramp has no shades.
    /// - [`ConfigError::InconsistentShades`] if any ramp's shade keys differ
    ///   from the first ramp's.
    pub fn new(ramps: IndexMap<String, Ramp>) -> Result<Self, ConfigError> {
        let Some((first_name, first)) = ramps.first() else {
            return Err(ConfigError::Empty);
        };
        if first.is_empty() {
            return Err(ConfigError::NoShades(first_name.clone()));
        }

        for (name, ramp) in &ramps {
            if !ramp.same_shades(first) {
                return Err(ConfigError::InconsistentShades {
                    ramp: name.clone(),
                    expected: first.len(),
                    found: ramp.len(),
                });
            }
        }

        let shades = first.shades().map(str::to_owned).collect();
        let neutral = find_neutral(&ramps);
        let neutral_name = ramps
            .get_index(neutral)
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        debug!(
            "ramp registry: {} ramps, {} shades, neutral = {neutral_name}",
            ramps.len(),
            first.len(),
        );

        Ok(Self {
            ramps,
            shades,
            neutral,
            neutral_name,
        })
    }

    /// Build a registry from `(name, ramp)` pairs, keeping their order.
    ///
    /// A repeated name replaces the earlier ramp but keeps its position.
    ///
    /// # Errors
    ///
    /// Same as [`RampRegistry::new`].
    pub fn from_ramps<N, I>(ramps: I) -> Result<Self, ConfigError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Ramp)>,
    {
        Self::new(ramps.into_iter().map(|(name, ramp)| (name.into(), ramp)).collect())
    }

    /// Ramp names in definition order.
    pub fn ramp_names(&self) -> impl Iterator<Item = &str> {
        self.ramps.keys().map(String::as_str)
    }

    /// The shared shade keys, in the first ramp's order.
    #[must_use]
    pub fn shades(&self) -> &[String] {
        &self.shades
    }

    /// Look up a ramp by name.
    #[must_use]
    pub fn ramp(&self, name: &str) -> Option<&Ramp> {
        self.ramps.get(name)
    }

    /// `(name, ramp)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Ramp)> {
        self.ramps.iter().map(|(name, ramp)| (name.as_str(), ramp))
    }

    /// Number of ramps. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    /// Always `false`; an empty registry cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }

    /// The ramp with the lowest mean chroma, with its name.
    #[must_use]
    pub fn neutral_ramp(&self) -> (&str, &Ramp) {
        (&self.neutral_name, &self.ramps[self.neutral])
    }

    /// Name of the ramp with the lowest mean chroma.
    #[must_use]
    pub fn neutral_ramp_name(&self) -> &str {
        &self.neutral_name
    }
}

/// Index of the ramp with the strictly lowest mean chroma. Iteration order
/// breaks ties: the first ramp to reach the minimum keeps it.
fn find_neutral(ramps: &IndexMap<String, Ramp>) -> usize {
    let mut best_idx = 0;
    let mut best_avg = f64::INFINITY;

    for (idx, ramp) in ramps.values().enumerate() {
        let avg = ramp.average_chroma();
        if avg < best_avg {
            best_avg = avg;
            best_idx = idx;
        }
    }

    best_idx
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
