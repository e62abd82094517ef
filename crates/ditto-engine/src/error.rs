//! Engine errors.
//!
//! Two failure points exist: building a registry (fatal, nothing is
//! constructed) and parsing the color text handed to
//! [`DittoTones::generate`](crate::DittoTones::generate). Everything between
//! those two points is total over well-formed colors.

use ditto_color::ParseColorError;
use thiserror::Error;

/// A ramp collection that cannot form a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No ramps at all.
    #[error("at least one ramp is required")]
    Empty,

    /// The first ramp defines no shades, so nothing could ever match.
    #[error("ramp `{0}` has no shades")]
    NoShades(String),

    /// A ramp's shade keys differ from the first ramp's, by count or name.
    #[error("ramp `{ramp}` has inconsistent shade keys (expected {expected} shades, found {found})")]
    InconsistentShades {
        ramp: String,
        expected: usize,
        found: usize,
    },
}

/// The text passed to `generate` is not a color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`")]
pub struct InvalidColorError {
    pub input: String,
    #[source]
    pub source: ParseColorError,
}
