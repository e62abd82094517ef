//! # ditto-engine — map one color onto a family of reference ramps
//!
//! Given a single input color and a set of named shade ramps (a design
//! system's palette), produce a full synthetic ramp that passes through the
//! input exactly and borrows its lightness/chroma shape from the closest
//! reference ramp, or a blend of two.
//!
//! # Architecture
//!
//! ```text
//! color text
//!     │  ditto_color::parse_color
//!     ▼
//! neutral.rs:   chroma < 0.02? → neutral ramp shortcut ───────┐
//!     │                                                       │
//!     ▼                                                       │
//! matcher.rs:   closest (ramp, shade) by Oklab distance       │
//!     │         second ramp at that shade by hue distance     │
//!     ▼                                                       │
//! blend.rs:     interpolate the two ramps shade by shade      │
//!     │                                                       │
//!     ▼                                                       │
//! scale.rs:     re-hue, then re-anchor L/C to the input       │
//!     │                                                       │
//!     ▼                                                       ▼
//! generate.rs:  GenerateResult { method, sources, scale } ◄───┘
//!     │
//!     ▼
//! export.rs:    CSS custom properties
//! ```
//!
//! The [`RampRegistry`] is validated once and never mutated afterwards, so
//! a [`DittoTones`] can be shared freely across threads.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Lightness/chroma deltas and ratios are inherently similar names.
#![allow(clippy::similar_names)]

pub mod blend;
pub mod builtin;
pub mod error;
pub mod export;
pub mod generate;
pub mod load;
pub mod matcher;
pub mod neutral;
pub mod ramp;
pub mod registry;
pub mod scale;

pub use ditto_color::Color;
pub use error::{ConfigError, InvalidColorError};
pub use export::{ColorFormat, sanitize_name, to_css};
pub use generate::{DittoTones, GenerateResult, Method, Source};
pub use load::LoadError;
pub use ramp::Ramp;
pub use registry::RampRegistry;

/// Chroma below this carries no usable hue information.
///
/// Inputs under it take the neutral path; reference colors under it are
/// never picked as a blend partner; and an anchor shade under it switches
/// the scale builder from multiplicative to additive chroma.
pub const NEUTRAL_CHROMA: f64 = 0.02;

/// A closest match nearer than this is treated as an exact hit on the
/// reference ramp, and no blending is attempted.
pub const EXACT_THRESHOLD: f64 = 0.02;
