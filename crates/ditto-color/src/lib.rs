// SPDX-License-Identifier: MIT
//
// ditto-color — the perceptual color primitive behind ditto-tones.
//
// Everything the ramp engine needs from "a color" lives here: an OKLCH
// value type, conversion to and from sRGB, perceptual distance in Oklab,
// shortest-path interpolation, CSS text parsing, and CSS/hex formatting.
// The engine never touches RGB directly.

pub mod color;
pub mod parse;

pub use color::Color;
pub use parse::{ParseColorError, parse_color};
