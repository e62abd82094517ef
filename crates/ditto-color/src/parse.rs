// SPDX-License-Identifier: MIT
//
// CSS color text → Color.
//
// Accepts the notations a designer is likely to paste into a prompt:
//
//   #rgb  #rgba  #rrggbb  #rrggbbaa
//   rgb(255 0 0)  rgb(255, 0, 0)  rgba(100%, 0%, 0%, 0.5)
//   hsl(210 80% 50%)  hsla(210deg, 80%, 50%, 1)
//   oklch(0.62 0.2 255)  oklch(62% 0.2 255deg / 50%)
//   oklab(0.62 -0.05 -0.18)
//   rebeccapurple  steelblue  ...   (CSS named colors)
//
// Alpha is accepted wherever CSS allows it and then dropped: ramps are
// opaque. Parsed lightness is clamped to 0–1 and hue wrapped to 0–360.

use std::str::FromStr;

use thiserror::Error;

use crate::color::Color;

/// Why a piece of color text could not be turned into a [`Color`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// The input was empty or whitespace only.
    #[error("empty color string")]
    Empty,

    /// Looked like hex (`#...`) but was not 3, 4, 6 or 8 hex digits.
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),

    /// Not a known CSS color name. Hex needs its leading `#`.
    #[error("unknown color `{0}`")]
    UnknownName(String),

    /// A functional notation with the wrong name, shape or channel count.
    #[error("invalid color function `{0}`")]
    InvalidFunction(String),

    /// A channel inside a functional notation could not be read.
    #[error("invalid channel `{value}` in {function}()")]
    InvalidChannel { function: String, value: String },
}

/// Parse CSS color text into a [`Color`].
///
/// # Errors
///
/// Returns a [`ParseColorError`] describing the first problem found.
///
/// ```
/// use ditto_color::parse_color;
///
/// let a = parse_color("#3b82f6").unwrap();
/// let b = parse_color("rgb(59 130 246)").unwrap();
/// assert!(a.distance(&b) < 1e-9);
/// ```
pub fn parse_color(input: &str) -> Result<Color, ParseColorError> {
    let text = input.trim().to_ascii_lowercase();
    if text.is_empty() {
        return Err(ParseColorError::Empty);
    }

    let color = if text.starts_with('#') {
        Color::hex(&text).ok_or_else(|| ParseColorError::InvalidHex(text.clone()))?
    } else if let Some(open) = text.find('(') {
        parse_function(&text, open)?
    } else {
        named_color(&text)
            .and_then(Color::hex)
            .ok_or_else(|| ParseColorError::UnknownName(text.clone()))?
    };

    if ![color.l, color.c, color.h].iter().all(|v| v.is_finite()) {
        return Err(ParseColorError::InvalidFunction(text));
    }

    // L in 0–1, H in 0–360.
    Ok(color.set_lightness(color.l).set_hue(color.h))
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

// ─── Functional Notation ─────────────────────────────────────────────────────

fn parse_function(text: &str, open: usize) -> Result<Color, ParseColorError> {
    let invalid = || ParseColorError::InvalidFunction(text.to_owned());

    let name = text[..open].trim();
    let body = text[open + 1..].strip_suffix(')').ok_or_else(invalid)?;

    let args: Vec<&str> = body
        .split(|ch: char| ch == ',' || ch == '/' || ch.is_whitespace())
        .filter(|arg| !arg.is_empty())
        .collect();

    if !(3..=4).contains(&args.len()) {
        return Err(invalid());
    }

    let channel = Channel { function: name };
    if let Some(alpha) = args.get(3) {
        channel.alpha(alpha)?;
    }

    match name {
        "rgb" | "rgba" => {
            let r = channel.rgb(args[0])?;
            let g = channel.rgb(args[1])?;
            let b = channel.rgb(args[2])?;
            Ok(Color::srgb(r, g, b))
        }
        "hsl" | "hsla" => {
            let h = channel.hue(args[0])?;
            let s = channel.percentage(args[1])?;
            let l = channel.percentage(args[2])?;
            let (r, g, b) = hsl_to_srgb(h, s, l);
            Ok(Color::srgb(r, g, b))
        }
        "oklch" => {
            let l = channel.number_or_percent(args[0], 1.0)?;
            let c = channel.number_or_percent(args[1], 0.4)?;
            let h = channel.hue(args[2])?;
            Ok(Color::oklch(l, c.max(0.0), h))
        }
        "oklab" => {
            let l = channel.number_or_percent(args[0], 1.0)?;
            let a = channel.number_or_percent(args[1], 0.4)?;
            let b = channel.number_or_percent(args[2], 0.4)?;
            Ok(Color::oklab(l, a, b))
        }
        _ => Err(invalid()),
    }
}

/// Channel readers for one functional notation; carries the function name
/// for error messages.
struct Channel<'a> {
    function: &'a str,
}

impl Channel<'_> {
    fn error(&self, value: &str) -> ParseColorError {
        ParseColorError::InvalidChannel {
            function: self.function.to_owned(),
            value: value.to_owned(),
        }
    }

    fn number(&self, value: &str) -> Result<f64, ParseColorError> {
        if value == "none" {
            return Ok(0.0);
        }
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.error(value))
    }

    /// A bare number, or a percentage of `full_scale`.
    fn number_or_percent(&self, value: &str, full_scale: f64) -> Result<f64, ParseColorError> {
        match value.strip_suffix('%') {
            Some(pct) => Ok(self.number(pct)? / 100.0 * full_scale),
            None => self.number(value),
        }
    }

    /// sRGB channel: 0–255 or a percentage, clamped to 0.0–1.0.
    fn rgb(&self, value: &str) -> Result<f64, ParseColorError> {
        let v = match value.strip_suffix('%') {
            Some(pct) => self.number(pct)? / 100.0,
            None => self.number(value)? / 255.0,
        };
        Ok(v.clamp(0.0, 1.0))
    }

    /// A percentage (with or without the `%` sign), normalized to 0.0–1.0.
    fn percentage(&self, value: &str) -> Result<f64, ParseColorError> {
        let pct = value.strip_suffix('%').unwrap_or(value);
        Ok((self.number(pct)? / 100.0).clamp(0.0, 1.0))
    }

    /// A hue angle in degrees; `deg`, `grad`, `rad` and `turn` units accepted.
    fn hue(&self, value: &str) -> Result<f64, ParseColorError> {
        let degrees = if let Some(v) = value.strip_suffix("deg") {
            self.number(v)?
        } else if let Some(v) = value.strip_suffix("grad") {
            self.number(v)? * 0.9
        } else if let Some(v) = value.strip_suffix("rad") {
            self.number(v)?.to_degrees()
        } else if let Some(v) = value.strip_suffix("turn") {
            self.number(v)? * 360.0
        } else {
            self.number(value)?
        };
        Ok(degrees)
    }

    fn alpha(&self, value: &str) -> Result<f64, ParseColorError> {
        self.number_or_percent(value, 1.0)
    }
}

fn hsl_to_srgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = crate::color::normalize_hue(h);
    let k = |n: f64| (n + h / 30.0) % 12.0;
    let a = s * l.min(1.0 - l);
    let f = |n: f64| {
        let k = k(n);
        a.mul_add(-(k - 3.0).min(9.0 - k).clamp(-1.0, 1.0), l)
    };
    (f(0.0), f(8.0), f(4.0))
}

// ─── Named Colors ────────────────────────────────────────────────────────────

fn named_color(name: &str) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hex)| *hex)
}

/// The CSS Color Module Level 4 named colors.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("aliceblue", "#f0f8ff"), ("antiquewhite", "#faebd7"), ("aqua", "#00ffff"),
    ("aquamarine", "#7fffd4"), ("azure", "#f0ffff"), ("beige", "#f5f5dc"),
    ("bisque", "#ffe4c4"), ("black", "#000000"), ("blanchedalmond", "#ffebcd"),
    ("blue", "#0000ff"), ("blueviolet", "#8a2be2"), ("brown", "#a52a2a"),
    ("burlywood", "#deb887"), ("cadetblue", "#5f9ea0"), ("chartreuse", "#7fff00"),
    ("chocolate", "#d2691e"), ("coral", "#ff7f50"), ("cornflowerblue", "#6495ed"),
    ("cornsilk", "#fff8dc"), ("crimson", "#dc143c"), ("cyan", "#00ffff"),
    ("darkblue", "#00008b"), ("darkcyan", "#008b8b"), ("darkgoldenrod", "#b8860b"),
    ("darkgray", "#a9a9a9"), ("darkgreen", "#006400"), ("darkgrey", "#a9a9a9"),
    ("darkkhaki", "#bdb76b"), ("darkmagenta", "#8b008b"), ("darkolivegreen", "#556b2f"),
    ("darkorange", "#ff8c00"), ("darkorchid", "#9932cc"), ("darkred", "#8b0000"),
    ("darksalmon", "#e9967a"), ("darkseagreen", "#8fbc8f"), ("darkslateblue", "#483d8b"),
    ("darkslategray", "#2f4f4f"), ("darkslategrey", "#2f4f4f"), ("darkturquoise", "#00ced1"),
    ("darkviolet", "#9400d3"), ("deeppink", "#ff1493"), ("deepskyblue", "#00bfff"),
    ("dimgray", "#696969"), ("dimgrey", "#696969"), ("dodgerblue", "#1e90ff"),
    ("firebrick", "#b22222"), ("floralwhite", "#fffaf0"), ("forestgreen", "#228b22"),
    ("fuchsia", "#ff00ff"), ("gainsboro", "#dcdcdc"), ("ghostwhite", "#f8f8ff"),
    ("gold", "#ffd700"), ("goldenrod", "#daa520"), ("gray", "#808080"),
    ("green", "#008000"), ("greenyellow", "#adff2f"), ("grey", "#808080"),
    ("honeydew", "#f0fff0"), ("hotpink", "#ff69b4"), ("indianred", "#cd5c5c"),
    ("indigo", "#4b0082"), ("ivory", "#fffff0"), ("khaki", "#f0e68c"),
    ("lavender", "#e6e6fa"), ("lavenderblush", "#fff0f5"), ("lawngreen", "#7cfc00"),
    ("lemonchiffon", "#fffacd"), ("lightblue", "#add8e6"), ("lightcoral", "#f08080"),
    ("lightcyan", "#e0ffff"), ("lightgoldenrodyellow", "#fafad2"), ("lightgray", "#d3d3d3"),
    ("lightgreen", "#90ee90"), ("lightgrey", "#d3d3d3"), ("lightpink", "#ffb6c1"),
    ("lightsalmon", "#ffa07a"), ("lightseagreen", "#20b2aa"), ("lightskyblue", "#87cefa"),
    ("lightslategray", "#778899"), ("lightslategrey", "#778899"), ("lightsteelblue", "#b0c4de"),
    ("lightyellow", "#ffffe0"), ("lime", "#00ff00"), ("limegreen", "#32cd32"),
    ("linen", "#faf0e6"), ("magenta", "#ff00ff"), ("maroon", "#800000"),
    ("mediumaquamarine", "#66cdaa"), ("mediumblue", "#0000cd"), ("mediumorchid", "#ba55d3"),
    ("mediumpurple", "#9370db"), ("mediumseagreen", "#3cb371"), ("mediumslateblue", "#7b68ee"),
    ("mediumspringgreen", "#00fa9a"), ("mediumturquoise", "#48d1cc"), ("mediumvioletred", "#c71585"),
    ("midnightblue", "#191970"), ("mintcream", "#f5fffa"), ("mistyrose", "#ffe4e1"),
    ("moccasin", "#ffe4b5"), ("navajowhite", "#ffdead"), ("navy", "#000080"),
    ("oldlace", "#fdf5e6"), ("olive", "#808000"), ("olivedrab", "#6b8e23"),
    ("orange", "#ffa500"), ("orangered", "#ff4500"), ("orchid", "#da70d6"),
    ("palegoldenrod", "#eee8aa"), ("palegreen", "#98fb98"), ("paleturquoise", "#afeeee"),
    ("palevioletred", "#db7093"), ("papayawhip", "#ffefd5"), ("peachpuff", "#ffdab9"),
    ("peru", "#cd853f"), ("pink", "#ffc0cb"), ("plum", "#dda0dd"),
    ("powderblue", "#b0e0e6"), ("purple", "#800080"), ("rebeccapurple", "#663399"),
    ("red", "#ff0000"), ("rosybrown", "#bc8f8f"), ("royalblue", "#4169e1"),
    ("saddlebrown", "#8b4513"), ("salmon", "#fa8072"), ("sandybrown", "#f4a460"),
    ("seagreen", "#2e8b57"), ("seashell", "#fff5ee"), ("sienna", "#a0522d"),
    ("silver", "#c0c0c0"), ("skyblue", "#87ceeb"), ("slateblue", "#6a5acd"),
    ("slategray", "#708090"), ("slategrey", "#708090"), ("snow", "#fffafa"),
    ("springgreen", "#00ff7f"), ("steelblue", "#4682b4"), ("tan", "#d2b48c"),
    ("teal", "#008080"), ("thistle", "#d8bfd8"), ("tomato", "#ff6347"),
    ("turquoise", "#40e0d0"), ("violet", "#ee82ee"), ("wheat", "#f5deb3"),
    ("white", "#ffffff"), ("whitesmoke", "#f5f5f5"), ("yellow", "#ffff00"),
    ("yellowgreen", "#9acd32"),
];

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: Color, b: Color) -> bool {
        a.distance(&b) < 1e-6
    }

    #[test]
    fn hex_forms() {
        let blue = Color::hex("#3b82f6").unwrap();
        assert!(close(parse_color("#3b82f6").unwrap(), blue));
        assert!(close(parse_color("  #3B82F6 ").unwrap(), blue));
        assert_eq!(parse_color("3b82f6"), Err(ParseColorError::UnknownName("3b82f6".into())));
        assert!(close(parse_color("#3b82f6ff").unwrap(), blue));
    }

    #[test]
    fn rgb_forms_agree() {
        let expected = Color::rgb8(59, 130, 246);
        for text in [
            "rgb(59 130 246)",
            "rgb(59, 130, 246)",
            "rgba(59, 130, 246, 0.5)",
            "rgb(59 130 246 / 50%)",
        ] {
            assert!(close(parse_color(text).unwrap(), expected), "{text}");
        }
        assert!(close(parse_color("rgb(100% 0% 0%)").unwrap(), Color::rgb8(255, 0, 0)));
    }

    #[test]
    fn hsl_primaries() {
        assert!(close(parse_color("hsl(0 100% 50%)").unwrap(), Color::rgb8(255, 0, 0)));
        assert!(close(parse_color("hsl(120deg, 100%, 50%)").unwrap(), Color::rgb8(0, 255, 0)));
        assert!(close(parse_color("hsla(240, 100%, 50%, 1)").unwrap(), Color::rgb8(0, 0, 255)));
        assert!(close(parse_color("hsl(0.5turn 0% 50%)").unwrap(), Color::srgb(0.5, 0.5, 0.5)));
    }

    #[test]
    fn oklch_channels_pass_through() {
        let c = parse_color("oklch(0.62 0.2 255)").unwrap();
        assert!((c.l - 0.62).abs() < 1e-12);
        assert!((c.c - 0.2).abs() < 1e-12);
        assert!((c.h - 255.0).abs() < 1e-12);

        let pct = parse_color("oklch(62% 50% 255deg / 0.3)").unwrap();
        assert!((pct.l - 0.62).abs() < 1e-12);
        assert!((pct.c - 0.2).abs() < 1e-12);

        let none = parse_color("oklch(0.5 0 none)").unwrap();
        assert!(none.h.abs() < f64::EPSILON);
    }

    #[test]
    fn oklab_converts_to_polar() {
        let c = parse_color("oklab(0.5 0 0.1)").unwrap();
        assert!((c.c - 0.1).abs() < 1e-12);
        assert!((c.h - 90.0).abs() < 1e-9);
    }

    #[test]
    fn bare_hex_words_are_not_colors() {
        for word in ["decade", "bad", "cafe", "facade"] {
            assert_eq!(parse_color(word), Err(ParseColorError::UnknownName(word.into())));
        }
    }

    #[test]
    fn channels_are_brought_into_range() {
        let bright = parse_color("oklch(1e200 0.1 30)").unwrap();
        assert!((bright.l - 1.0).abs() < f64::EPSILON);

        let dark = parse_color("oklch(-3 0.1 30)").unwrap();
        assert!(dark.l.abs() < f64::EPSILON);

        let wrapped = parse_color("oklch(0.6 0.2 400)").unwrap();
        assert!((wrapped.h - 40.0).abs() < 1e-9);

        let negative = parse_color("oklch(0.6 0.2 -90deg)").unwrap();
        assert!((negative.h - 270.0).abs() < 1e-9);

        let oklab = parse_color("oklab(7 0.1 0)").unwrap();
        assert!((oklab.l - 1.0).abs() < f64::EPSILON);

        let red = parse_color("rgb(1e300 0 0)").unwrap();
        assert_eq!(red.to_hex(), "#ff0000");
    }

    #[test]
    fn named_colors() {
        assert!(close(parse_color("RebeccaPurple").unwrap(), Color::rgb8(0x66, 0x33, 0x99)));
        assert!(close(parse_color("white").unwrap(), Color::WHITE));
        assert!(close(parse_color("Black").unwrap(), Color::BLACK));
    }

    #[test]
    fn from_str_delegates() {
        let c: Color = "steelblue".parse().unwrap();
        assert_eq!(c.to_hex(), "#4682b4");
    }

    #[test]
    fn errors_are_specific() {
        assert_eq!(parse_color("   "), Err(ParseColorError::Empty));
        assert_eq!(parse_color("#12"), Err(ParseColorError::InvalidHex("#12".into())));
        assert_eq!(
            parse_color("notacolor"),
            Err(ParseColorError::UnknownName("notacolor".into()))
        );
        assert_eq!(
            parse_color("lab(50 20 30)"),
            Err(ParseColorError::InvalidFunction("lab(50 20 30)".into()))
        );
        assert_eq!(
            parse_color("rgb(1 2)"),
            Err(ParseColorError::InvalidFunction("rgb(1 2)".into()))
        );
        assert_eq!(
            parse_color("rgb(1 x 3)"),
            Err(ParseColorError::InvalidChannel {
                function: "rgb".into(),
                value: "x".into(),
            })
        );
    }

    #[test]
    fn error_messages_name_the_input() {
        let err = parse_color("nope").unwrap_err();
        assert_eq!(err.to_string(), "unknown color `nope`");
    }
}
