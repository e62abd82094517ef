//! A ramp: shade key → color, in definition order.
//!
//! Order matters. The matcher walks shades in insertion order and keeps the
//! first minimum, so two ramps with the same contents but different key
//! order can match differently on exact ties.

use ditto_color::{Color, ParseColorError, parse_color};
use indexmap::IndexMap;
use serde::Serialize;

/// An ordered shade scale, e.g. `"50" → #eff6ff, "100" → #dbeafe, ...`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ramp {
    colors: IndexMap<String, Color>,
}

impl Ramp {
    /// An empty ramp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ramp from `(shade, color text)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on the first color text that does not parse.
    pub fn from_css<'a, I>(pairs: I) -> Result<Self, ParseColorError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .map(|(shade, text)| parse_color(text).map(|color| (shade.to_owned(), color)))
            .collect()
    }

    /// Add or replace a shade. A replaced shade keeps its original position.
    pub fn insert(&mut self, shade: impl Into<String>, color: Color) {
        self.colors.insert(shade.into(), color);
    }

    /// The color at `shade`, if present.
    #[must_use]
    pub fn get(&self, shade: &str) -> Option<Color> {
        self.colors.get(shade).copied()
    }

    /// The stored key and color for `shade`, if present.
    #[must_use]
    pub fn get_key_value(&self, shade: &str) -> Option<(&str, Color)> {
        self.colors
            .get_key_value(shade)
            .map(|(key, color)| (key.as_str(), *color))
    }

    /// Whether `shade` is one of this ramp's keys.
    #[must_use]
    pub fn contains(&self, shade: &str) -> bool {
        self.colors.contains_key(shade)
    }

    /// Shades and colors in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(shade, color)| (shade.as_str(), *color))
    }

    /// Shade keys in definition order.
    pub fn shades(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// Number of shades.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the ramp has no shades.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Mean chroma across all shades. `f64::INFINITY` for an empty ramp, so
    /// an empty ramp never wins a "least colorful" comparison.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_chroma(&self) -> f64 {
        if self.colors.is_empty() {
            return f64::INFINITY;
        }
        let total: f64 = self.colors.values().map(|c| c.c).sum();
        total / self.colors.len() as f64
    }

    /// Whether both ramps have exactly the same set of shade keys. Order is
    /// not compared.
    #[must_use]
    pub fn same_shades(&self, other: &Self) -> bool {
        self.len() == other.len() && self.shades().all(|shade| other.contains(shade))
    }
}

impl FromIterator<(String, Color)> for Ramp {
    fn from_iter<T: IntoIterator<Item = (String, Color)>>(iter: T) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preserves_definition_order() {
        let ramp = Ramp::from_css([("900", "#1e3a8a"), ("50", "#eff6ff"), ("500", "#3b82f6")]).unwrap();
        assert_eq!(ramp.shades().collect::<Vec<_>>(), vec!["900", "50", "500"]);
    }

    #[test]
    fn from_css_reports_bad_color() {
        let err = Ramp::from_css([("50", "#eff6ff"), ("100", "bogus")]).unwrap_err();
        assert_eq!(err, ParseColorError::UnknownName("bogus".into()));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut ramp = Ramp::new();
        ramp.insert("a", Color::gray(0.1));
        ramp.insert("b", Color::gray(0.2));
        ramp.insert("a", Color::gray(0.3));
        assert_eq!(ramp.shades().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(ramp.get("a"), Some(Color::gray(0.3)));
        assert_eq!(ramp.get("z"), None);
    }

    #[test]
    fn key_value_lookup_returns_stored_key() {
        let ramp = Ramp::from_css([("50", "#eff6ff"), ("500", "#3b82f6")]).unwrap();
        let (key, color) = ramp.get_key_value("500").unwrap();
        assert_eq!(key, "500");
        assert_eq!(color.to_hex(), "#3b82f6");
        assert_eq!(ramp.get_key_value("950"), None);
    }

    #[test]
    fn average_chroma() {
        let ramp: Ramp = [
            ("1".to_owned(), Color::oklch(0.2, 0.1, 10.0)),
            ("2".to_owned(), Color::oklch(0.8, 0.0, 0.0)),
        ]
        .into_iter()
        .collect();
        assert!((ramp.average_chroma() - 0.05).abs() < 1e-12);
        assert!(Ramp::new().average_chroma().is_infinite());
    }

    #[test]
    fn same_shades_ignores_order() {
        let a = Ramp::from_css([("1", "#000"), ("2", "#fff")]).unwrap();
        let b = Ramp::from_css([("2", "#111"), ("1", "#eee")]).unwrap();
        let c = Ramp::from_css([("1", "#000"), ("3", "#fff")]).unwrap();
        let d = Ramp::from_css([("1", "#000")]).unwrap();
        assert!(a.same_shades(&b));
        assert!(!a.same_shades(&c));
        assert!(!a.same_shades(&d));
    }
}
