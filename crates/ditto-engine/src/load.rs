//! Ramp tables from text: `{ "ramp": { "shade": "<color>" } }`.
//!
//! Any color syntax [`parse_color`] understands is accepted, and ramp and
//! shade order follow the document.

use ditto_color::{ParseColorError, parse_color};
use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::error::ConfigError;
use crate::ramp::Ramp;
use crate::registry::RampRegistry;

/// A ramp table that could not become a registry.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Not a JSON object of objects of strings.
    #[error("malformed ramp table: {0}")]
    Json(#[from] serde_json::Error),

    /// One entry's color text did not parse.
    #[error("ramp `{ramp}`, shade `{shade}`: invalid color")]
    Color {
        ramp: String,
        shade: String,
        #[source]
        source: ParseColorError,
    },

    /// Parsed fine, but the ramps do not form a valid registry.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parse a JSON ramp table into a registry.
///
/// # Errors
///
/// See [`LoadError`].
pub fn from_json(text: &str) -> Result<RampRegistry, LoadError> {
    let table: IndexMap<String, IndexMap<String, String>> = serde_json::from_str(text)?;
    debug!("ramp table: {} ramps", table.len());
    from_table(table.iter().map(|(ramp, shades)| {
        let shades = shades.iter().map(|(shade, text)| (shade.as_str(), text.as_str()));
        (ramp.as_str(), shades)
    }))
}

/// Build a registry from `(ramp, [(shade, color text)])` rows.
pub(crate) fn from_table<'a, R, S>(rows: R) -> Result<RampRegistry, LoadError>
where
    R: IntoIterator<Item = (&'a str, S)>,
    S: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut ramps = IndexMap::new();
    for (name, shades) in rows {
        let mut ramp = Ramp::new();
        for (shade, text) in shades {
            let color = parse_color(text).map_err(|source| LoadError::Color {
                ramp: name.to_owned(),
                shade: shade.to_owned(),
                source,
            })?;
            ramp.insert(shade, color);
        }
        ramps.insert(name.to_owned(), ramp);
    }
    Ok(RampRegistry::new(ramps)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
