use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde_json::Number;

use crate::{definitions::PageEntry, errors::WikiError};

/// A point on the globe. Decimal, so `40.677` stays `40.677`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub lat: Decimal,
    pub lon: Decimal,
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// The primary coordinate of the page, or the first one if none is marked primary.
///
/// # Returns
/// - Ok(Some) -> the page is geo-tagged
/// - Ok(None) -> the page has no coordinates
/// - Err -> a coordinate was present but not a number we can represent
pub fn coordinates(pages: &[PageEntry]) -> Result<Option<Coordinates>, WikiError> {
    let mut all = pages.iter().flat_map(|page| &page.coordinates).peekable();
    let first = match all.peek() {
        Some(first) => *first,
        None => return Ok(None),
    };
    let chosen = all.find(|c| c.primary).unwrap_or(first);

    Ok(Some(Coordinates {
        lat: to_decimal(&chosen.lat)?,
        lon: to_decimal(&chosen.lon)?,
    }))
}

/// Goes through the json text rather than `f64`. serde_json keeps that text
/// verbatim (`arbitrary_precision`), so every wire digit survives.
fn to_decimal(number: &Number) -> Result<Decimal, WikiError> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| WikiError::malformed(format!("bad coordinate {:?}: {}", text, e)))
}
