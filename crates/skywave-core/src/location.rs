use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SkywaveError};

static INVALID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[!@#$%^&*()_+=\[\]{};':"\\|<>/?]"#).unwrap());

/// Maidenhead locator: two letters A-R, two digits, optional two letters A-X.
static GRID_SQUARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Ra-r]{2}[0-9]{2}([A-Xa-x]{2})?$").unwrap());

static CITY_COUNTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s,.\-]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// Maidenhead grid square, e.g. "FN30" or "GG66rf".
    Grid,
    /// Free-form city/country name, e.g. "New York, USA".
    City,
}

/// A syntactically valid location input. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    raw: String,
    kind: LocationKind,
}

impl Location {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }
}

/// Syntactic check of a place or grid-square string. Pure; performs no
/// lookup of any kind.
pub fn validate_location(input: &str) -> Result<Location> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(SkywaveError::Validation(
            "Location cannot be empty".to_string(),
        ));
    }

    if INVALID_CHARS.is_match(trimmed) {
        return Err(SkywaveError::Validation(
            "Location contains invalid characters".to_string(),
        ));
    }

    if GRID_SQUARE.is_match(trimmed) {
        return Ok(Location {
            raw: trimmed.to_string(),
            kind: LocationKind::Grid,
        });
    }

    if CITY_COUNTRY.is_match(trimmed) {
        return Ok(Location {
            raw: trimmed.to_string(),
            kind: LocationKind::City,
        });
    }

    Err(SkywaveError::Validation(
        "Invalid location format. Use city name or grid square (e.g., FN30)".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_squares_are_recognized() {
        assert_eq!(validate_location("FN30").unwrap().kind(), LocationKind::Grid);
        assert_eq!(
            validate_location("gg66rf").unwrap().kind(),
            LocationKind::Grid
        );
        assert_eq!(validate_location("IO91").unwrap().kind(), LocationKind::Grid);
    }

    #[test]
    fn cities_are_recognized() {
        let loc = validate_location("New York, USA").unwrap();
        assert_eq!(loc.kind(), LocationKind::City);
        assert_eq!(loc.as_str(), "New York, USA");

        assert_eq!(
            validate_location("Rio de Janeiro").unwrap().kind(),
            LocationKind::City
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = validate_location("   ").unwrap_err();
        assert!(err.to_string().contains("Location cannot be empty"));
    }

    #[test]
    fn illegal_characters_are_rejected() {
        let err = validate_location("abc$%").unwrap_err();
        assert!(err.to_string().contains("invalid characters"));
        assert!(validate_location("a<b>").is_err());
        assert!(validate_location("semi;colon").is_err());
    }

    #[test]
    fn input_is_trimmed_before_classification() {
        assert_eq!(validate_location("  FN30  ").unwrap().as_str(), "FN30");
    }

    #[test]
    fn digits_outside_grid_pattern_are_rejected() {
        // Digits are not part of the city charset and "FN3" is not a grid.
        assert!(validate_location("FN3").is_err());
        assert!(validate_location("Area 51").is_err());
    }
}
