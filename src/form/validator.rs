//! Birth Details Validator
//!
//! Pure validation and normalization of user-entered birth data. Runs
//! before any network interaction; nothing invalid ever reaches the
//! analysis service.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::BirthDetails;

/// Raw form content, exactly as typed. Coordinates arrive as text because
/// the form is free text entry; parsing is part of validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBirthInput {
    pub name: String,
    pub date: String,
    pub time: String,
    pub place: String,
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid coordinates: {0}")]
    InvalidCoordinate(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid time '{0}', expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
}

/// Normalize a time string to `HH:MM:SS`.
///
/// Parses with chrono and re-formats, so the operation is idempotent:
/// `"03:00"` and `"03:00:00"` both yield `"03:00:00"`, and anything that
/// matches neither format is rejected instead of silently corrupted.
pub fn normalize_time(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ValidationError::InvalidTime(raw.to_string()))?;
    Ok(parsed.format("%H:%M:%S").to_string())
}

/// Validate and normalize raw form input into wire-ready [`BirthDetails`].
pub fn validate(input: &RawBirthInput) -> Result<BirthDetails, ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    let place = input.place.trim();
    if place.is_empty() {
        return Err(ValidationError::MissingField("place"));
    }

    let date = NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.date.clone()))?;
    let time = normalize_time(&input.time)?;

    let latitude: f64 = input
        .latitude
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidCoordinate(format!("latitude '{}'", input.latitude)))?;
    let longitude: f64 = input
        .longitude
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidCoordinate(format!("longitude '{}'", input.longitude)))?;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::InvalidCoordinate(format!(
            "latitude {latitude} outside [-90, 90]"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::InvalidCoordinate(format!(
            "longitude {longitude} outside [-180, 180]"
        )));
    }
    // (0, 0) is the unset sentinel, not a real birthplace.
    if latitude == 0.0 && longitude == 0.0 {
        return Err(ValidationError::InvalidCoordinate(
            "latitude and longitude are unset".to_string(),
        ));
    }

    Ok(BirthDetails {
        name: name.to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        time,
        place: place.to_string(),
        latitude,
        longitude,
    })
}
