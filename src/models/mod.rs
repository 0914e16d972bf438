//! Wire Data Model
//!
//! Mirrors the VedicAI service payloads. The analysis result is treated as
//! read-only, possibly-partial data: every nested field is optional and
//! deserialization tolerates absent keys, so display code never fails on
//! an incomplete response.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validated birth data, exactly as the service expects it on the wire.
///
/// `date` is `YYYY-MM-DD` and `time` is `HH:MM:SS`; both are produced by
/// the form validator, which is the only constructor outside of tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthDetails {
    pub name: String,
    pub date: String,
    pub time: String,
    pub place: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// House number (1-12) to display value. Keys may be missing; a missing
/// house is rendered as a placeholder, never an error.
pub type HouseMap = BTreeMap<u8, HouseValue>;

/// Occupant of a house. The service sends either a pre-joined string
/// (chart endpoint) or a list of planet entries (raw kundli); both
/// collapse to one display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HouseValue {
    Text(String),
    Planets(Vec<HousePlanet>),
}

/// One planet entry inside a house list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HousePlanet {
    #[serde(default)]
    pub planet: Option<String>,
    #[serde(default)]
    pub rashi: Option<String>,
}

impl HouseValue {
    /// Collapse to display text. Empty content yields `None` so callers
    /// fall back to their placeholder token.
    pub fn display(&self) -> Option<String> {
        let text = match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Planets(planets) => planets
                .iter()
                .filter_map(|p| p.planet.as_deref())
                .collect::<Vec<_>>()
                .join(", "),
        };
        // The chart endpoint marks vacant houses with "-".
        if text.is_empty() || text == "-" {
            None
        } else {
            Some(text)
        }
    }
}

/// Ascendant info inside the kundli payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lagna {
    #[serde(default)]
    pub rashi: Option<String>,
}

/// Per-planet position entry in the kundli.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanetPosition {
    #[serde(default)]
    pub rashi: Option<String>,
    #[serde(default)]
    pub nakshatra: Option<String>,
}

/// Birth chart section of the analysis result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kundli {
    #[serde(default)]
    pub lagna: Option<Lagna>,
    #[serde(default)]
    pub houses: HouseMap,
    #[serde(default)]
    pub planets: BTreeMap<String, PlanetPosition>,
}

/// A detected astrological affliction. Pure display record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dosha {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

/// Current major planetary period.
///
/// `years_remaining <= total_years` is expected but not trusted: the
/// presenter clamps the derived progress instead of asserting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MahadashaPeriod {
    #[serde(default)]
    pub planet: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub years_remaining: Option<f64>,
    #[serde(default)]
    pub total_years: Option<f64>,
}

/// Sub-period entry; the service marks it as a simplified calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Antardasha {
    #[serde(default)]
    pub planet: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Vimshottari dasha section of the analysis result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dasha {
    #[serde(default)]
    pub mahadasha: Option<MahadashaPeriod>,
    #[serde(default)]
    pub antardasha: Option<Antardasha>,
    #[serde(default)]
    pub birth_nakshatra_lord: Option<String>,
    #[serde(default)]
    pub interpretation: Option<serde_json::Value>,
}

/// Tithi carries both the lunar-day name and the paksha (fortnight half).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tithi {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub paksha: Option<String>,
}

/// Rahu kaal entry: which of the day's eight segments is inauspicious,
/// plus the service's qualifying note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RahuKaal {
    #[serde(default)]
    pub period_index: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Daily calendrical attributes; each is independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Panchang {
    #[serde(default)]
    pub vara: Option<String>,
    #[serde(default)]
    pub tithi: Option<Tithi>,
    #[serde(default)]
    pub nakshatra: Option<String>,
    #[serde(default)]
    pub yoga: Option<String>,
    #[serde(default)]
    pub karana: Option<String>,
    #[serde(default)]
    pub sunrise: Option<String>,
    #[serde(default)]
    pub sunset: Option<String>,
    #[serde(default)]
    pub rahu_kaal: Option<RahuKaal>,
}

/// Complete analysis response from `POST /api/analysis`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub birth_details: Option<BirthDetails>,
    #[serde(default)]
    pub kundli: Option<Kundli>,
    #[serde(default)]
    pub doshas: Vec<Dosha>,
    #[serde(default)]
    pub dasha: Option<Dasha>,
    #[serde(default)]
    pub panchang: Option<Panchang>,
}

/// Response from `GET /api/search-place`: an external lookup URL the user
/// can open to confirm coordinates, not a geocode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSearch {
    pub search_url: String,
    #[serde(default)]
    pub query: Option<String>,
}
