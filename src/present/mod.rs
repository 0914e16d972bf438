//! Result Presenter
//!
//! Turns a completed analysis result into one of four selectable views,
//! each a plain list of text lines for the UI to draw. Rendering is
//! deterministic and total: every optional field falls back to a display
//! token, so a partial result degrades instead of failing. Selecting a
//! view is pure UI state and never re-contacts the service.

use serde_json::Value;

use crate::chart;
use crate::models::{AnalysisResult, Dasha, Dosha, Kundli, MahadashaPeriod, Panchang};

/// Fallback token for any absent display field.
pub const NA: &str = "N/A";

const PROGRESS_BAR_WIDTH: usize = 30;

/// The closed set of result views, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Chart,
    Doshas,
    Dasha,
    Panchang,
}

impl ViewId {
    pub const ALL: [ViewId; 4] = [ViewId::Chart, ViewId::Doshas, ViewId::Dasha, ViewId::Panchang];

    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Chart => "Kundli",
            ViewId::Doshas => "Doshas",
            ViewId::Dasha => "Dasha",
            ViewId::Panchang => "Panchang",
        }
    }

    pub fn next(&self) -> ViewId {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> ViewId {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A rendered view: a title plus the lines the UI draws verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub title: String,
    pub lines: Vec<String>,
}

/// Render the selected view from the analysis result.
pub fn present(result: &AnalysisResult, view: ViewId) -> RenderedView {
    let lines = match view {
        ViewId::Chart => render_chart(result.kundli.as_ref()),
        ViewId::Doshas => render_doshas(&result.doshas),
        ViewId::Dasha => render_dasha(result.dasha.as_ref()),
        ViewId::Panchang => render_panchang(result.panchang.as_ref()),
    };
    RenderedView {
        title: view.title().to_string(),
        lines,
    }
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => NA,
    }
}

fn render_chart(kundli: Option<&Kundli>) -> Vec<String> {
    let empty = Kundli::default();
    let kundli = kundli.unwrap_or(&empty);
    let lagna = kundli
        .lagna
        .as_ref()
        .and_then(|l| l.rashi.as_deref())
        .unwrap_or(NA);

    let mut lines: Vec<String> = Vec::new();
    lines.push("Birth Chart (Kundli)".to_string());
    lines.push(String::new());
    lines.extend(chart::layout(&kundli.houses, lagna).lines().map(String::from));
    lines.push(String::new());
    lines.push("Planetary Positions".to_string());
    if kundli.planets.is_empty() {
        lines.push(format!("  (no planetary data: {NA})"));
    }
    for (planet, position) in &kundli.planets {
        lines.push(format!(
            "  {planet:<10} {:<15} {}",
            or_na(position.rashi.as_deref()),
            or_na(position.nakshatra.as_deref()),
        ));
    }
    lines
}

fn render_doshas(doshas: &[Dosha]) -> Vec<String> {
    if doshas.is_empty() {
        return vec![
            "No Major Doshas Detected".to_string(),
            String::new(),
            "This is a favorable indication for smooth life events.".to_string(),
        ];
    }

    let mut lines = vec!["Dosha Analysis".to_string()];
    for dosha in doshas {
        lines.push(String::new());
        lines.push(format!("• {}", or_na(dosha.name.as_deref())));
        lines.push(format!("  Severity:    {}", or_na(dosha.severity.as_deref())));
        lines.push(format!("  Description: {}", or_na(dosha.description.as_deref())));
        lines.push(format!("  Impact:      {}", or_na(dosha.impact.as_deref())));
    }
    lines
}

/// Mahadasha progress as a percentage, clamped to [0, 100]. Malformed
/// upstream values (remaining > total, zero or negative total) still
/// yield something drawable.
pub fn mahadasha_progress_percent(period: &MahadashaPeriod) -> Option<f64> {
    let total = period.total_years?;
    let remaining = period.years_remaining?;
    if !(total > 0.0) || !remaining.is_finite() {
        return None;
    }
    let fraction = ((total - remaining) / total).clamp(0.0, 1.0);
    Some(fraction * 100.0)
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_BAR_WIDTH);
    format!(
        "[{}{}] {:.0}%",
        "█".repeat(filled),
        "░".repeat(PROGRESS_BAR_WIDTH - filled),
        percent
    )
}

fn render_dasha(dasha: Option<&Dasha>) -> Vec<String> {
    let empty = Dasha::default();
    let dasha = dasha.unwrap_or(&empty);
    let maha = dasha.mahadasha.clone().unwrap_or_default();

    let mut lines = vec![
        "Vimshottari Dasha".to_string(),
        String::new(),
        format!("Current Mahadasha: {}", or_na(maha.planet.as_deref())),
        format!("  Start:           {}", or_na(maha.start_date.as_deref())),
        format!("  End:             {}", or_na(maha.end_date.as_deref())),
        format!(
            "  Years Remaining: {}",
            maha.years_remaining
                .map(|y| format!("{y:.1}"))
                .unwrap_or_else(|| NA.to_string())
        ),
    ];
    match mahadasha_progress_percent(&maha) {
        Some(percent) => lines.push(format!("  Progress:        {}", progress_bar(percent))),
        None => lines.push(format!("  Progress:        {NA}")),
    }

    if let Some(antardasha) = &dasha.antardasha {
        lines.push(String::new());
        lines.push(format!("Antardasha: {}", or_na(antardasha.planet.as_deref())));
        if let Some(note) = &antardasha.note {
            lines.push(format!("  {note}"));
        }
    }
    if let Some(lord) = &dasha.birth_nakshatra_lord {
        lines.push(format!("Birth Nakshatra Lord: {lord}"));
    }
    if let Some(interpretation) = &dasha.interpretation {
        lines.push(String::new());
        lines.push("Interpretation".to_string());
        lines.extend(interpretation_lines(interpretation));
    }
    lines
}

/// The interpretation payload is free-form JSON: a string or a map of
/// section name to text. Anything else is skipped.
fn interpretation_lines(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => vec![format!("  {text}")],
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, v)| v.as_str().map(|text| format!("  {key}: {text}")))
            .collect(),
        _ => Vec::new(),
    }
}

fn render_panchang(panchang: Option<&Panchang>) -> Vec<String> {
    let empty = Panchang::default();
    let p = panchang.unwrap_or(&empty);

    let tithi = p
        .tithi
        .as_ref()
        .map(|t| {
            format!(
                "{} {}",
                or_na(t.paksha.as_deref()),
                or_na(t.name.as_deref())
            )
        })
        .unwrap_or_else(|| NA.to_string());

    let mut lines = vec![
        "Panchang".to_string(),
        String::new(),
        format!("  Vara (Day): {}", or_na(p.vara.as_deref())),
        format!("  Tithi:      {tithi}"),
        format!("  Nakshatra:  {}", or_na(p.nakshatra.as_deref())),
        format!("  Yoga:       {}", or_na(p.yoga.as_deref())),
    ];
    if let Some(karana) = &p.karana {
        lines.push(format!("  Karana:     {karana}"));
    }
    // Supplemental attributes render independently; one being absent
    // never hides another.
    if let Some(sunrise) = &p.sunrise {
        lines.push(format!("  Sunrise:    {sunrise}"));
    }
    if let Some(sunset) = &p.sunset {
        lines.push(format!("  Sunset:     {sunset}"));
    }
    if let Some(rahu) = &p.rahu_kaal {
        let period = rahu
            .period_index
            .map(|i| format!("Period {i}"))
            .unwrap_or_else(|| NA.to_string());
        lines.push(format!("  Rahu Kaal:  {period}"));
        if let Some(note) = &rahu.note {
            lines.push(format!("              ({note})"));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Antardasha, Tithi};

    #[test]
    fn test_empty_doshas_renders_affirmative_branch() {
        let result = AnalysisResult::default();
        let view = present(&result, ViewId::Doshas);
        assert_eq!(view.lines[0], "No Major Doshas Detected");
    }

    #[test]
    fn test_dosha_cards_render_with_fallbacks() {
        let result = AnalysisResult {
            doshas: vec![Dosha {
                name: Some("Mangal Dosha".into()),
                severity: Some("High".into()),
                ..Dosha::default()
            }],
            ..AnalysisResult::default()
        };
        let view = present(&result, ViewId::Doshas);
        assert!(view.lines.iter().any(|l| l.contains("Mangal Dosha")));
        assert!(view.lines.iter().any(|l| l.contains("Severity:    High")));
        assert!(view.lines.iter().any(|l| l.contains("Description: N/A")));
    }

    #[test]
    fn test_progress_venus_scenario() {
        let period = MahadashaPeriod {
            planet: Some("Venus".into()),
            total_years: Some(20.0),
            years_remaining: Some(5.0),
            ..MahadashaPeriod::default()
        };
        assert_eq!(mahadasha_progress_percent(&period), Some(75.0));
    }

    #[test]
    fn test_progress_clamps_malformed_remaining() {
        let period = MahadashaPeriod {
            total_years: Some(10.0),
            years_remaining: Some(25.0),
            ..MahadashaPeriod::default()
        };
        let percent = mahadasha_progress_percent(&period).unwrap();
        assert!((0.0..=100.0).contains(&percent));
        assert_eq!(percent, 0.0);
    }

    #[test]
    fn test_progress_handles_zero_total() {
        let period = MahadashaPeriod {
            total_years: Some(0.0),
            years_remaining: Some(1.0),
            ..MahadashaPeriod::default()
        };
        assert_eq!(mahadasha_progress_percent(&period), None);
    }

    #[test]
    fn test_dasha_view_renders_progress_bar() {
        let result = AnalysisResult {
            dasha: Some(Dasha {
                mahadasha: Some(MahadashaPeriod {
                    planet: Some("Venus".into()),
                    total_years: Some(20.0),
                    years_remaining: Some(5.0),
                    ..MahadashaPeriod::default()
                }),
                antardasha: Some(Antardasha {
                    planet: Some("Sun".into()),
                    note: None,
                }),
                ..Dasha::default()
            }),
            ..AnalysisResult::default()
        };
        let view = present(&result, ViewId::Dasha);
        assert!(view.lines.iter().any(|l| l.contains("75%")));
        assert!(view.lines.iter().any(|l| l.contains("Antardasha: Sun")));
    }

    #[test]
    fn test_dasha_view_with_no_data_shows_na() {
        let view = present(&AnalysisResult::default(), ViewId::Dasha);
        assert!(view.lines.iter().any(|l| l.contains("Current Mahadasha: N/A")));
        assert!(view.lines.iter().any(|l| l.contains("Progress:        N/A")));
    }

    #[test]
    fn test_panchang_fallbacks_are_independent() {
        let result = AnalysisResult {
            panchang: Some(Panchang {
                vara: Some("Friday".into()),
                tithi: Some(Tithi {
                    name: Some("Panchami".into()),
                    paksha: Some("Shukla".into()),
                }),
                ..Panchang::default()
            }),
            ..AnalysisResult::default()
        };
        let view = present(&result, ViewId::Panchang);
        assert!(view.lines.iter().any(|l| l.contains("Vara (Day): Friday")));
        assert!(view.lines.iter().any(|l| l.contains("Shukla Panchami")));
        assert!(view.lines.iter().any(|l| l.contains("Nakshatra:  N/A")));
        assert!(view.lines.iter().any(|l| l.contains("Yoga:       N/A")));
    }

    #[test]
    fn test_panchang_renders_rahu_kaal() {
        let json = r#"{
            "panchang": {
                "vara": "Friday",
                "rahu_kaal": {"period_index": 4, "note": "derived from sunrise-sunset segmentation"}
            }
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        let view = present(&result, ViewId::Panchang);
        assert!(view.lines.iter().any(|l| l.contains("Rahu Kaal:  Period 4")));
        assert!(view
            .lines
            .iter()
            .any(|l| l.contains("derived from sunrise-sunset segmentation")));
    }

    #[test]
    fn test_rahu_kaal_without_index_shows_na() {
        let result = AnalysisResult {
            panchang: Some(Panchang {
                rahu_kaal: Some(crate::models::RahuKaal {
                    period_index: None,
                    note: None,
                }),
                ..Panchang::default()
            }),
            ..AnalysisResult::default()
        };
        let view = present(&result, ViewId::Panchang);
        assert!(view.lines.iter().any(|l| l.contains("Rahu Kaal:  N/A")));
    }

    #[test]
    fn test_sunrise_and_sunset_render_independently() {
        let result = AnalysisResult {
            panchang: Some(Panchang {
                sunrise: Some("06:01".into()),
                ..Panchang::default()
            }),
            ..AnalysisResult::default()
        };
        let view = present(&result, ViewId::Panchang);
        assert!(view.lines.iter().any(|l| l.contains("Sunrise:    06:01")));

        let result = AnalysisResult {
            panchang: Some(Panchang {
                sunset: Some("18:45".into()),
                ..Panchang::default()
            }),
            ..AnalysisResult::default()
        };
        let view = present(&result, ViewId::Panchang);
        assert!(view.lines.iter().any(|l| l.contains("Sunset:     18:45")));
    }

    #[test]
    fn test_chart_view_includes_diagram_and_planets() {
        let json = r#"{
            "kundli": {
                "lagna": {"rashi": "Aries"},
                "houses": {"1": "Sun"},
                "planets": {"Sun": {"rashi": "Leo", "nakshatra": "Magha"}}
            }
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        let view = present(&result, ViewId::Chart);
        assert!(view.lines.iter().any(|l| l.contains("(Aries)")));
        assert!(view.lines.iter().any(|l| l.contains("[ 1] Sun")));
        assert!(view.lines.iter().any(|l| l.contains("Sun") && l.contains("Magha")));
    }

    #[test]
    fn test_view_cycling_is_closed() {
        let mut view = ViewId::Chart;
        for _ in 0..ViewId::ALL.len() {
            view = view.next();
        }
        assert_eq!(view, ViewId::Chart);
        assert_eq!(ViewId::Chart.prev(), ViewId::Panchang);
    }

    #[test]
    fn test_presentation_is_deterministic() {
        let result = AnalysisResult::default();
        assert_eq!(present(&result, ViewId::Chart), present(&result, ViewId::Chart));
    }
}
