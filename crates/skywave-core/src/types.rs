use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type AnalysisId = Uuid;

/// Amateur bands covered by the band comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "160m")]
    B160,
    #[serde(rename = "80m")]
    B80,
    #[serde(rename = "40m")]
    B40,
    #[serde(rename = "20m")]
    B20,
    #[serde(rename = "15m")]
    B15,
    #[serde(rename = "10m")]
    B10,
}

impl Band {
    pub const ALL: [Band; 6] = [
        Band::B160,
        Band::B80,
        Band::B40,
        Band::B20,
        Band::B15,
        Band::B10,
    ];
}

impl Default for Band {
    fn default() -> Self {
        Band::B160
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Band::B160 => "160m",
            Band::B80 => "80m",
            Band::B40 => "40m",
            Band::B20 => "20m",
            Band::B15 => "15m",
            Band::B10 => "10m",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "160m" | "160" => Ok(Band::B160),
            "80m" | "80" => Ok(Band::B80),
            "40m" | "40" => Ok(Band::B40),
            "20m" | "20" => Ok(Band::B20),
            "15m" | "15" => Ok(Band::B15),
            "10m" | "10" => Ok(Band::B10),
            other => Err(format!("unknown band: {}", other)),
        }
    }
}

/// Signal quality levels, ordered worst to best so comparisons work.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Quality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Quality {
    /// Numeric score used by the chart projections (Poor=1 .. Excellent=4).
    pub fn score(&self) -> u8 {
        match self {
            Quality::Poor => 1,
            Quality::Fair => 2,
            Quality::Good => 3,
            Quality::Excellent => 4,
        }
    }

    /// Lenient mapping for quality labels coming back from the analysis
    /// service. Anything unrecognized counts as Poor, matching the chart
    /// scoring rules.
    pub fn from_label(label: &str) -> Quality {
        let l = label.to_lowercase();
        if l.contains("excellent") {
            Quality::Excellent
        } else if l.contains("good") {
            Quality::Good
        } else if l.contains("fair") {
            Quality::Fair
        } else {
            Quality::Poor
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quality::Poor => "Poor",
            Quality::Fair => "Fair",
            Quality::Good => "Good",
            Quality::Excellent => "Excellent",
        };
        write!(f, "{}", s)
    }
}

/// Solar telemetry snapshot. Field names mirror the service JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarSnapshot {
    pub sfi: f64,
    pub kp: f64,
    pub a_index: f64,
    pub sunspots: f64,
    pub geomagnetic_status: String,
    pub solar_flares: String,
    #[serde(default)]
    pub forecast_24h: String,
    pub timestamp: String,
    pub propagation_conditions: String,
    pub xray_flux: String,
    pub solar_wind: f64,
    pub density: f64,
    pub proton_flux: f64,
    pub electron_flux: f64,
    pub dst_index: f64,
    /// Marks a non-authoritative (cached or default) instance.
    #[serde(default)]
    pub fallback: bool,
}

impl SolarSnapshot {
    /// Range checks applied before a snapshot is accepted as authoritative.
    /// Returns every violated constraint, not just the first.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.sfi.is_finite() || self.sfi < 60.0 || self.sfi > 300.0 {
            errors.push("SFI must be a number between 60 and 300".to_string());
        }
        if !self.kp.is_finite() || self.kp < 0.0 || self.kp > 9.0 {
            errors.push("Kp must be a number between 0 and 9".to_string());
        }
        if self.timestamp.is_empty() {
            errors.push("Timestamp is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Ionospheric telemetry snapshot. All fields are expected present but no
/// numeric ranges are enforced on the service side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IonosphereSnapshot {
    pub tec: f64,
    pub fo_f2: f64,
    pub hm_f2: f64,
    pub fo_e: f64,
    pub d_layer_absorption: f64,
    pub muf_160m: f64,
    pub luf_160m: f64,
    pub timestamp: String,
    pub layer_conditions: String,
    pub critical_frequency: f64,
    pub virtual_height: f64,
    pub noise_floor: f64,
    pub electron_density: f64,
    pub scintillation_index: f64,
    pub fading_depth: f64,
    #[serde(default)]
    pub fallback: bool,
}

/// One synthetic hour of the trailing 24-hour trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalSample {
    pub time: String,
    pub full_time: String,
    pub signal: f64,
    pub muf: f64,
    pub absorption: f64,
    pub kp: f64,
    pub sfi: f64,
    pub quality: Quality,
    pub snr: f64,
}

/// One hour of the path-specific forecast inside an analysis result. Quality
/// and mode stay free-form here; the service output is accepted structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    pub hour: String,
    pub quality: String,
    pub snr: f64,
    pub probability: f64,
    pub mode: String,
}

/// Point-to-point propagation analysis as returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub distance: f64,
    pub azimuth: f64,
    pub reverse_azimuth: f64,
    pub best_times: Vec<String>,
    pub signal_quality: String,
    pub propagation_mode: String,
    pub power_recommendation: String,
    pub antenna_recommendation: String,
    #[serde(default)]
    pub limiting_factors: Vec<String>,
    #[serde(default)]
    pub hourly_forecast: Vec<HourlyForecast>,
    pub overall_recommendation: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub noise_level: Option<f64>,
    #[serde(default)]
    pub expected_rst: Option<String>,
    #[serde(default)]
    pub path_loss: Option<f64>,
    #[serde(default)]
    pub skip_distance: Option<f64>,
    #[serde(default)]
    pub takeoff_angle: Option<f64>,
    #[serde(default)]
    pub multi_hop: bool,
    #[serde(default)]
    pub gray_line_enhancement: bool,
    #[serde(default)]
    pub seasonal_factor: String,
}

/// One period of the extended 48-hour forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub time_range: String,
    pub conditions: String,
    pub quality: String,
    pub recommendation: String,
    pub probability: f64,
    #[serde(default)]
    pub key_factors: Vec<String>,
    #[serde(default)]
    pub gray_line_windows: Vec<String>,
}

/// Extended propagation forecast, a best-effort enhancement of the primary
/// analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub periods: Vec<ForecastPeriod>,
    pub trends: String,
    #[serde(default)]
    pub alerts: Vec<String>,
    pub solar_activity: String,
    pub geomagnetic: String,
    pub confidence: f64,
    #[serde(default)]
    pub special_events: Vec<String>,
}

/// Telemetry attached to a feedback record so corrections can be replayed
/// against the conditions that produced the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionsSnapshot {
    pub solar: Option<SolarSnapshot>,
    pub ionosphere: Option<IonosphereSnapshot>,
}

/// User verdict on one analysis. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub analysis_id: AnalysisId,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
    pub analysis_snapshot: AnalysisResult,
    pub conditions_snapshot: ConditionsSnapshot,
}

/// Saved path preset. The store keeps at most ten, oldest evicted first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: Uuid,
    pub name: String,
    pub from_location: String,
    pub to_location: String,
    pub band: Band,
    pub timestamp: DateTime<Utc>,
}

/// One completed analysis as kept in the bounded history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub band: Band,
    pub from_location: String,
    pub to_location: String,
    pub timestamp: DateTime<Utc>,
    pub result: AnalysisResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_ordering_is_total() {
        assert!(Quality::Poor < Quality::Fair);
        assert!(Quality::Fair < Quality::Good);
        assert!(Quality::Good < Quality::Excellent);
        assert_eq!(Quality::Excellent.score(), 4);
        assert_eq!(Quality::Poor.score(), 1);
    }

    #[test]
    fn quality_from_label_is_lenient() {
        assert_eq!(Quality::from_label("Excellent"), Quality::Excellent);
        assert_eq!(Quality::from_label("very good"), Quality::Good);
        assert_eq!(Quality::from_label("FAIR"), Quality::Fair);
        assert_eq!(Quality::from_label("marginal"), Quality::Poor);
    }

    #[test]
    fn band_round_trips_through_display() {
        for band in Band::ALL {
            assert_eq!(band.to_string().parse::<Band>().unwrap(), band);
        }
        assert!("2m".parse::<Band>().is_err());
    }

    #[test]
    fn solar_validation_rejects_out_of_range() {
        let mut snap = solar_fixture();
        assert!(snap.validate().is_ok());

        snap.sfi = 500.0;
        snap.kp = 12.0;
        let errors = snap.validate().unwrap_err();
        assert_eq!(errors.len(), 2);

        snap = solar_fixture();
        snap.timestamp = String::new();
        assert!(snap.validate().is_err());
    }

    #[test]
    fn solar_snapshot_uses_service_field_names() {
        let json = serde_json::to_value(solar_fixture()).unwrap();
        assert!(json.get("aIndex").is_some());
        assert!(json.get("geomagneticStatus").is_some());
        assert!(json.get("xrayFlux").is_some());
        assert!(json.get("dstIndex").is_some());
    }

    fn solar_fixture() -> SolarSnapshot {
        SolarSnapshot {
            sfi: 145.0,
            kp: 2.1,
            a_index: 12.0,
            sunspots: 67.0,
            geomagnetic_status: "Quiet".into(),
            solar_flares: "None".into(),
            forecast_24h: "Stable conditions expected".into(),
            timestamp: "2026-01-01T00:00:00Z".into(),
            propagation_conditions: "Good".into(),
            xray_flux: "B2.1".into(),
            solar_wind: 385.0,
            density: 7.2,
            proton_flux: 0.4,
            electron_flux: 2100.0,
            dst_index: -15.0,
            fallback: false,
        }
    }
}
