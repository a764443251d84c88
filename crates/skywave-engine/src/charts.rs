use serde::Serialize;

use skywave_core::{AnalysisResult, Band, Quality};

/// Relative noise rating for the band comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoiseRating {
    High,
    Med,
    Low,
    VLow,
}

/// Day/night performance constants for one band. Reference data, not derived
/// from any analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandProfile {
    pub band: Band,
    pub day: f64,
    pub night: f64,
    pub avg: f64,
    pub noise: NoiseRating,
}

/// Static reference table used by the band comparison chart.
pub const BAND_COMPARISON: [BandProfile; 6] = [
    BandProfile { band: Band::B160, day: 15.0, night: 85.0, avg: 50.0, noise: NoiseRating::High },
    BandProfile { band: Band::B80, day: 35.0, night: 75.0, avg: 55.0, noise: NoiseRating::Med },
    BandProfile { band: Band::B40, day: 65.0, night: 80.0, avg: 72.0, noise: NoiseRating::Low },
    BandProfile { band: Band::B20, day: 85.0, night: 45.0, avg: 65.0, noise: NoiseRating::Low },
    BandProfile { band: Band::B15, day: 90.0, night: 20.0, avg: 55.0, noise: NoiseRating::VLow },
    BandProfile { band: Band::B10, day: 95.0, night: 10.0, avg: 52.0, noise: NoiseRating::VLow },
];

/// One hour of the forecast annotated with a numeric quality score for
/// charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    pub hour: String,
    pub quality: String,
    pub snr: f64,
    pub probability: f64,
    pub mode: String,
    pub quality_score: u8,
}

/// Estimated share of one propagation mechanism on the analyzed path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeShare {
    pub name: &'static str,
    pub value: f64,
}

/// One spoke of the signal-quality radial chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialMetric {
    pub metric: &'static str,
    pub value: f64,
}

/// The four independent chart-ready projections derived from one analysis.
/// Never persisted; recomputed from the analysis on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProjection {
    pub hourly: Vec<HourlyPoint>,
    pub bands: Vec<BandProfile>,
    pub modes: Vec<ModeShare>,
    pub radial: Vec<RadialMetric>,
}

/// Pure mapping from an analysis result and the static reference tables into
/// chart-ready series. Deterministic, no I/O; safe to memoize per analysis.
pub fn build_chart_projection(analysis: &AnalysisResult) -> ChartProjection {
    let hourly = analysis
        .hourly_forecast
        .iter()
        .map(|hour| HourlyPoint {
            hour: hour.hour.clone(),
            quality: hour.quality.clone(),
            snr: hour.snr,
            probability: hour.probability,
            mode: hour.mode.clone(),
            quality_score: Quality::from_label(&hour.quality).score(),
        })
        .collect();

    let modes = vec![
        ModeShare {
            name: "Ground Wave",
            value: if analysis.distance < 500.0 { 70.0 } else { 20.0 },
        },
        ModeShare {
            name: "Sky Wave",
            value: if analysis.distance > 300.0 { 80.0 } else { 30.0 },
        },
        ModeShare {
            name: "Scatter",
            value: 15.0,
        },
        ModeShare {
            name: "Gray Line",
            value: if analysis.gray_line_enhancement { 25.0 } else { 5.0 },
        },
    ];

    let radial = vec![
        RadialMetric {
            metric: "Signal",
            value: analysis.confidence.unwrap_or(75.0),
        },
        RadialMetric {
            metric: "SNR",
            value: 65.0,
        },
        RadialMetric {
            metric: "Stability",
            value: 80.0,
        },
    ];

    ChartProjection {
        hourly,
        bands: BAND_COMPARISON.to_vec(),
        modes,
        radial,
    }
}
