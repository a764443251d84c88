use serde::de::DeserializeOwned;

use skywave_core::{IonosphereSnapshot, OracleFailure, Result, SolarSnapshot};

/// Remove markdown code-fence markers the service sometimes wraps its JSON
/// answers in, then trim surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a free-form text answer as strict JSON into the expected response
/// type.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned)
        .map_err(|e| OracleFailure::Parse(e.to_string()).into())
}

/// Decode and range-check a solar telemetry answer. Payloads outside the
/// documented ranges are rejected rather than accepted with bad data.
pub fn decode_solar(text: &str) -> Result<SolarSnapshot> {
    let snapshot: SolarSnapshot = decode_json(text)?;
    snapshot
        .validate()
        .map_err(|errors| OracleFailure::Schema(errors.join("; ")))?;
    Ok(snapshot)
}

/// Decode an ionospheric telemetry answer. All fields must be present, but
/// numeric ranges are deliberately not enforced for this kind.
pub fn decode_ionosphere(text: &str) -> Result<IonosphereSnapshot> {
    decode_json(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skywave_core::SkywaveError;

    const SOLAR_JSON: &str = r#"{
        "sfi": 152, "kp": 2.3, "aIndex": 11, "sunspots": 74,
        "geomagneticStatus": "Quiet", "solarFlares": "None",
        "forecast24h": "Stable", "timestamp": "2026-02-03T12:00:00Z",
        "propagationConditions": "Good", "xrayFlux": "B3.4",
        "solarWind": 402, "density": 6.1, "protonFlux": 0.3,
        "electronFlux": 1800, "dstIndex": -9
    }"#;

    #[test]
    fn code_fences_are_stripped() {
        let fenced = format!("```json\n{}\n```", SOLAR_JSON);
        let snapshot = decode_solar(&fenced).unwrap();
        assert_eq!(snapshot.sfi, 152.0);
        assert!(!snapshot.fallback);
    }

    #[test]
    fn bare_json_decodes() {
        let snapshot = decode_solar(SOLAR_JSON).unwrap();
        assert_eq!(snapshot.kp, 2.3);
        assert_eq!(snapshot.geomagnetic_status, "Quiet");
    }

    #[test]
    fn prose_answer_is_a_parse_failure() {
        let err = decode_solar("The sun looks calm today.").unwrap_err();
        assert!(matches!(
            err,
            SkywaveError::Oracle(OracleFailure::Parse(_))
        ));
    }

    #[test]
    fn out_of_range_solar_is_a_schema_failure() {
        let bad = SOLAR_JSON.replace("\"sfi\": 152", "\"sfi\": 9000");
        let err = decode_solar(&bad).unwrap_err();
        match err {
            SkywaveError::Oracle(OracleFailure::Schema(msg)) => {
                assert!(msg.contains("SFI"));
            }
            other => panic!("expected schema failure, got {:?}", other),
        }
    }

    #[test]
    fn ionosphere_ranges_are_not_enforced() {
        // tec far outside any plausible range still decodes for this kind.
        let json = r#"{
            "tec": 99999, "foF2": 5.2, "hmF2": 295, "foE": 3.1,
            "dLayerAbsorption": 2.8, "muf160m": 2.0, "luf160m": 1.6,
            "timestamp": "2026-02-03T12:00:00Z", "layerConditions": "Normal",
            "criticalFrequency": 1.85, "virtualHeight": 85,
            "noiseFloor": -115, "electronDensity": 1200000,
            "scintillationIndex": 0.3, "fadingDepth": 12
        }"#;
        let snapshot = decode_ionosphere(json).unwrap();
        assert_eq!(snapshot.tec, 99999.0);
    }

    #[test]
    fn missing_ionosphere_field_is_rejected() {
        let json = r#"{"tec": 28.5}"#;
        assert!(decode_ionosphere(json).is_err());
    }
}
