use skywave_core::{Band, IonosphereSnapshot, Location, Result, SolarSnapshot};

/// Request text for current solar telemetry. The service answers free-form
/// text that must contain exactly the JSON object described here.
pub fn solar_prompt() -> String {
    "Provide current REALISTIC solar data for HF propagation analysis:\n\
     \n\
     IMPORTANT: Use typical real data values:\n\
     - SFI: between 120-180 (normal conditions)\n\
     - Kp: between 0-4 (quiet to moderately active)\n\
     - A-index: between 5-30\n\
     - Sunspots: between 20-100\n\
     - Geomagnetic status consistent with Kp values\n\
     \n\
     Respond ONLY with valid JSON:\n\
     {\n\
       \"sfi\": number,\n\
       \"kp\": number,\n\
       \"aIndex\": number,\n\
       \"sunspots\": number,\n\
       \"geomagneticStatus\": \"string\",\n\
       \"solarFlares\": \"string\",\n\
       \"forecast24h\": \"string\",\n\
       \"timestamp\": \"ISO date string\",\n\
       \"propagationConditions\": \"string\",\n\
       \"xrayFlux\": \"string\",\n\
       \"solarWind\": number,\n\
       \"density\": number,\n\
       \"protonFlux\": number,\n\
       \"electronFlux\": number,\n\
       \"dstIndex\": number\n\
     }"
        .to_string()
}

/// Request text for current ionospheric telemetry.
pub fn ionosphere_prompt() -> String {
    "Provide REALISTIC ionospheric data for low-band HF propagation analysis:\n\
     \n\
     IMPORTANT: Use typical real values:\n\
     - TEC: between 15-40 TECU (normal conditions)\n\
     - foF2: between 3-8 MHz (F2 critical frequency)\n\
     - hmF2: between 250-350 km (F2 height)\n\
     - foE: between 2-4 MHz (E critical frequency)\n\
     - D-layer absorption: between 1-6 dB for 160m\n\
     - MUF 160m: between 1.6-2.5 MHz\n\
     - LUF 160m: between 1.6-1.8 MHz\n\
     \n\
     Respond ONLY with valid JSON:\n\
     {\n\
       \"tec\": number,\n\
       \"foF2\": number,\n\
       \"hmF2\": number,\n\
       \"foE\": number,\n\
       \"dLayerAbsorption\": number,\n\
       \"muf160m\": number,\n\
       \"luf160m\": number,\n\
       \"timestamp\": \"ISO date string\",\n\
       \"layerConditions\": \"string\",\n\
       \"criticalFrequency\": number,\n\
       \"virtualHeight\": number,\n\
       \"noiseFloor\": number,\n\
       \"electronDensity\": number,\n\
       \"scintillationIndex\": number,\n\
       \"fadingDepth\": number\n\
     }"
        .to_string()
}

/// Request text for a point-to-point path analysis, embedding the current
/// telemetry as serialized JSON context.
pub fn analysis_prompt(
    band: Band,
    from: &Location,
    to: &Location,
    solar: &SolarSnapshot,
    ionosphere: &IonosphereSnapshot,
) -> Result<String> {
    let solar_json = serde_json::to_string(solar)?;
    let ionosphere_json = serde_json::to_string(ionosphere)?;

    Ok(format!(
        "Analyze HF propagation on {band} between \"{from}\" and \"{to}\" using PRECISE TECHNICAL DATA:\n\
         \n\
         Solar Data: {solar}\n\
         Ionospheric Data: {ionosphere}\n\
         \n\
         IMPORTANT: Calculate REALISTICALLY considering:\n\
         - Low bands are NIGHTTIME bands (best propagation 19:00-06:00 UTC)\n\
         - Significant D-layer absorption during daytime\n\
         - Ground wave up to ~500km, sky wave for longer distances\n\
         - Atmospheric noise levels typical for {band}\n\
         - Seasonality (winter better in northern hemisphere)\n\
         - Gray line enhancement periods\n\
         \n\
         Calculate with SCIENTIFIC PRECISION:\n\
         \n\
         Respond ONLY with valid JSON:\n\
         {{\n\
           \"distance\": number,\n\
           \"azimuth\": number,\n\
           \"reverseAzimuth\": number,\n\
           \"bestTimes\": [\"19:00-06:00 UTC\", \"other windows\"],\n\
           \"signalQuality\": \"string based on conditions\",\n\
           \"propagationMode\": \"Ground Wave\" or \"Sky Wave\" or \"Hybrid\",\n\
           \"powerRecommendation\": \"specific string\",\n\
           \"antennaRecommendation\": \"specific string for {band}\",\n\
           \"limitingFactors\": [\"array of real factors\"],\n\
           \"hourlyForecast\": [\n\
             {{\"hour\": \"00:00\", \"quality\": \"string\", \"snr\": number, \"probability\": number, \"mode\": \"string\"}}\n\
           ],\n\
           \"overallRecommendation\": \"detailed string\",\n\
           \"confidence\": number,\n\
           \"noiseLevel\": number,\n\
           \"expectedRST\": \"string\",\n\
           \"pathLoss\": number,\n\
           \"skipDistance\": number,\n\
           \"takeoffAngle\": number,\n\
           \"multiHop\": boolean,\n\
           \"grayLineEnhancement\": boolean,\n\
           \"seasonalFactor\": \"string\"\n\
         }}",
        band = band,
        from = from.as_str(),
        to = to.as_str(),
        solar = solar_json,
        ionosphere = ionosphere_json,
    ))
}

/// Request text for the extended 48-hour forecast.
pub fn forecast_prompt(
    band: Band,
    solar: &SolarSnapshot,
    ionosphere: &IonosphereSnapshot,
) -> Result<String> {
    let solar_json = serde_json::to_string(solar)?;
    let ionosphere_json = serde_json::to_string(ionosphere)?;

    Ok(format!(
        "Generate SCIENTIFIC propagation forecast for {band} for next 48 hours:\n\
         \n\
         Current data:\n\
         Solar: {solar}\n\
         Ionosphere: {ionosphere}\n\
         \n\
         CONSIDER REAL FACTORS:\n\
         - Current solar cycle phase\n\
         - Seasonality and geographic factors\n\
         - Geomagnetic patterns\n\
         - D-layer absorption cycles\n\
         - Atmospheric noise variations\n\
         - Nighttime propagation patterns\n\
         - Gray line periods\n\
         \n\
         Respond ONLY with valid JSON:\n\
         {{\n\
           \"periods\": [\n\
             {{\n\
               \"timeRange\": \"Tonight 19:00-06:00\",\n\
               \"conditions\": \"technical description\",\n\
               \"quality\": \"Excellent/Good/Fair/Poor\",\n\
               \"recommendation\": \"specific actions\",\n\
               \"probability\": number,\n\
               \"keyFactors\": [\"array of factors\"],\n\
               \"grayLineWindows\": [\"array of UTC times\"]\n\
             }}\n\
           ],\n\
           \"trends\": \"trend analysis based on data\",\n\
           \"alerts\": [\"specific alerts based on conditions\"],\n\
           \"solarActivity\": \"solar activity forecast\",\n\
           \"geomagnetic\": \"geomagnetic forecast\",\n\
           \"confidence\": number,\n\
           \"specialEvents\": [\"meteor showers\", \"contests\", \"etc\"]\n\
         }}",
        band = band,
        solar = solar_json,
        ionosphere = ionosphere_json,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skywave_core::validate_location;

    fn fixtures() -> (SolarSnapshot, IonosphereSnapshot) {
        let solar: SolarSnapshot = serde_json::from_str(
            r#"{
                "sfi": 145, "kp": 2.1, "aIndex": 12, "sunspots": 67,
                "geomagneticStatus": "Quiet", "solarFlares": "None",
                "forecast24h": "Stable", "timestamp": "2026-02-03T12:00:00Z",
                "propagationConditions": "Good", "xrayFlux": "B2.1",
                "solarWind": 385, "density": 7.2, "protonFlux": 0.4,
                "electronFlux": 2100, "dstIndex": -15
            }"#,
        )
        .unwrap();
        let ionosphere: IonosphereSnapshot = serde_json::from_str(
            r#"{
                "tec": 28.5, "foF2": 5.2, "hmF2": 295, "foE": 3.1,
                "dLayerAbsorption": 2.8, "muf160m": 2.0, "luf160m": 1.6,
                "timestamp": "2026-02-03T12:00:00Z", "layerConditions": "Normal",
                "criticalFrequency": 1.85, "virtualHeight": 85,
                "noiseFloor": -115, "electronDensity": 1200000,
                "scintillationIndex": 0.3, "fadingDepth": 12
            }"#,
        )
        .unwrap();
        (solar, ionosphere)
    }

    #[test]
    fn analysis_prompt_embeds_context_json() {
        let (solar, ionosphere) = fixtures();
        let from = validate_location("FN30").unwrap();
        let to = validate_location("IO91").unwrap();

        let prompt =
            analysis_prompt(Band::B160, &from, &to, &solar, &ionosphere).unwrap();
        assert!(prompt.contains("160m"));
        assert!(prompt.contains("\"FN30\""));
        assert!(prompt.contains("\"geomagneticStatus\":\"Quiet\""));
        assert!(prompt.contains("\"muf160m\":2.0"));
    }

    #[test]
    fn telemetry_prompts_name_every_contract_field() {
        let solar = solar_prompt();
        for field in ["sfi", "aIndex", "xrayFlux", "dstIndex", "electronFlux"] {
            assert!(solar.contains(field), "solar prompt missing {}", field);
        }
        let ionosphere = ionosphere_prompt();
        for field in ["foF2", "hmF2", "dLayerAbsorption", "scintillationIndex"] {
            assert!(ionosphere.contains(field), "iono prompt missing {}", field);
        }
    }
}
