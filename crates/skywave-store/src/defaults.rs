use chrono::Utc;

use skywave_core::{IonosphereSnapshot, SolarSnapshot};

/// Built-in solar snapshot used when the oracle is unreachable and no cached
/// snapshot exists. Values represent quiet, ordinary conditions.
pub fn default_solar() -> SolarSnapshot {
    SolarSnapshot {
        sfi: 145.0,
        kp: 2.1,
        a_index: 12.0,
        sunspots: 67.0,
        geomagnetic_status: "Quiet".to_string(),
        solar_flares: "None".to_string(),
        forecast_24h: "Stable conditions expected".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        propagation_conditions: "Good".to_string(),
        xray_flux: "B2.1".to_string(),
        solar_wind: 385.0,
        density: 7.2,
        proton_flux: 0.4,
        electron_flux: 2100.0,
        dst_index: -15.0,
        fallback: true,
    }
}

/// Built-in ionospheric snapshot used when the oracle is unreachable and no
/// cached snapshot exists.
pub fn default_ionosphere() -> IonosphereSnapshot {
    IonosphereSnapshot {
        tec: 28.5,
        fo_f2: 5.2,
        hm_f2: 295.0,
        fo_e: 3.1,
        d_layer_absorption: 2.8,
        muf_160m: 2.0,
        luf_160m: 1.6,
        timestamp: Utc::now().to_rfc3339(),
        layer_conditions: "Normal".to_string(),
        critical_frequency: 1.85,
        virtual_height: 85.0,
        noise_floor: -115.0,
        electron_density: 1.2e6,
        scintillation_index: 0.3,
        fading_depth: 12.0,
        fallback: true,
    }
}
