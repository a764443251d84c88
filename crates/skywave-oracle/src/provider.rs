use async_trait::async_trait;

use skywave_core::{
    AnalysisResult, Band, ForecastResult, IonosphereSnapshot, Location, Result, SolarSnapshot,
};

/// The four request kinds the analysis service answers. Implementations carry
/// no retry logic; retry and fallback are the caller's responsibility.
#[async_trait]
pub trait PropagationOracle: Send + Sync {
    /// Current solar telemetry. The result is schema-validated before it is
    /// returned.
    async fn solar_conditions(&self) -> Result<SolarSnapshot>;

    /// Current ionospheric telemetry. Accepted structurally; no numeric
    /// ranges are enforced.
    async fn ionosphere_conditions(&self) -> Result<IonosphereSnapshot>;

    /// Point-to-point propagation analysis for a band and path, computed
    /// against the supplied telemetry.
    async fn analyze_path(
        &self,
        band: Band,
        from: &Location,
        to: &Location,
        solar: &SolarSnapshot,
        ionosphere: &IonosphereSnapshot,
    ) -> Result<AnalysisResult>;

    /// Extended 48-hour forecast for a band under the supplied telemetry.
    async fn extended_forecast(
        &self,
        band: Band,
        solar: &SolarSnapshot,
        ionosphere: &IonosphereSnapshot,
    ) -> Result<ForecastResult>;
}
