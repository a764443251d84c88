use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use skywave_core::{
    AnalysisResult, Band, ForecastResult, IonosphereSnapshot, Location, OracleConfig,
    OracleFailure, Result, SolarSnapshot,
};

use crate::decode;
use crate::prompts;
use crate::provider::PropagationOracle;

const API_VERSION: &str = "2023-06-01";

// Answer budgets per query kind. The analysis answer carries an hourly
// forecast and is by far the largest.
const SOLAR_MAX_TOKENS: usize = 1000;
const IONOSPHERE_MAX_TOKENS: usize = 1000;
const ANALYSIS_MAX_TOKENS: usize = 2500;
const FORECAST_MAX_TOKENS: usize = 1500;

/// Client for the hosted analysis service. Each request embeds its context
/// as serialized JSON inside a natural-language prompt; the free-form answer
/// is fence-stripped and parsed as strict JSON.
///
/// The client performs no retries. Callers own the retry/fallback policy.
pub struct OracleClient {
    config: OracleConfig,
    client: Client,
}

impl OracleClient {
    pub fn new(config: OracleConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            warn!("oracle API key is empty; requests will be sent unauthenticated");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleFailure::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OracleConfig::default())
    }

    /// Issue one request and return the raw text of the answer.
    async fn send_query(&self, prompt: String, max_tokens: usize) -> Result<String> {
        let request = OracleRequest {
            model: self.config.model.clone(),
            max_tokens,
            messages: vec![OracleMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        debug!(model = %self.config.model, max_tokens, "sending oracle query");

        let mut builder = self
            .client
            .post(format!("{}/messages", self.config.base_url))
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json");
        if !self.config.api_key.is_empty() {
            builder = builder.header("x-api-key", &self.config.api_key);
        }

        let response = builder
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleFailure::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleFailure::Status(status.as_u16()).into());
        }

        let body: OracleResponse = response
            .json()
            .await
            .map_err(|e| OracleFailure::Parse(e.to_string()))?;

        let text: String = body
            .content
            .iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect();

        if text.is_empty() {
            return Err(OracleFailure::Parse("answer contained no text content".to_string()).into());
        }

        Ok(text)
    }
}

#[async_trait]
impl PropagationOracle for OracleClient {
    async fn solar_conditions(&self) -> Result<SolarSnapshot> {
        let text = self.send_query(prompts::solar_prompt(), SOLAR_MAX_TOKENS).await?;
        decode::decode_solar(&text)
    }

    async fn ionosphere_conditions(&self) -> Result<IonosphereSnapshot> {
        let text = self
            .send_query(prompts::ionosphere_prompt(), IONOSPHERE_MAX_TOKENS)
            .await?;
        decode::decode_ionosphere(&text)
    }

    async fn analyze_path(
        &self,
        band: Band,
        from: &Location,
        to: &Location,
        solar: &SolarSnapshot,
        ionosphere: &IonosphereSnapshot,
    ) -> Result<AnalysisResult> {
        let prompt = prompts::analysis_prompt(band, from, to, solar, ionosphere)?;
        let text = self.send_query(prompt, ANALYSIS_MAX_TOKENS).await?;
        // Accepted structurally; numeric ranges are not checked for this kind.
        decode::decode_json(&text)
    }

    async fn extended_forecast(
        &self,
        band: Band,
        solar: &SolarSnapshot,
        ionosphere: &IonosphereSnapshot,
    ) -> Result<ForecastResult> {
        let prompt = prompts::forecast_prompt(band, solar, ionosphere)?;
        let text = self.send_query(prompt, FORECAST_MAX_TOKENS).await?;
        decode::decode_json(&text)
    }
}

// Service request/response wire types.

#[derive(Debug, Serialize)]
struct OracleRequest {
    model: String,
    max_tokens: usize,
    messages: Vec<OracleMessage>,
}

#[derive(Debug, Serialize)]
struct OracleMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OracleResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_default_config() {
        let config = OracleConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        };
        assert!(OracleClient::new(config).is_ok());
    }

    #[test]
    fn empty_api_key_is_tolerated() {
        let config = OracleConfig {
            api_key: String::new(),
            ..Default::default()
        };
        assert!(OracleClient::new(config).is_ok());
    }
}
