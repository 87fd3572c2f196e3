use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    error::FetchError, model::NormalizedWeather, payload::RawWeatherPayload, province::Province,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://www.el-tiempo.net";

/// Client for the el-tiempo.net province endpoint.
#[derive(Debug, Clone)]
pub struct ElTiempoProvider {
    base_url: String,
    http: Client,
}

impl ElTiempoProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http }
    }

    pub fn province_url(&self, province: Province) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/api/json/v2/provincias/{}", province.code())
    }
}

#[async_trait]
impl WeatherProvider for ElTiempoProvider {
    #[instrument(skip(self), fields(code = province.code()))]
    async fn fetch_weather(&self, province: Province) -> Result<NormalizedWeather, FetchError> {
        let url = self.province_url(province);
        debug!(%url, "requesting province weather");

        let res = self.http.get(&url).send().await.map_err(|err| {
            warn!(error = %err, "weather request failed");
            FetchError::NetworkOrServer(format!("failed to reach {url}: {err}"))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            warn!(error = %err, "failed to read weather response body");
            FetchError::NetworkOrServer(format!("failed to read response body: {err}"))
        })?;

        if !status.is_success() {
            warn!(%status, "weather service returned an error status");
            return Err(FetchError::NetworkOrServer(format!(
                "status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        RawWeatherPayload::from_body(&body)
            .and_then(|payload| payload.normalize())
            .ok_or_else(|| {
                debug!(body = %truncate_body(&body), "response carried no usable weather");
                FetchError::NoData { code: province.code().to_string() }
            })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
