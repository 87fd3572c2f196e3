use crate::{
    Config, NormalizedWeather,
    error::{FetchError, WeatherError},
    province::{Province, resolve_province},
    provider::eltiempo::ElTiempoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod eltiempo;

/// One attempt at fetching current weather for a province.
///
/// Implementations issue a single request: no retry, no timeout, no backoff.
/// Callers wanting bounded latency wrap the future themselves.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, province: Province) -> Result<NormalizedWeather, FetchError>;
}

/// Construct the el-tiempo.net provider using the configured base URL.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let base_url = config.base_url()?;
    Ok(Box::new(ElTiempoProvider::new(base_url)))
}

/// Resolve `raw` and fetch its weather. No request is made for unknown text.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    raw: &str,
) -> Result<NormalizedWeather, WeatherError> {
    let province = resolve_province(raw)?;
    Ok(provider.fetch_weather(province).await?)
}
