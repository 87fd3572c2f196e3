//! Upstream response body for `/api/json/v2/provincias/{code}`.
//!
//! The provider has served two shapes from the same endpoint:
//!
//! - flat: `{ temperatures: { max, min }, stateSky: { description } }`
//! - nested: `{ title, today: { p }, ciudades: [ { temperatures, stateSky } ] }`
//!
//! Every level is optional and a field of the wrong type reads as absent, so
//! only a missing required piece turns into "no data".

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::model::NormalizedWeather;

/// Which response shape produced the weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    Flat,
    Nested,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeatherPayload {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    today: Option<TodaySection>,
    /// Kept untyped; only the first entry is ever looked at.
    #[serde(default, deserialize_with = "lenient")]
    ciudades: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    temperatures: Option<Temperatures>,
    #[serde(default, deserialize_with = "lenient")]
    state_sky: Option<StateSky>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CityForecast {
    #[serde(default, deserialize_with = "lenient")]
    temperatures: Option<Temperatures>,
    #[serde(default, deserialize_with = "lenient")]
    state_sky: Option<StateSky>,
}

#[derive(Debug, Default, Deserialize)]
struct Temperatures {
    #[serde(default, deserialize_with = "lenient")]
    max: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    min: Option<Reading>,
}

#[derive(Debug, Default, Deserialize)]
struct StateSky {
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TodaySection {
    #[serde(default, deserialize_with = "lenient")]
    p: Option<String>,
}

/// The live service sends temperatures as strings ("30"), older fixtures as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Reading {
    Number(f64),
    Text(String),
}

/// A field of the wrong type reads as absent instead of failing the whole body.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl Reading {
    fn celsius(&self) -> Option<f64> {
        let value = match self {
            Reading::Number(n) => *n,
            Reading::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

struct Conditions {
    temp_max: f64,
    temp_min: f64,
    description: String,
}

impl Conditions {
    fn extract(temperatures: Option<&Temperatures>, sky: Option<&StateSky>) -> Option<Self> {
        let temperatures = temperatures?;
        let temp_max = temperatures.max.as_ref()?.celsius()?;
        let temp_min = temperatures.min.as_ref()?.celsius()?;

        let description = sky?.description.as_deref()?.trim();
        if description.is_empty() {
            return None;
        }

        Some(Self { temp_max, temp_min, description: description.to_lowercase() })
    }
}

impl RawWeatherPayload {
    /// Parse a response body. `None` when it cannot be read as an object at all;
    /// fields of the wrong type inside it are treated as missing.
    pub fn from_body(body: &str) -> Option<Self> {
        match serde_json::from_str(body) {
            Ok(payload) => Some(payload),
            Err(err) => {
                debug!(error = %err, "response body does not match any known schema");
                None
            }
        }
    }

    fn conditions(&self) -> Option<(SchemaVariant, Conditions)> {
        let nested = self
            .ciudades
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|first| CityForecast::deserialize(first).ok())
            .and_then(|city| {
                Conditions::extract(city.temperatures.as_ref(), city.state_sky.as_ref())
            });

        if let Some(c) = nested {
            return Some((SchemaVariant::Nested, c));
        }

        Conditions::extract(self.temperatures.as_ref(), self.state_sky.as_ref())
            .map(|c| (SchemaVariant::Flat, c))
    }

    /// Shape that would be used by [`RawWeatherPayload::normalize`], if any.
    pub fn variant(&self) -> Option<SchemaVariant> {
        self.conditions().map(|(v, _)| v)
    }

    pub fn normalize(&self) -> Option<NormalizedWeather> {
        let (variant, c) = self.conditions()?;
        debug!(?variant, "normalized weather payload");

        Some(NormalizedWeather {
            temp_max: c.temp_max,
            temp_min: c.temp_min,
            description: c.description,
            title: non_blank(self.title.as_deref()),
            today_precipitation: non_blank(self.today.as_ref().and_then(|t| t.p.as_deref())),
        })
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
