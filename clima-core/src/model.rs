use serde::{Deserialize, Serialize};

use crate::{
    icon::{IconKey, icon_for},
    province::{Province, UnknownProvince, resolve_province},
};

/// Province name exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeatherQuery {
    raw: String,
}

impl WeatherQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn resolve(&self) -> Result<Province, UnknownProvince> {
        resolve_province(&self.raw)
    }
}

/// Weather for one province, independent of the upstream response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeather {
    pub temp_max: f64,
    pub temp_min: f64,
    /// Always lowercase.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_precipitation: Option<String>,
}

impl NormalizedWeather {
    pub fn icon(&self) -> IconKey {
        icon_for(&self.description)
    }
}
