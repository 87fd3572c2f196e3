//! Core library for the `clima` CLI.
//!
//! This crate defines:
//! - The table of Andalusian provinces and their provider codes
//! - Fetching and normalizing weather from the el-tiempo.net service
//! - Icon mapping and the screen state used by front ends
//! - Configuration handling
//!
//! It is used by `clima-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod payload;
pub mod province;
pub mod provider;
pub mod screen;

pub use config::Config;
pub use error::{FetchError, WeatherError};
pub use icon::{IconKey, icon_for};
pub use model::{NormalizedWeather, WeatherQuery};
pub use payload::{RawWeatherPayload, SchemaVariant};
pub use province::{Province, UnknownProvince, resolve_province};
pub use provider::{WeatherProvider, eltiempo::ElTiempoProvider, lookup, provider_from_config};
pub use screen::{ScreenState, SearchRejected, SearchTicket, WeatherScreen};
