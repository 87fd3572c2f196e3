use thiserror::Error;

use crate::province::UnknownProvince;

/// Outcome of a failed fetch. Both variants are recoverable by retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure or a non-success HTTP status.
    #[error("Weather service request failed: {0}")]
    NetworkOrServer(String),

    /// The service answered, but the body carried no usable weather.
    #[error("No weather data in response for province code {code}")]
    NoData { code: String },
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::NetworkOrServer(_) => {
                "Hubo un problema al obtener el clima. Inténtelo de nuevo"
            }
            FetchError::NoData { .. } => "No se encontraron datos de clima para esta provincia.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error(transparent)]
    InvalidProvince(#[from] UnknownProvince),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::InvalidProvince(e) => e.user_message(),
            WeatherError::Fetch(e) => e.user_message(),
        }
    }
}
