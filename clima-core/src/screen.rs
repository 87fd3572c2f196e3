//! Presentation-side state for the weather screen.
//!
//! The fetch pipeline is stateless; whatever shows the result owns one
//! [`WeatherScreen`] and drives it through `begin` / `finish`.

use thiserror::Error;
use tracing::debug;

use crate::{
    error::{FetchError, WeatherError},
    model::{NormalizedWeather, WeatherQuery},
    province::{Province, UnknownProvince},
    provider::WeatherProvider,
};

/// Identifies one request started by [`WeatherScreen::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    pub province: Province,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenState {
    #[default]
    Idle,
    Loading(SearchTicket),
    Loaded { province: Province, weather: NormalizedWeather },
    Failed(WeatherError),
}

/// Why a search did not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchRejected {
    #[error("A weather request is already in flight")]
    Busy,

    #[error(transparent)]
    InvalidProvince(#[from] UnknownProvince),
}

#[derive(Debug, Default)]
pub struct WeatherScreen {
    query: WeatherQuery,
    state: ScreenState,
    generation: u64,
}

impl WeatherScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = WeatherQuery::new(text);
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ScreenState::Loading(_))
    }

    pub fn weather(&self) -> Option<&NormalizedWeather> {
        match &self.state {
            ScreenState::Loaded { weather, .. } => Some(weather),
            _ => None,
        }
    }

    /// Validate the query and move to `Loading`.
    ///
    /// An unknown province leaves the screen in `Failed` with no request to make.
    pub fn begin(&mut self) -> Result<SearchTicket, SearchRejected> {
        if self.is_busy() {
            return Err(SearchRejected::Busy);
        }

        match self.query.resolve() {
            Ok(province) => {
                self.generation += 1;
                let ticket = SearchTicket { province, generation: self.generation };
                self.state = ScreenState::Loading(ticket);
                Ok(ticket)
            }
            Err(err) => {
                self.state = ScreenState::Failed(WeatherError::InvalidProvince(err.clone()));
                Err(err.into())
            }
        }
    }

    /// Apply the outcome of the request `ticket` was issued for.
    ///
    /// Returns `false`, leaving the state alone, when that request is no longer
    /// the one in flight.
    pub fn finish(
        &mut self,
        ticket: SearchTicket,
        result: Result<NormalizedWeather, FetchError>,
    ) -> bool {
        if self.state != ScreenState::Loading(ticket) {
            debug!(province = %ticket.province, "discarding stale weather result");
            return false;
        }

        self.state = match result {
            Ok(weather) => ScreenState::Loaded { province: ticket.province, weather },
            Err(err) => ScreenState::Failed(err.into()),
        };
        true
    }

    /// Forget any result and stop waiting for an in-flight request.
    pub fn reset(&mut self) {
        self.state = ScreenState::Idle;
    }

    /// Run a full search for the current query.
    pub async fn search(&mut self, provider: &dyn WeatherProvider) -> &ScreenState {
        match self.begin() {
            Ok(ticket) => {
                let result = provider.fetch_weather(ticket.province).await;
                self.finish(ticket, result);
            }
            Err(rejected) => debug!(%rejected, "search not started"),
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::tests::{FakeProvider, sunny};

    #[tokio::test]
    async fn successful_search_loads_weather() {
        let fake = FakeProvider::new(Ok(sunny()));
        let mut screen = WeatherScreen::new();
        screen.set_query(" Sevilla ");

        let state = screen.search(&fake).await.clone();
        assert_eq!(state, ScreenState::Loaded { province: Province::Sevilla, weather: sunny() });
        assert_eq!(screen.weather(), Some(&sunny()));
        assert!(!screen.is_busy());
    }

    #[tokio::test]
    async fn invalid_province_fails_without_request_and_clears_result() {
        let fake = FakeProvider::new(Ok(sunny()));
        let mut screen = WeatherScreen::new();
        screen.set_query("Granada");
        screen.search(&fake).await;
        assert!(screen.weather().is_some());

        screen.set_query("granada");
        let state = screen.search(&fake).await;
        assert!(matches!(state, ScreenState::Failed(WeatherError::InvalidProvince(_))));
        assert!(screen.weather().is_none());
        assert_eq!(fake.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_clears_previous_weather() {
        let ok = FakeProvider::new(Ok(sunny()));
        let down = FakeProvider::new(Err(FetchError::NetworkOrServer("connection refused".into())));
        let mut screen = WeatherScreen::new();
        screen.set_query("Huelva");

        screen.search(&ok).await;
        let state = screen.search(&down).await;

        assert_eq!(
            *state,
            ScreenState::Failed(WeatherError::Fetch(FetchError::NetworkOrServer(
                "connection refused".into()
            )))
        );
        assert!(screen.weather().is_none());
    }

    #[test]
    fn begin_is_rejected_while_loading() {
        let mut screen = WeatherScreen::new();
        screen.set_query("Cádiz");

        let ticket = screen.begin().unwrap();
        assert_eq!(ticket.province, Province::Cadiz);
        assert!(screen.is_busy());
        assert_eq!(screen.begin(), Err(SearchRejected::Busy));
        assert_eq!(*screen.state(), ScreenState::Loading(ticket));
    }

    #[test]
    fn result_after_reset_is_discarded() {
        let mut screen = WeatherScreen::new();
        screen.set_query("Córdoba");
        let ticket = screen.begin().unwrap();
        screen.reset();

        assert!(!screen.finish(ticket, Ok(sunny())));
        assert_eq!(*screen.state(), ScreenState::Idle);
    }

    #[test]
    fn abandoned_result_does_not_fill_a_newer_request() {
        let mut screen = WeatherScreen::new();
        screen.set_query("Sevilla");
        let abandoned = screen.begin().unwrap();
        screen.reset();

        screen.set_query("Cádiz");
        let current = screen.begin().unwrap();
        assert_ne!(abandoned, current);

        assert!(!screen.finish(abandoned, Ok(sunny())));
        assert_eq!(*screen.state(), ScreenState::Loading(current));

        let rainy = NormalizedWeather { description: "lluvioso".into(), ..sunny() };
        assert!(screen.finish(current, Ok(rainy.clone())));
        let expected = ScreenState::Loaded { province: Province::Cadiz, weather: rainy };
        assert_eq!(*screen.state(), expected);
    }

    #[test]
    fn same_province_gets_a_fresh_ticket() {
        let mut screen = WeatherScreen::new();
        screen.set_query("Granada");
        let first = screen.begin().unwrap();
        screen.reset();
        let second = screen.begin().unwrap();

        assert_eq!(first.province, second.province);
        assert_ne!(first, second);
        assert!(!screen.finish(first, Err(FetchError::NoData { code: "18".into() })));
        assert!(screen.is_busy());
    }

    #[test]
    fn no_data_is_a_failed_state() {
        let mut screen = WeatherScreen::new();
        screen.set_query("Almería");
        let ticket = screen.begin().unwrap();

        assert!(screen.finish(ticket, Err(FetchError::NoData { code: "04".into() })));
        match screen.state() {
            ScreenState::Failed(err) => {
                assert!(matches!(err, WeatherError::Fetch(FetchError::NoData { .. })));
                assert!(err.user_message().starts_with("No se encontraron datos"));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }
}
