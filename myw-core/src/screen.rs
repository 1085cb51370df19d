//! One screen's resolve → fetch cycles.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use crate::{
    error::FetchError,
    location::LocationResolver,
    model::{ForecastSnapshot, LocationQuery, WeatherSnapshot},
    provider::{FORECAST_DAYS, WeatherSource},
    router::Route,
    view::{FetchState, RequestToken, ViewState},
};

/// Data a screen fetches for itself.
#[async_trait]
pub trait Snapshot: Clone + Send + Sync + 'static {
    const ROUTE: Route;

    async fn fetch(source: &dyn WeatherSource, query: &LocationQuery) -> Result<Self, FetchError>;

    /// Text for the inline error panel.
    fn error_message(err: &FetchError) -> &'static str;
}

#[async_trait]
impl Snapshot for WeatherSnapshot {
    const ROUTE: Route = Route::Home;

    async fn fetch(source: &dyn WeatherSource, query: &LocationQuery) -> Result<Self, FetchError> {
        source.fetch_current(query).await
    }

    fn error_message(err: &FetchError) -> &'static str {
        match err {
            FetchError::SourceNotFound { .. } => "City not found. Please try a different city.",
            FetchError::Transient(_) => "Failed to fetch weather data. Please try again.",
        }
    }
}

#[async_trait]
impl Snapshot for ForecastSnapshot {
    const ROUTE: Route = Route::Forecast;

    async fn fetch(source: &dyn WeatherSource, query: &LocationQuery) -> Result<Self, FetchError> {
        source.fetch_forecast(query, FORECAST_DAYS).await
    }

    fn error_message(_err: &FetchError) -> &'static str {
        "Failed to fetch forecast data. Please try again."
    }
}

/// A screen: its view state plus the collaborators that feed it.
///
/// Cloned handles share the same state, so overlapping cycles can be driven from
/// several tasks; the latest cycle started is the one whose result is shown.
#[derive(Debug)]
pub struct Screen<T> {
    resolver: Arc<LocationResolver>,
    source: Arc<dyn WeatherSource>,
    view: Arc<Mutex<ViewState<T>>>,
}

impl<T> Clone for Screen<T> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            source: Arc::clone(&self.source),
            view: Arc::clone(&self.view),
        }
    }
}

impl<T: Snapshot> Screen<T> {
    pub fn new(resolver: Arc<LocationResolver>, source: Arc<dyn WeatherSource>) -> Self {
        Self { resolver, source, view: Arc::new(Mutex::new(ViewState::new())) }
    }

    pub fn route(&self) -> Route {
        T::ROUTE
    }

    pub fn state(&self) -> FetchState<T> {
        self.view.lock().state().clone()
    }

    pub fn last_query(&self) -> Option<LocationQuery> {
        self.view.lock().last_query().cloned()
    }

    /// Error panel text when the screen is in `Failed`.
    pub fn error_message(&self) -> Option<&'static str> {
        self.view.lock().state().error().map(T::error_message)
    }

    /// First cycle after the screen is shown. Does nothing unless the screen is idle.
    pub async fn mount(&self) {
        let idle = matches!(self.view.lock().state(), FetchState::Idle);
        if idle {
            self.locate().await;
        }
    }

    /// Resolve the device location (or fallback city) and fetch for it.
    pub async fn locate(&self) {
        let token = self.view.lock().begin();
        let query = self.resolver.resolve().await;

        let recorded = self.view.lock().record_query(token, query.clone());
        if !recorded {
            debug!(route = T::ROUTE.as_str(), "Cycle superseded while resolving location");
            return;
        }

        self.load(token, query).await;
    }

    /// Fetch for a user-entered city. Blank input is ignored and returns false.
    pub async fn search(&self, city: &str) -> bool {
        let city = city.trim();
        if city.is_empty() {
            return false;
        }
        self.start_with(LocationQuery::city(city)).await;
        true
    }

    /// Fetch again for the last query; with no query yet this re-runs resolution.
    pub async fn retry(&self) {
        let last = self.last_query();
        match last {
            Some(query) => self.start_with(query).await,
            None => self.locate().await,
        }
    }

    /// Screen teardown. Any cycle still in flight will be discarded.
    pub fn teardown(&self) {
        self.view.lock().reset();
    }

    async fn start_with(&self, query: LocationQuery) {
        let token = {
            let mut view = self.view.lock();
            let token = view.begin();
            view.record_query(token, query.clone());
            token
        };
        self.load(token, query).await;
    }

    async fn load(&self, token: RequestToken, query: LocationQuery) {
        let result = T::fetch(self.source.as_ref(), &query).await;

        let applied = self.view.lock().apply(token, result);
        if !applied {
            debug!(route = T::ROUTE.as_str(), q = %query, "Discarding stale response");
        }
    }
}
