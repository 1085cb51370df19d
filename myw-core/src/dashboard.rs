use std::sync::Arc;
use tracing::debug;

use crate::{
    location::LocationResolver,
    model::{ForecastSnapshot, WeatherSnapshot},
    provider::WeatherSource,
    router::{Route, Router},
    screen::Screen,
    theme::ThemeResult,
};

/// The two screens and the router that picks between them.
///
/// Leaving a screen tears it down; entering one starts a fresh resolve → fetch cycle,
/// so the forecast screen never reuses what home fetched and vice versa.
#[derive(Debug)]
pub struct Dashboard {
    router: Router,
    home: Screen<WeatherSnapshot>,
    forecast: Screen<ForecastSnapshot>,
}

impl Dashboard {
    pub fn new(resolver: LocationResolver, source: Arc<dyn WeatherSource>) -> Self {
        let resolver = Arc::new(resolver);
        Self {
            router: Router::new(),
            home: Screen::new(Arc::clone(&resolver), Arc::clone(&source)),
            forecast: Screen::new(resolver, source),
        }
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn home(&self) -> &Screen<WeatherSnapshot> {
        &self.home
    }

    pub fn forecast(&self) -> &Screen<ForecastSnapshot> {
        &self.forecast
    }

    /// Mount whichever screen is active.
    pub async fn start(&self) {
        match self.router.current() {
            Route::Home => self.home.mount().await,
            Route::Forecast => self.forecast.mount().await,
        }
    }

    pub async fn navigate(&mut self, route: Route) {
        let from = self.router.current();
        if !self.router.navigate(route) {
            return;
        }
        debug!(from = from.as_str(), to = route.as_str(), "Switching screen");

        match from {
            Route::Home => self.home.teardown(),
            Route::Forecast => self.forecast.teardown(),
        }
        self.start().await;
    }

    pub async fn back(&mut self) {
        self.navigate(Route::Home).await;
    }

    /// Theme for the active screen. The forecast screen has a fixed backdrop.
    pub fn theme(&self) -> ThemeResult {
        match self.router.current() {
            Route::Home => ThemeResult::for_snapshot(self.home.state().snapshot()),
            Route::Forecast => ThemeResult::default(),
        }
    }
}
