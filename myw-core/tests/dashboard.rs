//! Screen and dashboard orchestration against in-memory collaborators.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{Days, Local};
use myw_core::{
    Coordinates, DayForecast, Dashboard, Effect, FetchError, FetchState, ForecastSnapshot,
    Gradient, LocationError, LocationQuery, LocationResolver, PositionOptions, PositionSource,
    Route, Screen, ThemeResult, WeatherSnapshot, WeatherSource,
};

#[derive(Debug)]
struct FakePosition(Result<Coordinates, LocationError>);

#[async_trait]
impl PositionSource for FakePosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, LocationError> {
        self.0.clone()
    }
}

#[derive(Debug)]
struct HangingPosition;

#[async_trait]
impl PositionSource for HangingPosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, LocationError> {
        std::future::pending().await
    }
}

/// Answers by query text: "Atlantis" is unknown, "Offline" fails in transit,
/// anything else succeeds. Coordinates resolve to "Here".
#[derive(Debug, Default)]
struct FakeWeather {
    conditions: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeWeather {
    fn with_condition(mut self, city: &str, text: &str) -> Self {
        self.conditions.insert(city.to_string(), text.to_string());
        self
    }

    fn with_delay(mut self, city: &str, delay: Duration) -> Self {
        self.delays.insert(city.to_string(), delay);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, kind: &str, query: &LocationQuery) -> Result<String, FetchError> {
        let name = match query {
            LocationQuery::Coordinates(_) => "Here".to_string(),
            LocationQuery::CityName(city) => city.clone(),
        };
        self.calls.lock().unwrap().push(format!("{kind}:{name}"));

        if let Some(delay) = self.delays.get(&name) {
            tokio::time::sleep(*delay).await;
        }

        match name.as_str() {
            "Atlantis" => Err(FetchError::SourceNotFound { status: 400 }),
            "Offline" => Err(FetchError::Transient("connection reset".into())),
            _ => Ok(name),
        }
    }
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn fetch_current(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError> {
        let name = self.answer("current", query).await?;
        let condition = self.conditions.get(&name).cloned().unwrap_or_else(|| "Sunny".into());

        Ok(WeatherSnapshot {
            location_name: name,
            country_name: "Austria".into(),
            temperature_c: 15.0,
            feels_like_c: 14.0,
            humidity_pct: 60,
            pressure_hpa: 1015.0,
            wind_kph: 8.0,
            visibility_km: 10.0,
            condition_text: condition,
            condition_icon_ref: "//cdn.weatherapi.com/weather/64x64/day/113.png".into(),
            is_daytime: true,
        })
    }

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        days: u8,
    ) -> Result<ForecastSnapshot, FetchError> {
        let name = self.answer("forecast", query).await?;
        let today = Local::now().date_naive();

        let days_list = (0..u64::from(days))
            .map(|offset| DayForecast {
                date: today + Days::new(offset),
                condition_text: "Partly cloudy".into(),
                condition_icon_ref: "//cdn.weatherapi.com/weather/64x64/day/116.png".into(),
                max_temp_c: 20.0,
                min_temp_c: 9.0,
                rain_chance_pct: 10,
                max_wind_kph: 12.0,
                avg_humidity_pct: 55,
            })
            .collect();

        ForecastSnapshot::new(name, "Austria".into(), days_list, usize::from(days))
    }
}

fn resolver(position: impl PositionSource + 'static) -> LocationResolver {
    LocationResolver::new(Some(Arc::new(position)), PositionOptions::default())
}

fn located() -> LocationResolver {
    resolver(FakePosition(Ok(Coordinates::new(47.8, 13.04))))
}

fn home_screen(weather: Arc<FakeWeather>, resolver: LocationResolver) -> Screen<WeatherSnapshot> {
    Screen::new(Arc::new(resolver), weather)
}

fn shown_location(state: &FetchState<WeatherSnapshot>) -> Option<&str> {
    state.snapshot().map(|s| s.location_name.as_str())
}

#[tokio::test]
async fn mount_fetches_for_device_position() {
    let weather = Arc::new(FakeWeather::default());
    let screen = home_screen(Arc::clone(&weather), located());

    screen.mount().await;

    assert_eq!(shown_location(&screen.state()), Some("Here"));
    assert_eq!(screen.last_query(), Some(LocationQuery::coordinates(47.8, 13.04)));
    assert_eq!(weather.calls(), vec!["current:Here"]);
}

#[tokio::test]
async fn mount_is_a_noop_once_loaded() {
    let weather = Arc::new(FakeWeather::default());
    let screen = home_screen(Arc::clone(&weather), located());

    screen.mount().await;
    screen.mount().await;

    assert_eq!(weather.calls().len(), 1);
}

#[tokio::test]
async fn denied_location_uses_fallback_city_silently() {
    let weather = Arc::new(FakeWeather::default());
    let screen = home_screen(
        Arc::clone(&weather),
        resolver(FakePosition(Err(LocationError::Denied("blocked".into())))),
    );

    screen.mount().await;

    assert_eq!(shown_location(&screen.state()), Some("Salzburg"));
    assert_eq!(screen.error_message(), None);
}

#[tokio::test(start_paused = true)]
async fn hanging_location_falls_back_after_timeout() {
    let weather = Arc::new(FakeWeather::default());
    let screen = home_screen(Arc::clone(&weather), resolver(HangingPosition));

    screen.mount().await;

    assert_eq!(shown_location(&screen.state()), Some("Salzburg"));
    assert_eq!(weather.calls(), vec!["current:Salzburg"]);
}

#[tokio::test]
async fn unknown_city_shows_error_and_retry_repeats_query() {
    let weather = Arc::new(FakeWeather::default());
    let screen = home_screen(Arc::clone(&weather), located());

    assert!(screen.search("  Atlantis ").await);
    assert_eq!(screen.state(), FetchState::Failed(FetchError::SourceNotFound { status: 400 }));
    assert_eq!(screen.error_message(), Some("City not found. Please try a different city."));

    screen.retry().await;

    assert_eq!(weather.calls(), vec!["current:Atlantis", "current:Atlantis"]);
}

#[tokio::test]
async fn transient_failure_message() {
    let weather = Arc::new(FakeWeather::default());
    let screen = home_screen(weather, located());

    screen.search("Offline").await;

    assert_eq!(screen.error_message(), Some("Failed to fetch weather data. Please try again."));
}

#[tokio::test]
async fn retry_without_query_resolves_location() {
    let weather = Arc::new(FakeWeather::default());
    let screen = home_screen(Arc::clone(&weather), located());

    screen.retry().await;

    assert_eq!(weather.calls(), vec!["current:Here"]);
}

#[tokio::test]
async fn blank_search_is_ignored() {
    let weather = Arc::new(FakeWeather::default());
    let screen = home_screen(Arc::clone(&weather), located());

    assert!(!screen.search("   ").await);

    assert_eq!(screen.state(), FetchState::Idle);
    assert!(weather.calls().is_empty());
}

#[tokio::test]
async fn ready_failed_ready_shows_only_latest_snapshot() {
    let weather = Arc::new(FakeWeather::default().with_condition("Vienna", "Overcast"));
    let screen = home_screen(weather, located());

    screen.search("Linz").await;
    assert_eq!(shown_location(&screen.state()), Some("Linz"));

    screen.search("Atlantis").await;
    assert_eq!(screen.state().snapshot(), None);

    screen.search("Vienna").await;
    let state = screen.state();
    let snapshot = state.snapshot().expect("ready");
    assert_eq!(snapshot.location_name, "Vienna");
    assert_eq!(snapshot.condition_text, "Overcast");
    assert_eq!(screen.error_message(), None);
}

#[tokio::test(start_paused = true)]
async fn late_response_does_not_overwrite_newer_search() {
    let weather = Arc::new(FakeWeather::default().with_delay("Graz", Duration::from_millis(800)));
    let screen = home_screen(Arc::clone(&weather), located());

    tokio::join!(screen.search("Graz"), screen.search("Innsbruck"));

    assert_eq!(shown_location(&screen.state()), Some("Innsbruck"));
    assert_eq!(screen.last_query(), Some(LocationQuery::city("Innsbruck")));
    assert_eq!(weather.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn slow_newest_search_still_wins() {
    let weather = Arc::new(FakeWeather::default().with_delay("Graz", Duration::from_millis(800)));
    let screen = home_screen(weather, located());

    tokio::join!(screen.search("Innsbruck"), screen.search("Graz"));

    assert_eq!(shown_location(&screen.state()), Some("Graz"));
}

#[tokio::test]
async fn dashboard_starts_on_home() {
    let weather = Arc::new(FakeWeather::default());
    let dashboard = Dashboard::new(located(), weather);

    dashboard.start().await;

    assert_eq!(dashboard.route(), Route::Home);
    assert_eq!(shown_location(&dashboard.home().state()), Some("Here"));
    assert_eq!(dashboard.forecast().state(), FetchState::Idle);
}

#[tokio::test]
async fn forecast_screen_fetches_independently() {
    let weather = Arc::new(FakeWeather::default());
    let mut dashboard = Dashboard::new(located(), Arc::clone(&weather) as Arc<dyn WeatherSource>);

    dashboard.start().await;
    dashboard.home().search("Vienna").await;
    dashboard.navigate(Route::Forecast).await;

    assert_eq!(dashboard.route(), Route::Forecast);
    assert_eq!(dashboard.home().state(), FetchState::Idle);

    let state = dashboard.forecast().state();
    let forecast = state.snapshot().expect("forecast ready");
    assert_eq!(forecast.location_name, "Here");
    assert_eq!(forecast.days().len(), 3);
    assert_eq!(forecast.days()[0].date, Local::now().date_naive());
    assert!(forecast.days().windows(2).all(|w| w[0].date <= w[1].date));

    assert_eq!(weather.calls(), vec!["current:Here", "current:Vienna", "forecast:Here"]);
}

#[tokio::test]
async fn back_from_forecast_refetches_home() {
    let weather = Arc::new(FakeWeather::default());
    let mut dashboard = Dashboard::new(located(), Arc::clone(&weather) as Arc<dyn WeatherSource>);

    dashboard.start().await;
    dashboard.navigate(Route::Forecast).await;
    dashboard.back().await;

    assert_eq!(dashboard.route(), Route::Home);
    assert_eq!(dashboard.forecast().state(), FetchState::Idle);
    assert_eq!(weather.calls(), vec!["current:Here", "forecast:Here", "current:Here"]);
}

#[tokio::test]
async fn navigating_to_current_route_does_nothing() {
    let weather = Arc::new(FakeWeather::default());
    let mut dashboard = Dashboard::new(located(), Arc::clone(&weather) as Arc<dyn WeatherSource>);

    dashboard.start().await;
    dashboard.navigate(Route::Home).await;

    assert_eq!(weather.calls().len(), 1);
}

#[tokio::test]
async fn forecast_failure_message() {
    let weather = Arc::new(FakeWeather::default());
    let mut dashboard = Dashboard::new(
        resolver(FakePosition(Err(LocationError::Unsupported))),
        weather,
    );

    dashboard.navigate(Route::Forecast).await;
    dashboard.forecast().search("Atlantis").await;

    assert_eq!(
        dashboard.forecast().error_message(),
        Some("Failed to fetch forecast data. Please try again.")
    );
}

#[tokio::test]
async fn theme_follows_home_snapshot() {
    let weather = Arc::new(
        FakeWeather::default()
            .with_condition("Bergen", "Light snow showers")
            .with_condition("Oslo", "Heavy snow"),
    );
    let mut dashboard = Dashboard::new(located(), weather);

    assert_eq!(dashboard.theme(), ThemeResult::default());

    dashboard.home().search("Bergen").await;
    assert_eq!(dashboard.theme(), ThemeResult { gradient: Gradient::Rain, effect: Effect::Rain });

    dashboard.home().search("Oslo").await;
    assert_eq!(dashboard.theme().effect, Effect::Snow);

    dashboard.navigate(Route::Forecast).await;
    assert_eq!(dashboard.theme(), ThemeResult::default());
}
