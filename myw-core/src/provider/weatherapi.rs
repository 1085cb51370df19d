use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::WeatherApiConfig,
    error::FetchError,
    model::{DayForecast, ForecastSnapshot, LocationQuery, WeatherSnapshot},
};

use super::WeatherSource;

/// Client for the WeatherAPI.com `current.json` and `forecast.json` endpoints.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn from_config(api_key: String, cfg: &WeatherApiConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("Failed to build HTTP client for WeatherAPI.com")?;

        Ok(Self { api_key, base_url: cfg.base_url.trim_end_matches('/').to_string(), http })
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, "Requesting WeatherAPI.com");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            debug!(%status, body = %truncate_body(&body), "WeatherAPI.com rejected request");
            return Err(FetchError::SourceNotFound { status: status.as_u16() });
        }

        Ok(res.text().await?)
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    pressure_mb: f64,
    wind_kph: f64,
    vis_km: f64,
    is_day: u8,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    maxwind_kph: f64,
    avghumidity: f64,
    daily_chance_of_rain: u8,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    forecast: WaForecast,
}

impl From<WaResponse> for WeatherSnapshot {
    fn from(parsed: WaResponse) -> Self {
        WeatherSnapshot {
            location_name: parsed.location.name,
            country_name: parsed.location.country,
            temperature_c: parsed.current.temp_c,
            feels_like_c: parsed.current.feelslike_c,
            humidity_pct: parsed.current.humidity,
            pressure_hpa: parsed.current.pressure_mb,
            wind_kph: parsed.current.wind_kph,
            visibility_km: parsed.current.vis_km,
            condition_text: parsed.current.condition.text,
            condition_icon_ref: parsed.current.condition.icon,
            is_daytime: parsed.current.is_day == 1,
        }
    }
}

impl From<WaForecastDay> for DayForecast {
    fn from(entry: WaForecastDay) -> Self {
        DayForecast {
            date: entry.date,
            condition_text: entry.day.condition.text,
            condition_icon_ref: entry.day.condition.icon,
            max_temp_c: entry.day.maxtemp_c,
            min_temp_c: entry.day.mintemp_c,
            rain_chance_pct: entry.day.daily_chance_of_rain,
            max_wind_kph: entry.day.maxwind_kph,
            avg_humidity_pct: entry.day.avghumidity.round().clamp(0.0, 100.0) as u8,
        }
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    #[instrument(skip(self), fields(q = %query))]
    async fn fetch_current(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError> {
        let q = query.to_string();
        let body = self.get("current.json", &[("q", q.as_str()), ("aqi", "no")]).await?;

        let parsed: WaResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }

    #[instrument(skip(self), fields(q = %query))]
    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        days: u8,
    ) -> Result<ForecastSnapshot, FetchError> {
        let q = query.to_string();
        let days_param = days.to_string();
        let body = self
            .get(
                "forecast.json",
                &[("q", q.as_str()), ("days", days_param.as_str()), ("aqi", "no"), ("alerts", "no")],
            )
            .await?;

        let parsed: WaForecastResponse = serde_json::from_str(&body)?;

        ForecastSnapshot::new(
            parsed.location.name,
            parsed.location.country,
            parsed.forecast.forecastday.into_iter().map(DayForecast::from).collect(),
            usize::from(days),
        )
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
