use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FetchError;

/// Geographic position reported by a position source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// What a single fetch attempt asks the weather source for.
///
/// The weather API accepts both forms in the same `q` parameter, see the
/// [`fmt::Display`] impl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationQuery {
    Coordinates(Coordinates),
    CityName(String),
}

impl LocationQuery {
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates(Coordinates::new(latitude, longitude))
    }

    pub fn city(name: impl Into<String>) -> Self {
        Self::CityName(name.into())
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Coordinates(c) => write!(f, "{},{}", c.latitude, c.longitude),
            LocationQuery::CityName(name) => f.write_str(name),
        }
    }
}

/// Current conditions at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_kph: f64,
    pub visibility_km: f64,
    pub condition_text: String,
    pub condition_icon_ref: String,
    pub is_daytime: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub condition_text: String,
    pub condition_icon_ref: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub rain_chance_pct: u8,
    pub max_wind_kph: f64,
    pub avg_humidity_pct: u8,
}

/// Multi-day forecast. `days` has the requested length and never goes back in date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSnapshot {
    pub location_name: String,
    pub country_name: String,
    days: Vec<DayForecast>,
}

impl ForecastSnapshot {
    /// Builds a forecast, rejecting day lists of the wrong length or out of date order.
    pub fn new(
        location_name: String,
        country_name: String,
        days: Vec<DayForecast>,
        expected_days: usize,
    ) -> Result<Self, FetchError> {
        if days.len() != expected_days {
            return Err(FetchError::Transient(format!(
                "forecast contained {} days, expected {expected_days}",
                days.len()
            )));
        }

        if days.windows(2).any(|pair| pair[1].date < pair[0].date) {
            return Err(FetchError::Transient(
                "forecast days are not in chronological order".to_string(),
            ));
        }

        Ok(Self { location_name, country_name, days })
    }

    pub fn days(&self) -> &[DayForecast] {
        &self.days
    }
}
