use crate::{
    Config,
    error::FetchError,
    model::{ForecastSnapshot, LocationQuery, WeatherSnapshot},
    provider::weatherapi::WeatherApiClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// Number of days the forecast screen asks for.
pub const FORECAST_DAYS: u8 = 3;

/// The weather data source. Implementations do not retry; callers re-invoke.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError>;

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        days: u8,
    ) -> Result<ForecastSnapshot, FetchError>;
}

/// Construct the WeatherAPI.com source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherSource>> {
    let api_key = config.api_key()?;
    let client = WeatherApiClient::from_config(api_key.to_owned(), &config.weather)?;
    Ok(Arc::new(client))
}
