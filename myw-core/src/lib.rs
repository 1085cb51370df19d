//! Core library for the `myw` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location resolution with a fixed fallback city
//! - The WeatherAPI.com client behind the [`WeatherSource`] trait
//! - Condition → theme classification
//! - Per-screen view state and routing between the home and forecast screens
//!
//! It is used by `myw-cli`, but any front-end can drive a [`Dashboard`].

pub mod config;
pub mod dashboard;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod router;
pub mod screen;
pub mod theme;
pub mod view;

pub use config::{Config, LocationConfig, WeatherApiConfig};
pub use dashboard::Dashboard;
pub use error::{FetchError, LocationError};
pub use location::{
    FALLBACK_CITY, IpPositionSource, LOCATION_TIMEOUT, LocationResolver, PositionOptions,
    PositionSource,
};
pub use model::{Coordinates, DayForecast, ForecastSnapshot, LocationQuery, WeatherSnapshot};
pub use provider::{WeatherSource, weatherapi::WeatherApiClient};
pub use router::{Route, Router};
pub use screen::{Screen, Snapshot};
pub use theme::{Effect, Gradient, ThemeResult, classify};
pub use view::{FetchState, ViewState};
