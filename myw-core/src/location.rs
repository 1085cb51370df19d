use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};
use tracing::{debug, info};

use crate::{
    config::LocationConfig,
    error::LocationError,
    model::{Coordinates, LocationQuery},
};

pub mod ip;

pub use ip::IpPositionSource;

/// City queried whenever the device position cannot be used.
pub const FALLBACK_CITY: &str = "Salzburg";

/// How long the platform gets to report a position before the fallback is used.
pub const LOCATION_TIMEOUT: Duration = Duration::from_millis(5000);

/// Options handed to the platform position source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub timeout: Duration,
    pub enable_high_accuracy: bool,
    /// A cached position younger than this may be returned instead of a fresh lookup.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            timeout: LOCATION_TIMEOUT,
            enable_high_accuracy: false,
            maximum_age: Duration::from_secs(300),
        }
    }
}

impl From<&LocationConfig> for PositionOptions {
    fn from(cfg: &LocationConfig) -> Self {
        Self {
            timeout: LOCATION_TIMEOUT,
            enable_high_accuracy: cfg.high_accuracy,
            maximum_age: cfg.maximum_age(),
        }
    }
}

/// Platform capability that reports the device position.
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, LocationError>;
}

/// Outcome of a resolution, with the reason a fallback was used if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub query: LocationQuery,
    pub fallback_reason: Option<LocationError>,
}

/// Turns device position into a [`LocationQuery`], falling back to [`FALLBACK_CITY`].
///
/// Resolution never fails: a missing capability, a platform error, or a platform
/// call that outlives [`LOCATION_TIMEOUT`] all yield the fallback city. Those failures
/// are reported through `tracing` at `info` level and in [`Resolution::fallback_reason`].
#[derive(Debug, Clone)]
pub struct LocationResolver {
    source: Option<Arc<dyn PositionSource>>,
    options: PositionOptions,
}

impl LocationResolver {
    /// The timeout in `options` is always replaced by [`LOCATION_TIMEOUT`].
    pub fn new(source: Option<Arc<dyn PositionSource>>, options: PositionOptions) -> Self {
        Self { source, options: PositionOptions { timeout: LOCATION_TIMEOUT, ..options } }
    }

    /// Build a resolver from config. A disabled location section means no capability.
    pub fn from_config(cfg: &LocationConfig, source: Arc<dyn PositionSource>) -> Self {
        let source = cfg.enabled.then_some(source);
        Self::new(source, PositionOptions::from(cfg))
    }

    pub fn fallback_city(&self) -> &'static str {
        FALLBACK_CITY
    }

    pub async fn resolve(&self) -> LocationQuery {
        self.resolve_detailed().await.query
    }

    pub async fn resolve_detailed(&self) -> Resolution {
        match self.locate().await {
            Ok(coords) => {
                debug!(lat = coords.latitude, lon = coords.longitude, "Resolved device position");
                Resolution { query: LocationQuery::Coordinates(coords), fallback_reason: None }
            }
            Err(reason) => {
                info!(error = %reason, fallback = FALLBACK_CITY, "Using fallback location");
                Resolution {
                    query: LocationQuery::city(FALLBACK_CITY),
                    fallback_reason: Some(reason),
                }
            }
        }
    }

    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let source = self.source.as_ref().ok_or(LocationError::Unsupported)?;

        // Whichever finishes first wins; dropping the losing side cancels it.
        match tokio::time::timeout(LOCATION_TIMEOUT, source.current_position(&self.options)).await
        {
            Ok(result) => result,
            Err(_) => {
                debug!(timeout = ?LOCATION_TIMEOUT, "Location request timed out");
                Err(LocationError::Timeout)
            }
        }
    }
}
