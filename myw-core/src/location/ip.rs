use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, instrument};

use crate::{error::LocationError, model::Coordinates};

use super::{PositionOptions, PositionSource};

/// Position source backed by an IP geolocation lookup (ip-api.com JSON format).
///
/// Precision is city level regardless of `enable_high_accuracy`.
#[derive(Debug)]
pub struct IpPositionSource {
    http: Client,
    endpoint: String,
    last_fix: Mutex<Option<(Instant, Coordinates)>>,
}

impl IpPositionSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { http: Client::new(), endpoint: endpoint.into(), last_fix: Mutex::new(None) }
    }

    fn cached(&self, options: &PositionOptions) -> Option<Coordinates> {
        let guard = self.last_fix.lock();
        guard
            .as_ref()
            .filter(|(at, _)| at.elapsed() <= options.maximum_age)
            .map(|(_, coords)| *coords)
    }

    async fn lookup(&self, options: &PositionOptions) -> Result<Coordinates, LocationError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("fields", "status,message,lat,lon")])
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LocationError::Timeout
                } else {
                    LocationError::Unavailable(e.to_string())
                }
            })?;

        let status = res.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(LocationError::Denied(format!("lookup refused with HTTP {status}")));
        }
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!("lookup failed with HTTP {status}")));
        }

        let parsed: IpLookupResponse =
            res.json().await.map_err(|e| LocationError::Unavailable(e.to_string()))?;

        match (parsed.status.as_str(), parsed.lat, parsed.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Unavailable(
                parsed.message.unwrap_or_else(|| "lookup returned no position".to_string()),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl PositionSource for IpPositionSource {
    #[instrument(skip(self, options), fields(endpoint = %self.endpoint))]
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, LocationError> {
        if let Some(coords) = self.cached(options) {
            debug!("Reusing cached position");
            return Ok(coords);
        }

        let coords = self.lookup(options).await?;
        *self.last_fix.lock() = Some((Instant::now(), coords));
        Ok(coords)
    }
}
