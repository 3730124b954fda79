/**
 * IP Geolocation
 *
 * Resolves the client's IP address to a coarse "City, Country" string at
 * sign-in. The result is stored on the user and carried in the session
 * claims. Lookups are best-effort: private addresses are never sent to the
 * provider and provider failures simply yield no location.
 */

use std::net::IpAddr;
use std::time::Duration;

use axum::http::HeaderMap;
use serde::Deserialize;

use crate::backend::server::config::GeolocationConfig;

/// Geolocation backend
#[derive(Clone, Debug)]
pub enum GeoLocator {
    /// JSON provider queried at `{base_url}/{ip}`
    Http {
        client: reqwest::Client,
        base_url: String,
        api_key: Option<String>,
    },
    /// Always answers with the same location (tests, single-region deploys)
    Fixed(String),
    Disabled,
}

/// Subset of the provider response we care about
#[derive(Debug, Deserialize)]
struct GeoResponse {
    city: Option<String>,
    country_name: Option<String>,
    country: Option<String>,
    #[serde(default)]
    error: bool,
}

impl GeoResponse {
    fn into_location(self) -> Option<String> {
        if self.error {
            return None;
        }
        let country = self.country_name.or(self.country).filter(|c| !c.is_empty());
        match (self.city.filter(|c| !c.is_empty()), country) {
            (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
            (None, Some(country)) => Some(country),
            (Some(city), None) => Some(city),
            (None, None) => None,
        }
    }
}

impl GeoLocator {
    pub fn from_config(config: Option<&GeolocationConfig>) -> Self {
        let Some(config) = config else {
            tracing::warn!("GEOLOCATION_URL not set. Sign-in locations will not be resolved.");
            return GeoLocator::Disabled;
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build geolocation HTTP client, using defaults: {:?}", e);
                reqwest::Client::new()
            });

        GeoLocator::Http {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Resolve an address to "City, Country"
    pub async fn locate(&self, ip: IpAddr) -> Option<String> {
        match self {
            GeoLocator::Disabled => None,
            GeoLocator::Fixed(location) => Some(location.clone()),
            GeoLocator::Http { client, base_url, api_key } => {
                if !is_public_ip(&ip) {
                    tracing::debug!("Skipping geolocation for non-public address {}", ip);
                    return None;
                }

                let mut request = client.get(format!("{}/{}", base_url, ip));
                if let Some(key) = api_key {
                    request = request.query(&[("key", key)]);
                }

                let response = match request.send().await.and_then(|r| r.error_for_status()) {
                    Ok(response) => response,
                    Err(e) => {
                        tracing::warn!("Geolocation lookup for {} failed: {}", ip, e);
                        return None;
                    }
                };

                match response.json::<GeoResponse>().await {
                    Ok(body) => body.into_location(),
                    Err(e) => {
                        tracing::warn!("Unexpected geolocation response for {}: {}", ip, e);
                        None
                    }
                }
            }
        }
    }
}

/// Client address as reported by the reverse proxy
///
/// Uses the first entry of `X-Forwarded-For`, then `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok());

    forwarded.or_else(|| {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    })
}

/// Whether an address is routable on the public internet
pub fn is_public_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation())
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            let unique_local = (first & 0xfe00) == 0xfc00;
            let link_local = (first & 0xffc0) == 0xfe80;
            !(v6.is_loopback() || v6.is_unspecified() || unique_local || link_local)
        }
    }
}
