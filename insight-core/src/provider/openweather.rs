use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::KeySource,
    error::FetchError,
    model::{CityQuery, Weather},
    units,
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// OpenWeatherMap current-weather client.
///
/// One GET per lookup: no retries, no caching, no timeout override. The
/// response reports temperatures in Kelvin; conversion happens here so
/// callers only ever see normalized Celsius values.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    keys: KeySource,
    http: Client,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(keys: KeySource) -> Self {
        Self {
            keys,
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host. Tests use this to target a
    /// local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_current(&self, query: &CityQuery) -> Result<Weather, FetchError> {
        // Credential is resolved per call, before any network activity.
        let api_key = self.keys.api_key()?;

        let url = format!("{}/data/2.5/weather", self.base_url);

        debug!(city = %query, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", query.as_str()), ("APPID", api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        match status {
            StatusCode::NOT_FOUND => return Err(FetchError::CityNotFound),
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(FetchError::RateLimited),
            s if !s.is_success() => return Err(FetchError::Upstream(s.as_u16())),
            _ => {}
        }

        let body = res.text().await?;

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::unknown(e.to_string()))?;

        Ok(Weather {
            city: parsed.name,
            country: parsed.sys.country,
            temp_c: units::to_celsius(parsed.main.temp),
            feels_like_c: units::to_celsius(parsed.main.feels_like),
            fetched_at: Utc::now(),
        })
    }
}

// Untrusted external shape; only the fields the app reads are declared.
#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &CityQuery) -> Result<Weather, FetchError> {
        self.fetch_current(query).await
    }
}
