use crate::{
    config::KeySource,
    error::FetchError,
    model::{CityQuery, Weather},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Abstraction over the current-weather data source.
///
/// The one real implementation talks to OpenWeatherMap; tests substitute
/// in-memory stubs behind the same seam.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &CityQuery) -> Result<Weather, FetchError>;
}

/// Construct the default provider with call-time credential resolution.
pub fn default_provider() -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::new(KeySource::Resolved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_provider_targets_openweather() {
        let provider = default_provider();
        let desc = format!("{provider:?}");
        assert!(desc.contains("openweathermap.org"));
    }
}
