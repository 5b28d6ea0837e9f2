//! Loading/error/data triad driving a lookup frontend.

use crate::{
    model::{CityQuery, Weather},
    provider::WeatherProvider,
};

/// State of the current (or last) search.
///
/// `search` is the only intended writer: a fresh attempt is observable as
/// `loading == true` with `error` and `data` cleared, and resolution
/// leaves exactly one of them set. Overlapping searches on separate state
/// values are last-writer-wins; a single value cannot overlap because
/// `search` takes `&mut self`.
#[derive(Debug, Default)]
pub struct SearchState {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<Weather>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one lookup against `provider`, updating the triad in place.
    ///
    /// An empty or whitespace-only city short-circuits with the
    /// validation message and leaves `loading` and `data` untouched; no
    /// request is issued.
    pub async fn search(&mut self, provider: &dyn WeatherProvider, city: &str) {
        let query = match CityQuery::new(city) {
            Ok(query) => query,
            Err(err) => {
                self.error = Some(err.to_string());
                return;
            }
        };

        self.loading = true;
        self.error = None;
        self.data = None;

        match provider.current_weather(&query).await {
            Ok(weather) => self.data = Some(weather),
            Err(err) => self.error = Some(err.to_string()),
        }

        self.loading = false;
    }
}
