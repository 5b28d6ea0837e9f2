use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// A validated lookup query: a trimmed, non-empty city name.
///
/// Constructing one is the only way to hand a city to a provider, so an
/// empty query can never reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(city: &str) -> Result<Self, FetchError> {
        let trimmed = city.trim();
        if trimmed.is_empty() {
            return Err(FetchError::InvalidCity);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for one city, normalized from the provider response.
///
/// Temperatures are Celsius rounded to one decimal. A successful search
/// replaces the whole record; fields are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub city: String,
    pub country: String,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub fetched_at: DateTime<Utc>,
}

impl Weather {
    pub fn tier(&self) -> Tier {
        Tier::for_celsius(self.temp_c)
    }
}

/// Qualitative temperature bucket, used only for display (badge color,
/// icon). Not part of the provider contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Hot,
    Warm,
    Mild,
    Cool,
    Cold,
}

impl Tier {
    pub fn for_celsius(temp_c: f64) -> Self {
        if temp_c >= 35.0 {
            Tier::Hot
        } else if temp_c >= 25.0 {
            Tier::Warm
        } else if temp_c >= 15.0 {
            Tier::Mild
        } else if temp_c >= 5.0 {
            Tier::Cool
        } else {
            Tier::Cold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Hot => "hot",
            Tier::Warm => "warm",
            Tier::Mild => "mild",
            Tier::Cool => "cool",
            Tier::Cold => "cold",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_trims_surrounding_whitespace() {
        let query = CityQuery::new("  London  ").expect("valid city");
        assert_eq!(query.as_str(), "London");
    }

    #[test]
    fn empty_query_is_rejected() {
        assert_eq!(CityQuery::new("").unwrap_err(), FetchError::InvalidCity);
        assert_eq!(CityQuery::new("   ").unwrap_err(), FetchError::InvalidCity);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::for_celsius(35.0), Tier::Hot);
        assert_eq!(Tier::for_celsius(34.9), Tier::Warm);
        assert_eq!(Tier::for_celsius(25.0), Tier::Warm);
        assert_eq!(Tier::for_celsius(15.0), Tier::Mild);
        assert_eq!(Tier::for_celsius(5.0), Tier::Cool);
        assert_eq!(Tier::for_celsius(4.9), Tier::Cold);
        assert_eq!(Tier::for_celsius(-12.0), Tier::Cold);
    }

    #[test]
    fn tier_labels_are_lowercase() {
        assert_eq!(Tier::Hot.to_string(), "hot");
        assert_eq!(Tier::Cold.to_string(), "cold");
    }
}
