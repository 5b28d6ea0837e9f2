use thiserror::Error;

/// Failure modes of a single weather lookup.
///
/// Each variant displays as the exact message shown to the user. All of
/// them are terminal for the current attempt; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The submitted city name was empty or whitespace-only.
    #[error("Enter a valid City name")]
    InvalidCity,

    /// No API key in the environment or the config file.
    #[error("Missing API key configuration")]
    MissingApiKey,

    /// The provider does not know the city (HTTP 404).
    #[error("City not found")]
    CityNotFound,

    /// The provider rejected the credential (HTTP 401).
    #[error("Invalid API key")]
    Unauthorized,

    /// Provider rate limit hit (HTTP 429).
    #[error("Too many requests, try later")]
    RateLimited,

    /// Any other non-2xx status.
    #[error("Failed to fetch data: {0}")]
    Upstream(u16),

    /// Transport failure or a malformed response body.
    #[error("{0}")]
    Unknown(String),
}

impl FetchError {
    /// Fallback text for transport failures that carry no message of
    /// their own.
    pub const GENERIC_MESSAGE: &'static str = "An unexpected error occurred";

    /// Wrap an underlying failure, substituting [`Self::GENERIC_MESSAGE`]
    /// when the source message is empty.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Unknown(Self::GENERIC_MESSAGE.to_string())
        } else {
            Self::Unknown(message)
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::unknown(err.to_string())
    }
}
