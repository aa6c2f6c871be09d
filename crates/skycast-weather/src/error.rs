//! Weather-specific error types.
//!
//! These stay inside the crate: the gateway converts every failure to an
//! absent value before it reaches a view.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidApiKey => "Weather API key is invalid. Check settings.".to_string(),
            Self::RateLimited => "Too many requests. Please wait and try again.".to_string(),
            Self::LocationNotFound(_) => "Location not found. Check and try again.".to_string(),
            Self::ApiError(_) => "Weather service error. Please try again.".to_string(),
            Self::Parse(_) => "Received an unexpected response. Please try again.".to_string(),
            Self::Cache(_) => "Weather data may be outdated.".to_string(),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether this error is worth retrying on a later request.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = WeatherError::InvalidApiKey;
        assert!(err.user_message().contains("API key"));

        let err = WeatherError::LocationNotFound("999".into());
        assert!(err.user_message().contains("not found"));
    }

    #[test]
    fn test_is_transient() {
        assert!(WeatherError::RateLimited.is_transient());
        assert!(!WeatherError::InvalidApiKey.is_transient());
        assert!(!WeatherError::Parse("x".into()).is_transient());
    }
}
